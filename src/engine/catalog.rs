//! Operation catalog
//!
//! Maps `(service, operation name)` to a type-erased invoker so that callers
//! holding only JSON input, such as the CLI, can reach every typed operation.

use super::types::{Message, MessageStream};
use crate::dispatch::{Dispatcher, Operation};
use crate::error::{Error, Result};
use crate::pagination::{Listed, PageOptions, PagedOperation, PagingMode, Paginator};
use crate::services::{clouddirectory as cd, notifications as un};
use crate::types::{JsonValue, Service};
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;

type Invoker = fn(Dispatcher, JsonValue, PageOptions) -> Result<MessageStream>;

/// One invocable operation
#[derive(Debug, Clone, Copy)]
pub struct OperationEntry {
    /// Owning service
    pub service: Service,
    /// API operation name
    pub name: &'static str,
    /// Default paging mode, `None` for single-call operations
    pub paging: Option<PagingMode>,
    invoke: Invoker,
}

impl OperationEntry {
    /// Whether the operation is paged
    pub fn is_paged(&self) -> bool {
        self.paging.is_some()
    }

    /// Decode `input` into the typed request and start the call
    pub fn invoke(
        &self,
        dispatcher: Dispatcher,
        input: JsonValue,
        options: PageOptions,
    ) -> Result<MessageStream> {
        (self.invoke)(dispatcher, input, options)
    }
}

fn parse_input<O: Operation + DeserializeOwned>(input: JsonValue) -> Result<O> {
    let input = if input.is_null() {
        JsonValue::Object(serde_json::Map::new())
    } else {
        input
    };
    serde_json::from_value(input).map_err(|e| Error::invalid_input(O::NAME, e.to_string()))
}

fn single<O>(
    dispatcher: Dispatcher,
    input: JsonValue,
    _options: PageOptions,
) -> Result<MessageStream>
where
    O: Operation + DeserializeOwned + 'static,
    O::Output: Serialize,
{
    let request: O = parse_input(input)?;
    let call = async move {
        let output = dispatcher.send(&request).await?;
        Ok::<_, Error>(Message::response(O::NAME, serde_json::to_value(output)?))
    };
    Ok(stream::once(call).boxed())
}

fn paged<O>(dispatcher: Dispatcher, input: JsonValue, options: PageOptions) -> Result<MessageStream>
where
    O: PagedOperation + DeserializeOwned,
    O::Item: Serialize,
{
    let request: O = parse_input(input)?;
    let items = Paginator::new(dispatcher, request)
        .with_options(options)
        .items()
        .map(|listed| -> Result<Message> {
            match listed? {
                Listed::Item(item) => Ok(Message::item(O::NAME, serde_json::to_value(item)?)),
                Listed::NextToken(token) => Ok(Message::next_token(O::NAME, token)),
            }
        });
    Ok(items.boxed())
}

fn single_entry<O>() -> OperationEntry
where
    O: Operation + DeserializeOwned + 'static,
    O::Output: Serialize,
{
    OperationEntry {
        service: O::SERVICE,
        name: O::NAME,
        paging: None,
        invoke: single::<O>,
    }
}

fn paged_entry<O>() -> OperationEntry
where
    O: PagedOperation + DeserializeOwned,
    O::Item: Serialize,
{
    OperationEntry {
        service: O::SERVICE,
        name: O::NAME,
        paging: Some(O::DEFAULT_MODE),
        invoke: paged::<O>,
    }
}

static CATALOG: Lazy<Vec<OperationEntry>> = Lazy::new(|| {
    vec![
        // Cloud Directory
        single_entry::<cd::CreateDirectory>(),
        single_entry::<cd::GetDirectory>(),
        single_entry::<cd::DeleteDirectory>(),
        single_entry::<cd::EnableDirectory>(),
        single_entry::<cd::DisableDirectory>(),
        paged_entry::<cd::ListDirectories>(),
        paged_entry::<cd::ListDevelopmentSchemaArns>(),
        paged_entry::<cd::ListPublishedSchemaArns>(),
        paged_entry::<cd::ListObjectChildren>(),
        paged_entry::<cd::ListTagsForResource>(),
        single_entry::<cd::TagResource>(),
        single_entry::<cd::UntagResource>(),
        // User Notifications
        paged_entry::<un::ListChannels>(),
        single_entry::<un::AssociateChannel>(),
        single_entry::<un::DisassociateChannel>(),
        single_entry::<un::CreateEventRule>(),
        single_entry::<un::GetEventRule>(),
        single_entry::<un::DeleteEventRule>(),
        paged_entry::<un::ListEventRules>(),
        single_entry::<un::CreateNotificationConfiguration>(),
        single_entry::<un::GetNotificationConfiguration>(),
        single_entry::<un::DeleteNotificationConfiguration>(),
        paged_entry::<un::ListNotificationConfigurations>(),
        paged_entry::<un::ListNotificationEvents>(),
        paged_entry::<un::ListNotificationHubs>(),
        single_entry::<un::RegisterNotificationHub>(),
        single_entry::<un::DeregisterNotificationHub>(),
        single_entry::<un::ListTagsForResource>(),
    ]
});

/// Every registered operation
pub fn catalog() -> &'static [OperationEntry] {
    &CATALOG
}

/// Registered operations of one service
pub fn operations(service: Service) -> impl Iterator<Item = &'static OperationEntry> {
    CATALOG.iter().filter(move |e| e.service == service)
}

/// Look up an operation; names match case-insensitively
pub fn find(service: Service, name: &str) -> Result<&'static OperationEntry> {
    operations(service)
        .find(|e| e.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownOperation {
            service: service.to_string(),
            operation: name.to_string(),
        })
}
