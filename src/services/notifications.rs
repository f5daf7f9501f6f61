//! AWS User Notifications operations
//!
//! REST-JSON API with camelCase members. Resource ARNs are passed as single
//! path segments; list filters go in the query string.

use super::EmptyOutput;
use crate::dispatch::{require, require_str, to_body, Operation};
use crate::error::Result;
use crate::http::HttpRequest;
use crate::pagination::{Page, PagingMode};
use crate::types::{JsonValue, Service};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn timestamp_param(value: Option<&DateTime<Utc>>) -> Option<String> {
    value.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
}

// ============================================================================
// Shared shapes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationConfigurationStatus {
    Active,
    PartiallyActive,
    Inactive,
    Deleting,
}

impl NotificationConfigurationStatus {
    fn as_param(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::PartiallyActive => "PARTIALLY_ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Deleting => "DELETING",
        }
    }
}

/// How long events are grouped before a notification goes out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationDuration {
    Long,
    Short,
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRule {
    pub arn: String,
    #[serde(default)]
    pub notification_configuration_arn: Option<String>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_pattern: Option<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub managed_rules: Vec<String>,
    #[serde(default)]
    pub status_summary_by_region: BTreeMap<String, StatusSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfiguration {
    pub arn: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<NotificationConfigurationStatus>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub aggregation_duration: Option<AggregationDuration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEventOverview {
    pub arn: String,
    #[serde(default)]
    pub notification_configuration_arn: Option<String>,
    #[serde(default)]
    pub related_account: Option<String>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub aggregation_event_type: Option<String>,
    #[serde(default)]
    pub aggregate_notification_event_arn: Option<String>,
    /// Event summary; its shape varies by source
    #[serde(default)]
    pub notification_event: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationHub {
    pub notification_hub_region: String,
    #[serde(default)]
    pub status_summary: StatusSummary,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activation_time: Option<DateTime<Utc>>,
}

// ============================================================================
// Channels
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChannels {
    #[serde(default)]
    pub notification_configuration_arn: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChannelsOutput {
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl Operation for ListChannels {
    type Output = ListChannelsOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "ListChannels";

    fn to_http(&self) -> Result<HttpRequest> {
        let config = require_str(
            &self.notification_configuration_arn,
            Self::NAME,
            "notificationConfigurationArn",
        )?;
        Ok(HttpRequest::get("/channels")
            .query("notificationConfigurationArn", config)
            .query_opt("maxResults", self.max_results)
            .query_opt("nextToken", self.next_token.as_deref()))
    }
}

paged_operation!(ListChannels, String, PagingMode::Auto, |out| {
    Page::new(out.channels, out.next_token)
});

/// Associate and disassociate share one request shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelLink {
    /// Channel ARN; sent in the path
    #[serde(default, skip_serializing)]
    pub arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_configuration_arn: Option<String>,
}

impl ChannelLink {
    fn to_http(&self, operation: &str, path: &str) -> Result<HttpRequest> {
        let arn = require_str(&self.arn, operation, "arn")?;
        require_str(
            &self.notification_configuration_arn,
            operation,
            "notificationConfigurationArn",
        )?;
        Ok(HttpRequest::post(path).segment(arn).json(to_body(self)?))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssociateChannel(pub ChannelLink);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisassociateChannel(pub ChannelLink);

impl Operation for AssociateChannel {
    type Output = EmptyOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "AssociateChannel";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0.to_http(Self::NAME, "/channels/associate")
    }
}

impl Operation for DisassociateChannel {
    type Output = EmptyOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "DisassociateChannel";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0.to_http(Self::NAME, "/channels/disassociate")
    }
}

// ============================================================================
// Event rules
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_configuration_arn: Option<String>,
    /// EventBridge source, e.g. `aws.ec2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// EventBridge pattern as a JSON string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRuleOutput {
    pub arn: String,
    #[serde(default)]
    pub notification_configuration_arn: Option<String>,
    #[serde(default)]
    pub status_summary_by_region: BTreeMap<String, StatusSummary>,
}

impl Operation for CreateEventRule {
    type Output = CreateEventRuleOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "CreateEventRule";

    fn to_http(&self) -> Result<HttpRequest> {
        require_str(
            &self.notification_configuration_arn,
            Self::NAME,
            "notificationConfigurationArn",
        )?;
        require_str(&self.source, Self::NAME, "source")?;
        require_str(&self.event_type, Self::NAME, "eventType")?;
        require(&self.regions, Self::NAME, "regions")?;
        Ok(HttpRequest::post("/event-rules").json(to_body(self)?))
    }
}

/// Get and delete address a rule by ARN only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceArn {
    #[serde(default)]
    pub arn: Option<String>,
}

impl ResourceArn {
    fn to_http(&self, operation: &str, base: HttpRequest) -> Result<HttpRequest> {
        let arn = require_str(&self.arn, operation, "arn")?;
        Ok(base.segment(arn))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GetEventRule(pub ResourceArn);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeleteEventRule(pub ResourceArn);

impl Operation for GetEventRule {
    type Output = EventRule;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "GetEventRule";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0.to_http(Self::NAME, HttpRequest::get("/event-rules"))
    }
}

impl Operation for DeleteEventRule {
    type Output = EmptyOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "DeleteEventRule";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0.to_http(Self::NAME, HttpRequest::delete("/event-rules"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventRules {
    #[serde(default)]
    pub notification_configuration_arn: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEventRulesOutput {
    #[serde(default)]
    pub event_rules: Vec<EventRule>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl Operation for ListEventRules {
    type Output = ListEventRulesOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "ListEventRules";

    fn to_http(&self) -> Result<HttpRequest> {
        let config = require_str(
            &self.notification_configuration_arn,
            Self::NAME,
            "notificationConfigurationArn",
        )?;
        Ok(HttpRequest::get("/event-rules")
            .query("notificationConfigurationArn", config)
            .query_opt("maxResults", self.max_results)
            .query_opt("nextToken", self.next_token.as_deref()))
    }
}

paged_operation!(ListEventRules, EventRule, PagingMode::Auto, |out| {
    Page::new(out.event_rules, out.next_token)
});

// ============================================================================
// Notification configurations
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_duration: Option<AggregationDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationConfigurationOutput {
    pub arn: String,
    #[serde(default)]
    pub status: Option<NotificationConfigurationStatus>,
}

impl Operation for CreateNotificationConfiguration {
    type Output = CreateNotificationConfigurationOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "CreateNotificationConfiguration";

    fn to_http(&self) -> Result<HttpRequest> {
        require_str(&self.name, Self::NAME, "name")?;
        require_str(&self.description, Self::NAME, "description")?;
        Ok(HttpRequest::post("/notification-configurations").json(to_body(self)?))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GetNotificationConfiguration(pub ResourceArn);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeleteNotificationConfiguration(pub ResourceArn);

impl Operation for GetNotificationConfiguration {
    type Output = NotificationConfiguration;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "GetNotificationConfiguration";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0
            .to_http(Self::NAME, HttpRequest::get("/notification-configurations"))
    }
}

impl Operation for DeleteNotificationConfiguration {
    type Output = EmptyOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "DeleteNotificationConfiguration";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0
            .to_http(Self::NAME, HttpRequest::delete("/notification-configurations"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationConfigurations {
    #[serde(default)]
    pub event_rule_source: Option<String>,
    #[serde(default)]
    pub channel_arn: Option<String>,
    #[serde(default)]
    pub status: Option<NotificationConfigurationStatus>,
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationConfigurationsOutput {
    #[serde(default)]
    pub notification_configurations: Vec<NotificationConfiguration>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl Operation for ListNotificationConfigurations {
    type Output = ListNotificationConfigurationsOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "ListNotificationConfigurations";

    fn to_http(&self) -> Result<HttpRequest> {
        Ok(HttpRequest::get("/notification-configurations")
            .query_opt("eventRuleSource", self.event_rule_source.as_deref())
            .query_opt("channelArn", self.channel_arn.as_deref())
            .query_opt("status", self.status.map(NotificationConfigurationStatus::as_param))
            .query_opt("maxResults", self.max_results)
            .query_opt("nextToken", self.next_token.as_deref()))
    }
}

paged_operation!(
    ListNotificationConfigurations,
    NotificationConfiguration,
    PagingMode::Auto,
    |out| Page::new(out.notification_configurations, out.next_token)
);

// ============================================================================
// Notification events
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationEvents {
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub include_child_events: Option<bool>,
    #[serde(default)]
    pub aggregate_notification_event_arn: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationEventsOutput {
    #[serde(default)]
    pub notification_events: Vec<NotificationEventOverview>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl Operation for ListNotificationEvents {
    type Output = ListNotificationEventsOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "ListNotificationEvents";

    fn to_http(&self) -> Result<HttpRequest> {
        Ok(HttpRequest::get("/notification-events")
            .query_opt("startTime", timestamp_param(self.start_time.as_ref()))
            .query_opt("endTime", timestamp_param(self.end_time.as_ref()))
            .query_opt("locale", self.locale.as_deref())
            .query_opt("source", self.source.as_deref())
            .query_opt("includeChildEvents", self.include_child_events)
            .query_opt(
                "aggregateNotificationEventArn",
                self.aggregate_notification_event_arn.as_deref(),
            )
            .query_opt("maxResults", self.max_results)
            .query_opt("nextToken", self.next_token.as_deref()))
    }
}

// Event history is unbounded over a 90 day window; one page per call by default.
paged_operation!(
    ListNotificationEvents,
    NotificationEventOverview,
    PagingMode::Manual,
    |out| Page::new(out.notification_events, out.next_token)
);

// ============================================================================
// Notification hubs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationHubs {
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationHubsOutput {
    #[serde(default)]
    pub notification_hubs: Vec<NotificationHub>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl Operation for ListNotificationHubs {
    type Output = ListNotificationHubsOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "ListNotificationHubs";

    fn to_http(&self) -> Result<HttpRequest> {
        Ok(HttpRequest::get("/notification-hubs")
            .query_opt("maxResults", self.max_results)
            .query_opt("nextToken", self.next_token.as_deref()))
    }
}

paged_operation!(ListNotificationHubs, NotificationHub, PagingMode::Auto, |out| {
    Page::new(out.notification_hubs, out.next_token)
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNotificationHub {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_hub_region: Option<String>,
}

impl Operation for RegisterNotificationHub {
    type Output = NotificationHub;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "RegisterNotificationHub";

    fn to_http(&self) -> Result<HttpRequest> {
        require_str(&self.notification_hub_region, Self::NAME, "notificationHubRegion")?;
        Ok(HttpRequest::post("/notification-hubs").json(to_body(self)?))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeregisterNotificationHub {
    #[serde(default)]
    pub notification_hub_region: Option<String>,
}

impl Operation for DeregisterNotificationHub {
    type Output = NotificationHub;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "DeregisterNotificationHub";

    fn to_http(&self) -> Result<HttpRequest> {
        let region =
            require_str(&self.notification_hub_region, Self::NAME, "notificationHubRegion")?;
        Ok(HttpRequest::delete("/notification-hubs").segment(region))
    }
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListTagsForResource(pub ResourceArn);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTagsForResourceOutput {
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Operation for ListTagsForResource {
    type Output = ListTagsForResourceOutput;
    const SERVICE: Service = Service::Notifications;
    const NAME: &'static str = "ListTagsForResource";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0.to_http(Self::NAME, HttpRequest::get("/tags"))
    }
}
