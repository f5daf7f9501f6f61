//! Amazon Cloud Directory operations
//!
//! REST-JSON API rooted at `/amazonclouddirectory/2017-01-11`. The directory
//! or schema a call targets travels in the `x-amz-data-partition` header, not
//! the body.

use super::EmptyOutput;
use crate::dispatch::{require, require_str, to_body, Operation};
use crate::error::Result;
use crate::http::HttpRequest;
use crate::pagination::{Page, PagingMode};
use crate::types::{Method, Service};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const API_ROOT: &str = "/amazonclouddirectory/2017-01-11";
const DATA_PARTITION: &str = "x-amz-data-partition";
const CONSISTENCY_LEVEL: &str = "x-amz-consistency-level";

fn request(method: Method, path: &str) -> HttpRequest {
    HttpRequest::new(method, &format!("{API_ROOT}{path}"))
}

// ============================================================================
// Shared shapes
// ============================================================================

/// Directory lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectoryState {
    Enabled,
    Disabled,
    Deleted,
}

/// Read consistency for object queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyLevel {
    Serializable,
    Eventual,
}

impl ConsistencyLevel {
    fn as_header(self) -> &'static str {
        match self {
            ConsistencyLevel::Serializable => "SERIALIZABLE",
            ConsistencyLevel::Eventual => "EVENTUAL",
        }
    }
}

/// A directory as returned by Get/ListDirectories
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Directory {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub directory_arn: Option<String>,
    #[serde(default)]
    pub state: Option<DirectoryState>,
    /// Seconds since the epoch
    #[serde(default)]
    pub creation_date_time: Option<f64>,
}

impl Directory {
    /// Creation time as a timestamp
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.creation_date_time?;
        let whole = secs.trunc() as i64;
        let nanos = (secs.fract() * 1e9).round() as u32;
        DateTime::from_timestamp(whole, nanos)
    }
}

/// Resource tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Path, object id (`$...`) or index selector for an object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

impl ObjectReference {
    pub fn selector(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
        }
    }
}

/// One child link of an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectChild {
    pub link_name: String,
    pub object_identifier: String,
}

/// Output carrying only the directory ARN
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirectoryArnOutput {
    #[serde(default)]
    pub directory_arn: String,
}

// ============================================================================
// Directory lifecycle
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDirectory {
    /// Published schema to apply; sent as the data partition
    #[serde(default, skip_serializing)]
    pub schema_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDirectoryOutput {
    pub directory_arn: String,
    pub name: String,
    pub object_identifier: String,
    pub applied_schema_arn: String,
}

impl Operation for CreateDirectory {
    type Output = CreateDirectoryOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "CreateDirectory";

    fn to_http(&self) -> Result<HttpRequest> {
        let schema_arn = require_str(&self.schema_arn, Self::NAME, "SchemaArn")?;
        require_str(&self.name, Self::NAME, "Name")?;
        Ok(request(Method::PUT, "/directory/create")
            .header(DATA_PARTITION, schema_arn)
            .json(to_body(self)?))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetDirectory {
    #[serde(default, skip_serializing)]
    pub directory_arn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetDirectoryOutput {
    pub directory: Directory,
}

impl Operation for GetDirectory {
    type Output = GetDirectoryOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "GetDirectory";

    fn to_http(&self) -> Result<HttpRequest> {
        let arn = require_str(&self.directory_arn, Self::NAME, "DirectoryArn")?;
        Ok(request(Method::POST, "/directory/get")
            .header(DATA_PARTITION, arn)
            .json(serde_json::json!({})))
    }
}

/// Delete, enable and disable share one request shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DirectoryTarget {
    #[serde(default, skip_serializing)]
    pub directory_arn: Option<String>,
}

impl DirectoryTarget {
    fn to_http(&self, operation: &str, path: &str) -> Result<HttpRequest> {
        let arn = require_str(&self.directory_arn, operation, "DirectoryArn")?;
        Ok(request(Method::PUT, path).header(DATA_PARTITION, arn))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeleteDirectory(pub DirectoryTarget);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnableDirectory(pub DirectoryTarget);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisableDirectory(pub DirectoryTarget);

impl Operation for DeleteDirectory {
    type Output = DirectoryArnOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "DeleteDirectory";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0.to_http(Self::NAME, "/directory")
    }
}

impl Operation for EnableDirectory {
    type Output = DirectoryArnOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "EnableDirectory";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0.to_http(Self::NAME, "/directory/enable")
    }
}

impl Operation for DisableDirectory {
    type Output = DirectoryArnOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "DisableDirectory";

    fn to_http(&self) -> Result<HttpRequest> {
        self.0.to_http(Self::NAME, "/directory/disable")
    }
}

// ============================================================================
// Listing
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListDirectories {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(default, rename = "state", skip_serializing_if = "Option::is_none")]
    pub state: Option<DirectoryState>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListDirectoriesOutput {
    #[serde(default)]
    pub directories: Vec<Directory>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl Operation for ListDirectories {
    type Output = ListDirectoriesOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "ListDirectories";

    fn to_http(&self) -> Result<HttpRequest> {
        Ok(request(Method::POST, "/directory/list").json(to_body(self)?))
    }
}

paged_operation!(ListDirectories, Directory, PagingMode::Auto, |out| {
    Page::new(out.directories, out.next_token)
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListDevelopmentSchemaArns {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SchemaArnsOutput {
    #[serde(default)]
    pub schema_arns: Vec<String>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl Operation for ListDevelopmentSchemaArns {
    type Output = SchemaArnsOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "ListDevelopmentSchemaArns";

    fn to_http(&self) -> Result<HttpRequest> {
        Ok(request(Method::POST, "/schema/development").json(to_body(self)?))
    }
}

paged_operation!(ListDevelopmentSchemaArns, String, PagingMode::Auto, |out| {
    Page::new(out.schema_arns, out.next_token)
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListPublishedSchemaArns {
    /// Restrict to versions of this schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl Operation for ListPublishedSchemaArns {
    type Output = SchemaArnsOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "ListPublishedSchemaArns";

    fn to_http(&self) -> Result<HttpRequest> {
        Ok(request(Method::POST, "/schema/published").json(to_body(self)?))
    }
}

paged_operation!(ListPublishedSchemaArns, String, PagingMode::Auto, |out| {
    Page::new(out.schema_arns, out.next_token)
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListObjectChildren {
    #[serde(default, skip_serializing)]
    pub directory_arn: Option<String>,
    #[serde(default, skip_serializing)]
    pub consistency_level: Option<ConsistencyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_reference: Option<ObjectReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListObjectChildrenOutput {
    /// Link name to object identifier
    #[serde(default)]
    pub children: BTreeMap<String, String>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl Operation for ListObjectChildren {
    type Output = ListObjectChildrenOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "ListObjectChildren";

    fn to_http(&self) -> Result<HttpRequest> {
        let arn = require_str(&self.directory_arn, Self::NAME, "DirectoryArn")?;
        require(&self.object_reference, Self::NAME, "ObjectReference")?;
        Ok(request(Method::POST, "/object/children")
            .header(DATA_PARTITION, arn)
            .header_opt(
                CONSISTENCY_LEVEL,
                self.consistency_level.map(ConsistencyLevel::as_header),
            )
            .json(to_body(self)?))
    }
}

// Children of a large node can run into the millions; page by hand unless asked.
paged_operation!(ListObjectChildren, ObjectChild, PagingMode::Manual, |out| {
    let children = out
        .children
        .into_iter()
        .map(|(link_name, object_identifier)| ObjectChild {
            link_name,
            object_identifier,
        })
        .collect();
    Page::new(children, out.next_token)
});

// ============================================================================
// Tagging
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTagsForResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTagsForResourceOutput {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl Operation for ListTagsForResource {
    type Output = ListTagsForResourceOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "ListTagsForResource";

    fn to_http(&self) -> Result<HttpRequest> {
        require_str(&self.resource_arn, Self::NAME, "ResourceArn")?;
        Ok(request(Method::POST, "/tags").json(to_body(self)?))
    }
}

paged_operation!(ListTagsForResource, Tag, PagingMode::Auto, |out| {
    Page::new(out.tags, out.next_token)
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TagResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl Operation for TagResource {
    type Output = EmptyOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "TagResource";

    fn to_http(&self) -> Result<HttpRequest> {
        require_str(&self.resource_arn, Self::NAME, "ResourceArn")?;
        require(&self.tags, Self::NAME, "Tags")?;
        Ok(request(Method::PUT, "/tags/add").json(to_body(self)?))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UntagResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_keys: Option<Vec<String>>,
}

impl Operation for UntagResource {
    type Output = EmptyOutput;
    const SERVICE: Service = Service::CloudDirectory;
    const NAME: &'static str = "UntagResource";

    fn to_http(&self) -> Result<HttpRequest> {
        require_str(&self.resource_arn, Self::NAME, "ResourceArn")?;
        require(&self.tag_keys, Self::NAME, "TagKeys")?;
        Ok(request(Method::PUT, "/tags/remove").json(to_body(self)?))
    }
}
