//! Wire types mirroring the backend's JSON.
//!
//! These are plain DTOs: optional fields default so a sparse record still
//! renders, and list-shaped responses accept both envelopes the backend
//! uses.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::list::Keyed;

/// Backend identifier. Some endpoints send numbers, others strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => EntityId(id),
            RawId::Number(id) => EntityId(id.to_string()),
        })
    }
}

/// One page of a paginated listing.
///
/// Accepts `{data, totalCount}` as well as `{data, meta: {total}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: Option<u64>,
}

#[derive(Deserialize)]
struct RawPage<T> {
    data: Vec<T>,
    #[serde(rename = "totalCount", default)]
    total_count: Option<u64>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Deserialize)]
struct PageMeta {
    #[serde(default)]
    total: Option<u64>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPage::<T>::deserialize(deserializer)?;
        Ok(Page {
            total: raw.total_count.or(raw.meta.and_then(|meta| meta.total)),
            data: raw.data,
        })
    }
}

/// A list endpoint that answers either a bare array or `{data: [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Wrapped { data: items } => items,
        }
    }
}

/// `page` / `limit` (and optional filters) of a listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: None,
            status: None,
        }
    }

    /// Query-string pairs in the order the backend documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(search) = self.search.as_deref().filter(|term| !term.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(status) = self.status.as_deref().filter(|status| !status.is_empty()) {
            pairs.push(("status", status.to_string()));
        }
        pairs
    }
}

/// Plain acknowledgement of a mutation. Whatever the backend returned, or
/// `null` for an empty body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ack(pub serde_json::Value);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "userId", alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Keyed for User {
    type Key = EntityId;

    fn key(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}

/// Partial update; absent fields are left unchanged by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(alias = "roleName")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default, alias = "bucketName")]
    pub name: String,
}

impl Keyed for Bucket {
    type Key = EntityId;

    fn key(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designation {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default, alias = "designationName")]
    pub name: String,
}

impl Keyed for Designation {
    type Key = EntityId;

    fn key(&self) -> EntityId {
        self.id.clone()
    }
}

/// A business ticket waiting in the approval queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalTicket {
    #[serde(alias = "ticketId", alias = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub requested_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Keyed for ApprovalTicket {
    type Key = EntityId;

    fn key(&self) -> EntityId {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

impl fmt::Display for ApprovalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalDecision::Approve => f.write_str("approve"),
            ApprovalDecision::Reject => f.write_str("reject"),
        }
    }
}

/// Body of `approval-system/approval-action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalAction {
    pub ticket_id: EntityId,
    pub action: ApprovalDecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token pair returned by login and refresh.
#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"••••••••")
            .field("user", &self.user)
            .finish()
    }
}

/// What the session slice keeps after login or refresh. Tokens stay inside
/// the client and never enter observable state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionInfo {
    pub user: Option<User>,
}
