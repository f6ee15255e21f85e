// Raw backend record types
//
// The backend is inconsistent about field presence and shape (relations
// are sometimes embedded records, sometimes plain names; ids come as
// `_id` or `id`). Every field is optional and decoded through `lenient`,
// so a record only fails to decode when it is not a JSON object at all.

use serde::Deserialize;

use crate::lenient;

// ── Shared shapes ────────────────────────────────────────────────────

/// A relation field: embedded record or a bare name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    Record {
        id: Option<String>,
        name: Option<String>,
    },
    Name(String),
}

/// A timestamp as sent by the backend, parsed in agency-core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTimestamp {
    Text(String),
    EpochMillis(i64),
}

/// Generic acknowledgement body of create/delete/submit calls.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MutationAck {
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: Option<String>,
}

// ── Blog ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlogPost {
    #[serde(default, rename = "_id", deserialize_with = "lenient::id")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient::relation")]
    pub category: Option<Relation>,
    #[serde(default, deserialize_with = "lenient::relation")]
    pub author: Option<Relation>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub featured_image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::minutes")]
    pub read_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub published_at: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<RawTimestamp>,
}

// ── Portfolio ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPortfolioItem {
    #[serde(default, rename = "_id", deserialize_with = "lenient::id")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::relation")]
    pub category: Option<Relation>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub client: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub project_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<RawTimestamp>,
}

// ── Services ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawService {
    #[serde(default, rename = "_id", deserialize_with = "lenient::id")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::relation")]
    pub category: Option<Relation>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<RawTimestamp>,
}

// ── Contact messages ─────────────────────────────────────────────────

/// Contact form message. Read state arrives either as a boolean
/// (`read` / `isRead`) or as a `status` string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContactMessage {
    #[serde(default, rename = "_id", deserialize_with = "lenient::id")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub read: Option<bool>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_read: Option<bool>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<RawTimestamp>,
}

// ── Job applications ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobApplication {
    #[serde(default, rename = "_id", deserialize_with = "lenient::id")]
    pub mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub cover_letter: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub resume: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub resume_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<RawTimestamp>,
}

// ── Identity ─────────────────────────────────────────────────────────

/// Records that carry a backend identifier under `_id` or `id`.
pub trait RawRecord {
    /// `_id` wins over `id` when both are present.
    fn raw_id(&self) -> Option<&str>;
}

impl RawRecord for RawBlogPost {
    fn raw_id(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }
}

impl RawRecord for RawPortfolioItem {
    fn raw_id(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }
}

impl RawRecord for RawService {
    fn raw_id(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }
}

impl RawRecord for RawContactMessage {
    fn raw_id(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }
}

impl RawRecord for RawJobApplication {
    fn raw_id(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }
}
