// ── Domain model ──
//
// Uniform item shapes produced by the normalizer. Every item exposes its
// id, filter label and searchable text through `CollectionItem`, which is
// all the filter engine, paginator and reconciler need to know.

pub mod application;
pub mod blog;
pub mod contact;
pub mod item_id;
pub mod portfolio;
pub mod service;

use chrono::{DateTime, Utc};

pub use application::{ApplicationStatus, JobApplication};
pub use blog::{BLOG_CATEGORIES, BlogPost};
pub use contact::{ContactMessage, ReadStatus};
pub use item_id::ItemId;
pub use portfolio::PortfolioItem;
pub use service::Service;

/// An item held in a list view.
pub trait CollectionItem: Clone + Send + Sync + 'static {
    /// Backend collection segment, also the prefix of synthetic ids.
    const COLLECTION: &'static str;
    /// Filter value meaning "no filtering".
    const SENTINEL: &'static str;
    /// Human name for one item, used in notifications.
    const NOUN: &'static str;

    fn id(&self) -> &ItemId;

    /// Category or status label matched exactly by the filter engine.
    fn label(&self) -> &str;

    /// Fields matched by free-text search.
    fn search_fields(&self) -> Vec<&str>;

    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Fixed label set, when the collection has one. Empty means the
    /// options are derived from the loaded items.
    fn known_labels() -> &'static [&'static str] {
        &[]
    }

    /// Case-insensitive substring match; `needle` must already be lowercase.
    fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Items whose label is a status the admin can change.
pub trait HasStatus: CollectionItem {
    type Status: Clone + PartialEq + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static;

    fn status(&self) -> &Self::Status;
    fn set_status(&mut self, status: Self::Status);
}
