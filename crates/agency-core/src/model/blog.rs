// ── Blog post domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CollectionItem, ItemId};

/// Categories offered by the blog filter bar, in display order.
pub const BLOG_CATEGORIES: &[&str] = &[
    "Web Development",
    "UX/UI Design",
    "Digital Marketing",
    "Mobile Development",
    "Branding",
    "Technology",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: ItemId,
    pub title: String,
    pub slug: String,
    /// Backend excerpt, or one derived from `content`.
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    /// Reading time in minutes.
    pub read_time: u32,
    pub published_at: Option<DateTime<Utc>>,
}

impl CollectionItem for BlogPost {
    const COLLECTION: &'static str = agency_api::collections::BLOGS;
    const SENTINEL: &'static str = "All Posts";
    const NOUN: &'static str = "Blog post";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.category
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.excerpt.as_str(), self.author.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    fn known_labels() -> &'static [&'static str] {
        BLOG_CATEGORIES
    }
}
