// ── Service domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CollectionItem, ItemId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ItemId,
    pub title: String,
    pub slug: String,
    /// Falls back to `"General"`.
    pub category: String,
    pub description: String,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub features: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CollectionItem for Service {
    const COLLECTION: &'static str = agency_api::collections::SERVICES;
    const SENTINEL: &'static str = "All";
    const NOUN: &'static str = "Service";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.category
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        fields.extend(self.features.iter().map(String::as_str));
        fields
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
