// ── Portfolio domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CollectionItem, ItemId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub id: ItemId,
    pub title: String,
    pub category: String,
    pub description: String,
    pub client: Option<String>,
    pub image: Option<String>,
    pub technologies: Vec<String>,
    /// Live project or case study URL.
    pub link: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CollectionItem for PortfolioItem {
    const COLLECTION: &'static str = agency_api::collections::PORTFOLIO;
    const SENTINEL: &'static str = "All";
    const NOUN: &'static str = "Portfolio item";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.category
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        fields.extend(self.client.as_deref());
        fields.extend(self.technologies.iter().map(String::as_str));
        fields
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
