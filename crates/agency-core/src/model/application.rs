// ── Job application domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::{CollectionItem, HasStatus, ItemId};

/// Review stage of a job application. The label is the lowercase name.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Hired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ItemId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub cover_letter: Option<String>,
    /// Resume file URL or path as stored by the backend.
    pub resume: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl CollectionItem for JobApplication {
    const COLLECTION: &'static str = agency_api::collections::APPLICATIONS;
    const SENTINEL: &'static str = "All";
    const NOUN: &'static str = "Application";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn label(&self) -> &str {
        let label: &'static str = self.status.into();
        label
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.position.as_str()]
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn known_labels() -> &'static [&'static str] {
        &["pending", "reviewed", "shortlisted", "rejected", "hired"]
    }
}

impl HasStatus for JobApplication {
    type Status = ApplicationStatus;

    fn status(&self) -> &ApplicationStatus {
        &self.status
    }

    fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
    }
}
