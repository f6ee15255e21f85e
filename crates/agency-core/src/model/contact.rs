// ── Contact message domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::{CollectionItem, HasStatus, ItemId};

/// Read state of a contact message. The label is the lowercase name.
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
pub enum ReadStatus {
    #[default]
    Unread,
    Read,
}

impl ReadStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Unread => Self::Read,
            Self::Read => Self::Unread,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: ItemId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: ReadStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl CollectionItem for ContactMessage {
    const COLLECTION: &'static str = agency_api::collections::CONTACTS;
    const SENTINEL: &'static str = "All";
    const NOUN: &'static str = "Message";

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn label(&self) -> &str {
        let label: &'static str = self.status.into();
        label
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.subject.as_str(),
            self.message.as_str(),
        ]
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn known_labels() -> &'static [&'static str] {
        &["unread", "read"]
    }
}

impl HasStatus for ContactMessage {
    type Status = ReadStatus;

    fn status(&self) -> &ReadStatus {
        &self.status
    }

    fn set_status(&mut self, status: ReadStatus) {
        self.status = status;
    }
}
