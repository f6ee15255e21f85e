// ── Command API ──
//
// Every write goes through the `Command` enum and `Site::execute`.
// Single-item deletes and status changes are reconciled into the local
// collection; admin create/update forms re-fetch the collection instead.

pub mod requests;

use crate::model::{ApplicationStatus, ItemId, ReadStatus};

pub use requests::{
    ApplicationRequest, BlogPostRequest, ContactRequest, PortfolioRequest, ServiceRequest,
};

/// All write operations against the backend.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Single-item mutations ────────────────────────────────────────
    DeleteBlogPost {
        id: ItemId,
    },
    DeletePortfolioItem {
        id: ItemId,
    },
    DeleteService {
        id: ItemId,
    },
    DeleteContactMessage {
        id: ItemId,
    },
    DeleteJobApplication {
        id: ItemId,
    },
    SetContactStatus {
        id: ItemId,
        status: ReadStatus,
    },
    SetApplicationStatus {
        id: ItemId,
        status: ApplicationStatus,
    },

    // ── Full-collection mutations (re-fetch afterwards) ──────────────
    CreateBlogPost(BlogPostRequest),
    UpdateBlogPost {
        id: ItemId,
        request: BlogPostRequest,
    },
    CreatePortfolioItem(PortfolioRequest),
    UpdatePortfolioItem {
        id: ItemId,
        request: PortfolioRequest,
    },
    CreateService(ServiceRequest),
    UpdateService {
        id: ItemId,
        request: ServiceRequest,
    },

    // ── Public forms ─────────────────────────────────────────────────
    SubmitContact(ContactRequest),
    SubmitApplication(ApplicationRequest),
}

impl Command {
    /// The item a single-item mutation targets.
    pub fn target(&self) -> Option<&ItemId> {
        match self {
            Self::DeleteBlogPost { id }
            | Self::DeletePortfolioItem { id }
            | Self::DeleteService { id }
            | Self::DeleteContactMessage { id }
            | Self::DeleteJobApplication { id }
            | Self::SetContactStatus { id, .. }
            | Self::SetApplicationStatus { id, .. }
            | Self::UpdateBlogPost { id, .. }
            | Self::UpdatePortfolioItem { id, .. }
            | Self::UpdateService { id, .. } => Some(id),
            Self::CreateBlogPost(_)
            | Self::CreatePortfolioItem(_)
            | Self::CreateService(_)
            | Self::SubmitContact(_)
            | Self::SubmitApplication(_) => None,
        }
    }

    /// Whether the affected collection must be re-fetched on success.
    pub fn requires_refetch(&self) -> bool {
        matches!(
            self,
            Self::CreateBlogPost(_)
                | Self::UpdateBlogPost { .. }
                | Self::CreatePortfolioItem(_)
                | Self::UpdatePortfolioItem { .. }
                | Self::CreateService(_)
                | Self::UpdateService { .. }
        )
    }
}

/// Outcome of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Deleted { id: ItemId, message: String },
    ContactStatus { id: ItemId, status: ReadStatus },
    ApplicationStatus { id: ItemId, status: ApplicationStatus },
    Saved { message: String },
    Submitted { message: String },
}

impl CommandResult {
    /// Text for the success toast.
    pub fn message(&self) -> String {
        match self {
            Self::Deleted { message, .. }
            | Self::Saved { message }
            | Self::Submitted { message } => message.clone(),
            Self::ContactStatus { status, .. } => format!("Marked as {status}"),
            Self::ApplicationStatus { status, .. } => format!("Status set to {status}"),
        }
    }
}
