//! All UI actions. Every state change in the console goes through one.

use std::fmt;

use agency_core::{
    BlogPost, CommandResult, ContactMessage, CoreError, FetchTicket, ItemId, JobApplication,
    PortfolioItem, Service, Toast,
};

use crate::screen::ScreenId;

/// A finished collection read, tagged by collection.
#[derive(Debug, Clone)]
pub enum Loaded {
    Blog(Result<Vec<BlogPost>, CoreError>),
    Portfolio(Result<Vec<PortfolioItem>, CoreError>),
    Services(Result<Vec<Service>, CoreError>),
    Contacts(Result<Vec<ContactMessage>, CoreError>),
    Applications(Result<Vec<JobApplication>, CoreError>),
}

impl Loaded {
    pub fn screen(&self) -> ScreenId {
        match self {
            Self::Blog(_) => ScreenId::Blog,
            Self::Portfolio(_) => ScreenId::Portfolio,
            Self::Services(_) => ScreenId::Services,
            Self::Contacts(_) => ScreenId::Contacts,
            Self::Applications(_) => ScreenId::Applications,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Delete,
    Status,
}

/// Delete awaiting a y/n answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDelete {
    pub screen: ScreenId,
    pub id: ItemId,
    pub name: String,
}

impl fmt::Display for ConfirmDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Delete \"{}\"? This cannot be undone.", self.name)
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Data (from background tasks) ──────────────────────────────
    Fetched {
        ticket: FetchTicket,
        data: Loaded,
    },
    Mutated {
        screen: ScreenId,
        id: ItemId,
        kind: MutationKind,
        result: Result<CommandResult, CoreError>,
    },

    // ── Confirm dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmDelete),
    ConfirmYes,
    ConfirmNo,
    DeleteConfirmed {
        screen: ScreenId,
        id: ItemId,
    },

    // ── Notifications ─────────────────────────────────────────────
    Notify(Toast),
    DismissNotification,
}

impl Action {
    /// The screen a data action belongs to, when it is addressed to one.
    pub fn target(&self) -> Option<ScreenId> {
        match self {
            Self::Fetched { data, .. } => Some(data.screen()),
            Self::Mutated { screen, .. } | Self::DeleteConfirmed { screen, .. } => Some(*screen),
            _ => None,
        }
    }
}
