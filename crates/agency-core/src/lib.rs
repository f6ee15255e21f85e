//! List-view core for the agency site, sitting between `agency-api` and the
//! UI consumers (CLI / TUI).
//!
//! - **[`Site`]**: the explicitly constructed context object. Owns the
//!   backend client, the preview registry and the toast collaborator, and is
//!   the one entry point for fetching and for every write
//!   ([`Site::execute`]).
//!
//! - **[`ListView<T>`]**: per-page view state over one normalized
//!   collection: remote status, filter, search, pagination, selection and
//!   per-item `busy` / `image_failed` flags. Fetches are generation-tagged so
//!   a stale response can never overwrite a newer one.
//!
//! - **Normalizer** ([`convert`]): tolerant mapping from the backend's
//!   loosely shaped records into the canonical [`model`] types. Missing
//!   fields become documented defaults, never errors.
//!
//! - **Filter / paginate** ([`filter`], [`paginate`]): pure functions and a
//!   small page-state enum covering fixed-size pages and incremental reveal.
//!
//! - **[`UrlSync`]**: keeps a blog view's `category` / `page` query in step
//!   with the address, using replace semantics.

pub mod command;
pub mod config;
pub mod convert;
pub mod error;
pub mod filter;
pub mod model;
pub mod notify;
pub mod paginate;
pub mod preview;
pub mod site;
pub mod store;
pub mod url_sync;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::requests::*;
pub use command::{Command, CommandResult};
pub use config::{SiteConfig, TlsVerification};
pub use error::CoreError;
pub use filter::FilterState;
pub use notify::{ChannelNotifier, Notifier, Toast, ToastLevel, TracingNotifier};
pub use paginate::PageState;
pub use preview::{Preview, PreviewHandle, PreviewRegistry, PreviewSlot};
pub use site::{Resource, Site};
pub use store::ItemCollection;
pub use url_sync::{ListQuery, MemoryNavigator, Navigator, UrlSync};
pub use view::{FetchOutcome, FetchTicket, ListView, RemoteStatus};

pub use model::{
    ApplicationStatus, BLOG_CATEGORIES, BlogPost, CollectionItem, ContactMessage, HasStatus,
    ItemId, JobApplication, PortfolioItem, ReadStatus, Service,
};
