// agency-api: Async Rust client for the agency website REST backend
//
// One `ApiClient` talks to every collection endpoint (blogs, portfolio,
// services, contacts, applications). Records come back as loosely typed
// `Raw*` structs; normalization into domain types happens in agency-core.

pub mod client;
pub mod error;
pub mod forms;
mod lenient;
pub mod models;
pub mod multipart;
mod resources;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use forms::{
    ApplicationSubmission, BlogPostForm, ContactSubmission, PortfolioForm, ServiceForm,
};
pub use models::{
    MutationAck, RawBlogPost, RawContactMessage, RawJobApplication, RawPortfolioItem, RawService,
    RawRecord, RawTimestamp, Relation,
};
pub use resources::collections;
pub use transport::{TlsMode, TransportConfig};
