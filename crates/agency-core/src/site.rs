// ── Site context ──
//
// The one explicitly constructed context object: backend client, preview
// registry and toast collaborator. Built once at process start and handed
// (cloned) to every consumer; dropping the last clone tears it down.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use agency_api::ApiClient;

use crate::command::{Command, CommandResult};
use crate::config::SiteConfig;
use crate::convert::{self, FromRaw};
use crate::error::CoreError;
use crate::model::{
    ApplicationStatus, BlogPost, CollectionItem, ContactMessage, ItemId, JobApplication,
    PortfolioItem, ReadStatus, Service,
};
use crate::notify::{Notifier, Toast};
use crate::paginate::PageState;
use crate::preview::{PreviewRegistry, PreviewSlot};
use crate::url_sync::{self, ListQuery};
use crate::view::{FetchOutcome, ListView};

const BLOG_PATH: &str = "/blog";

// ── Resource ─────────────────────────────────────────────────────────

/// A collection the site can list and delete from.
pub trait Resource: CollectionItem {
    /// List and normalize the whole collection.
    fn fetch(
        client: &ApiClient,
    ) -> impl Future<Output = Result<Vec<Self>, agency_api::Error>> + Send;

    fn delete_command(id: ItemId) -> Command;
}

impl Resource for BlogPost {
    fn fetch(
        client: &ApiClient,
    ) -> impl Future<Output = Result<Vec<Self>, agency_api::Error>> + Send {
        async move { Ok(convert::normalize(client.list_blogs().await?)) }
    }

    fn delete_command(id: ItemId) -> Command {
        Command::DeleteBlogPost { id }
    }
}

impl Resource for PortfolioItem {
    fn fetch(
        client: &ApiClient,
    ) -> impl Future<Output = Result<Vec<Self>, agency_api::Error>> + Send {
        async move { Ok(convert::normalize(client.list_portfolio().await?)) }
    }

    fn delete_command(id: ItemId) -> Command {
        Command::DeletePortfolioItem { id }
    }
}

impl Resource for Service {
    fn fetch(
        client: &ApiClient,
    ) -> impl Future<Output = Result<Vec<Self>, agency_api::Error>> + Send {
        async move { Ok(convert::normalize(client.list_services().await?)) }
    }

    fn delete_command(id: ItemId) -> Command {
        Command::DeleteService { id }
    }
}

impl Resource for ContactMessage {
    fn fetch(
        client: &ApiClient,
    ) -> impl Future<Output = Result<Vec<Self>, agency_api::Error>> + Send {
        async move { Ok(convert::normalize(client.list_contacts().await?)) }
    }

    fn delete_command(id: ItemId) -> Command {
        Command::DeleteContactMessage { id }
    }
}

impl Resource for JobApplication {
    fn fetch(
        client: &ApiClient,
    ) -> impl Future<Output = Result<Vec<Self>, agency_api::Error>> + Send {
        async move { Ok(convert::normalize(client.list_applications().await?)) }
    }

    fn delete_command(id: ItemId) -> Command {
        Command::DeleteJobApplication { id }
    }
}

// ── Site ─────────────────────────────────────────────────────────────

/// Cheaply cloneable via `Arc<SiteInner>`.
#[derive(Clone)]
pub struct Site {
    inner: Arc<SiteInner>,
}

struct SiteInner {
    config: SiteConfig,
    client: ApiClient,
    previews: PreviewRegistry,
    notifier: Arc<dyn Notifier>,
}

impl Site {
    /// Build the context and its HTTP client.
    pub fn new(config: SiteConfig, notifier: Arc<dyn Notifier>) -> Result<Self, CoreError> {
        let client = ApiClient::new(
            config.backend.as_str(),
            &config.api_prefix,
            config.token.as_ref(),
            &config.transport(),
        )?;
        info!(backend = %config.backend, prefix = %config.api_prefix, "site context ready");
        Ok(Self::with_client(config, client, notifier))
    }

    /// Use a pre-built client (tests, custom transports).
    pub fn with_client(config: SiteConfig, client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner: Arc::new(SiteInner {
                config,
                client,
                previews: PreviewRegistry::new(),
                notifier,
            }),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.inner.previews
    }

    /// A file input bound to this site's preview registry.
    pub fn preview_slot(&self) -> PreviewSlot {
        PreviewSlot::new(self.inner.previews.clone())
    }

    pub fn notify(&self, toast: Toast) {
        self.inner.notifier.notify(toast);
    }

    // ── View factories ───────────────────────────────────────────────

    /// Blog list seeded from an address query.
    pub fn blog_view(&self, query: &ListQuery) -> ListView<BlogPost> {
        let size = self.inner.config.blog_page_size;
        ListView::new(PageState::fixed(size))
            .with_state(query.filter.clone(), query.page_state(size))
    }

    pub fn portfolio_view(&self) -> ListView<PortfolioItem> {
        ListView::new(PageState::reveal(self.inner.config.portfolio_step))
    }

    /// Admin review list (fixed pages of `admin_page_size`).
    pub fn admin_view<T: CollectionItem>(&self) -> ListView<T> {
        ListView::new(PageState::fixed(self.inner.config.admin_page_size))
    }

    /// Shareable public address of a blog view.
    pub fn blog_address(&self, query: &ListQuery) -> Result<Url, CoreError> {
        let target = url_sync::address(BLOG_PATH, query);
        self.inner
            .config
            .public_url
            .join(&target)
            .map_err(|e| CoreError::Config {
                message: format!("Invalid public URL: {e}"),
            })
    }

    // ── Fetcher ──────────────────────────────────────────────────────

    /// One network read of the whole collection, normalized.
    pub async fn fetch<T: Resource>(&self) -> Result<Vec<T>, CoreError> {
        T::fetch(&self.inner.client).await.map_err(CoreError::from)
    }

    /// Mount: fetch unconditionally, superseding any fetch in flight.
    pub async fn load<T: Resource>(&self, view: &mut ListView<T>) -> FetchOutcome {
        let ticket = view.restart_fetch();
        let result = self.fetch::<T>().await;
        view.finish_fetch(ticket, result)
    }

    /// Refresh control: `None` when a fetch is already in flight.
    pub async fn refresh<T: Resource>(&self, view: &mut ListView<T>) -> Option<FetchOutcome> {
        let ticket = view.begin_fetch()?;
        let result = self.fetch::<T>().await;
        Some(view.finish_fetch(ticket, result))
    }

    /// A single blog post by slug or id.
    pub async fn find_blog(&self, key: &str) -> Result<BlogPost, CoreError> {
        let raw = self.inner.client.get_blog(key).await?;
        Ok(BlogPost::from_raw(raw, 0))
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Delete one item and reconcile the view. Errors are toasted and
    /// returned; the view is untouched on failure.
    pub async fn delete<T: Resource>(
        &self,
        view: &mut ListView<T>,
        id: &ItemId,
    ) -> Result<(), CoreError> {
        view.begin_mutation(id)?;
        let result = self
            .execute(T::delete_command(id.clone()))
            .await
            .map(|_| ());
        view.finish_delete(id, result)
    }

    pub async fn set_contact_status(
        &self,
        view: &mut ListView<ContactMessage>,
        id: &ItemId,
        status: ReadStatus,
    ) -> Result<ReadStatus, CoreError> {
        view.begin_mutation(id)?;
        let result = self
            .execute(Command::SetContactStatus {
                id: id.clone(),
                status,
            })
            .await
            .and_then(|outcome| match outcome {
                CommandResult::ContactStatus { status, .. } => Ok(status),
                other => Err(unexpected_outcome(&other)),
            });
        view.finish_status(id, result)
    }

    pub async fn set_application_status(
        &self,
        view: &mut ListView<JobApplication>,
        id: &ItemId,
        status: ApplicationStatus,
    ) -> Result<ApplicationStatus, CoreError> {
        view.begin_mutation(id)?;
        let result = self
            .execute(Command::SetApplicationStatus {
                id: id.clone(),
                status,
            })
            .await
            .and_then(|outcome| match outcome {
                CommandResult::ApplicationStatus { status, .. } => Ok(status),
                other => Err(unexpected_outcome(&other)),
            });
        view.finish_status(id, result)
    }

    /// Run a create/update form and re-fetch the collection on success.
    pub async fn save<T: Resource>(
        &self,
        view: &mut ListView<T>,
        cmd: Command,
    ) -> Result<CommandResult, CoreError> {
        let outcome = self.execute(cmd).await?;
        self.load(view).await;
        Ok(outcome)
    }

    /// Execute a command, toasting the outcome.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        debug!(?cmd, "executing command");
        match self.dispatch(cmd).await {
            Ok(outcome) => {
                self.notify(Toast::success(outcome.message()));
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "command failed");
                self.notify(Toast::error(e.user_message()));
                Err(e)
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    async fn dispatch(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        let client = &self.inner.client;

        match cmd {
            // ── Deletes ──────────────────────────────────────────────
            Command::DeleteBlogPost { id } => {
                let ack = client.delete_blog(id.as_str()).await?;
                Ok(deleted::<BlogPost>(id, ack))
            }
            Command::DeletePortfolioItem { id } => {
                let ack = client.delete_portfolio_item(id.as_str()).await?;
                Ok(deleted::<PortfolioItem>(id, ack))
            }
            Command::DeleteService { id } => {
                let ack = client.delete_service(id.as_str()).await?;
                Ok(deleted::<Service>(id, ack))
            }
            Command::DeleteContactMessage { id } => {
                let ack = client.delete_contact(id.as_str()).await?;
                Ok(deleted::<ContactMessage>(id, ack))
            }
            Command::DeleteJobApplication { id } => {
                let ack = client.delete_application(id.as_str()).await?;
                Ok(deleted::<JobApplication>(id, ack))
            }

            // ── Status changes ───────────────────────────────────────
            Command::SetContactStatus { id, status } => {
                let record = client
                    .set_contact_status(id.as_str(), &status.to_string())
                    .await?;
                let applied = record
                    .as_ref()
                    .and_then(convert::contact_status)
                    .unwrap_or_else(|| {
                        debug!(%id, %status, "no status in response; keeping requested value");
                        status
                    });
                Ok(CommandResult::ContactStatus {
                    id,
                    status: applied,
                })
            }
            Command::SetApplicationStatus { id, status } => {
                let record = client
                    .set_application_status(id.as_str(), &status.to_string())
                    .await?;
                let applied = record
                    .as_ref()
                    .and_then(convert::application_status)
                    .unwrap_or_else(|| {
                        debug!(%id, %status, "no status in response; keeping requested value");
                        status
                    });
                Ok(CommandResult::ApplicationStatus {
                    id,
                    status: applied,
                })
            }

            // ── Admin forms ──────────────────────────────────────────
            Command::CreateBlogPost(request) => {
                request.validate()?;
                let ack = client.create_blog(&request.into()).await?;
                Ok(saved::<BlogPost>(ack))
            }
            Command::UpdateBlogPost { id, request } => {
                request.validate()?;
                let ack = client.update_blog(id.as_str(), &request.into()).await?;
                Ok(saved::<BlogPost>(ack))
            }
            Command::CreatePortfolioItem(request) => {
                request.validate()?;
                let ack = client.create_portfolio_item(&request.into()).await?;
                Ok(saved::<PortfolioItem>(ack))
            }
            Command::UpdatePortfolioItem { id, request } => {
                request.validate()?;
                let ack = client
                    .update_portfolio_item(id.as_str(), &request.into())
                    .await?;
                Ok(saved::<PortfolioItem>(ack))
            }
            Command::CreateService(request) => {
                request.validate()?;
                let ack = client.create_service(&request.into()).await?;
                Ok(saved::<Service>(ack))
            }
            Command::UpdateService { id, request } => {
                request.validate()?;
                let ack = client.update_service(id.as_str(), &request.into()).await?;
                Ok(saved::<Service>(ack))
            }

            // ── Public forms ─────────────────────────────────────────
            Command::SubmitContact(request) => {
                request.validate()?;
                let ack = client.submit_contact(&request.into()).await?;
                Ok(CommandResult::Submitted {
                    message: ack.message.unwrap_or_else(|| {
                        "Thank you! Your message has been sent.".to_owned()
                    }),
                })
            }
            Command::SubmitApplication(request) => {
                request.validate()?;
                let ack = client.submit_application(&request.into()).await?;
                Ok(CommandResult::Submitted {
                    message: ack
                        .message
                        .unwrap_or_else(|| "Application submitted successfully.".to_owned()),
                })
            }
        }
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("backend", &self.inner.config.backend.as_str())
            .field("live_previews", &self.inner.previews.live_count())
            .finish_non_exhaustive()
    }
}

fn deleted<T: CollectionItem>(id: ItemId, ack: agency_api::MutationAck) -> CommandResult {
    CommandResult::Deleted {
        message: ack
            .message
            .unwrap_or_else(|| format!("{} deleted", T::NOUN)),
        id,
    }
}

fn saved<T: CollectionItem>(ack: agency_api::MutationAck) -> CommandResult {
    CommandResult::Saved {
        message: ack.message.unwrap_or_else(|| format!("{} saved", T::NOUN)),
    }
}

fn unexpected_outcome(outcome: &CommandResult) -> CoreError {
    CoreError::Internal(format!("unexpected command outcome: {outcome:?}"))
}
