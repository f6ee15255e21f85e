//! Service command handlers.

use tabled::Tabled;

use agency_core::{Command as CoreCommand, ItemId, Service, ServiceRequest, Site};

use crate::cli::{GlobalOpts, ServiceArgs, ServicesArgs, ServicesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Features")]
    features: String,
}

impl From<&Service> for ServiceRow {
    fn from(s: &Service) -> Self {
        Self {
            id: s.id.to_string(),
            title: s.title.clone(),
            category: s.category.clone(),
            features: s.features.len().to_string(),
        }
    }
}

impl From<ServiceArgs> for ServiceRequest {
    fn from(args: ServiceArgs) -> Self {
        Self {
            title: args.title,
            category: args.category,
            description: Some(args.description),
            icon: args.icon,
            features: args.features,
            image: args.image,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(site: &Site, args: ServicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ServicesCommand::List { category, search } => {
            // Every service on one page: the services page has no pager.
            let mut view = site.admin_view::<Service>();
            util::load(site, &mut view, global).await?;
            util::apply_filter(&mut view, category.as_deref())?;
            if let Some(search) = search {
                view.set_search(search);
            }

            let matching = view.filtered();
            let out = output::render_list(
                &global.output,
                &matching,
                |s| ServiceRow::from(*s),
                |s| s.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ServicesCommand::Create(service) => {
            util::check_upload(site, service.image.as_deref(), global)?;
            site.execute(CoreCommand::CreateService(service.into()))
                .await?;
            Ok(())
        }

        ServicesCommand::Update { id, service } => {
            util::check_upload(site, service.image.as_deref(), global)?;
            site.execute(CoreCommand::UpdateService {
                id: ItemId::new(id),
                request: service.into(),
            })
            .await?;
            Ok(())
        }

        ServicesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete service '{id}'?"), global.yes)? {
                return Ok(());
            }
            let mut view = site.admin_view::<Service>();
            util::load(site, &mut view, global).await?;
            util::find(&view, &id, "services list")?;
            site.delete(&mut view, &ItemId::new(id)).await?;
            Ok(())
        }
    }
}
