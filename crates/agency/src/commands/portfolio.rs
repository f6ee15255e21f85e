//! Portfolio command handlers.

use tabled::Tabled;

use agency_core::{Command as CoreCommand, ItemId, PortfolioItem, PortfolioRequest, Site};

use crate::cli::{GlobalOpts, PortfolioArgs, PortfolioCommand, PortfolioItemArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PortfolioRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Technologies")]
    technologies: String,
}

impl From<&PortfolioItem> for PortfolioRow {
    fn from(p: &PortfolioItem) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            category: p.category.clone(),
            client: p.client.clone().unwrap_or_default(),
            technologies: p.technologies.join(", "),
        }
    }
}

impl From<PortfolioItemArgs> for PortfolioRequest {
    fn from(args: PortfolioItemArgs) -> Self {
        Self {
            title: args.title,
            category: args.category,
            description: args.description,
            client: args.client,
            technologies: args.technologies,
            link: args.link,
            image: args.image,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    site: &Site,
    args: PortfolioArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PortfolioCommand::List {
            category,
            more,
            all,
            search,
        } => {
            let mut view = site.portfolio_view();
            util::load(site, &mut view, global).await?;
            util::apply_filter(&mut view, category.as_deref())?;
            if let Some(search) = search {
                view.set_search(search);
            }

            let mut presses = 0;
            while (all || presses < more) && view.load_more() {
                presses += 1;
            }

            let visible = view.visible();
            let out = output::render_list(
                &global.output,
                &visible,
                |p| PortfolioRow::from(*p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            output::print_footer(global, &util::footer(&view));
            Ok(())
        }

        PortfolioCommand::Categories => {
            let mut view = site.portfolio_view();
            util::load(site, &mut view, global).await?;
            let options = view.filter_options();
            let out = output::render_single(
                &global.output,
                &options,
                |o| o.join("\n"),
                |o| o.join("\n"),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PortfolioCommand::Create(item) => {
            util::check_upload(site, item.image.as_deref(), global)?;
            site.execute(CoreCommand::CreatePortfolioItem(item.into()))
                .await?;
            Ok(())
        }

        PortfolioCommand::Update { id, item } => {
            util::check_upload(site, item.image.as_deref(), global)?;
            site.execute(CoreCommand::UpdatePortfolioItem {
                id: ItemId::new(id),
                request: item.into(),
            })
            .await?;
            Ok(())
        }

        PortfolioCommand::Delete { id } => {
            if !util::confirm(&format!("Delete portfolio item '{id}'?"), global.yes)? {
                return Ok(());
            }
            let mut view = site.admin_view::<PortfolioItem>();
            util::load(site, &mut view, global).await?;
            util::find(&view, &id, "portfolio list")?;
            site.delete(&mut view, &ItemId::new(id)).await?;
            Ok(())
        }
    }
}
