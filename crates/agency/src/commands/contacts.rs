//! Contact message (admin inbox) command handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use agency_core::{ContactMessage, ItemId, ReadStatus, Site};

use crate::cli::{ContactsArgs, ContactsCommand, GlobalOpts, ReadStateArg};
use crate::error::CliError;
use crate::output;

use super::util;

const LIST_COMMAND: &str = "contacts list";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Received")]
    received: String,
}

fn row(m: &ContactMessage, color: bool) -> ContactRow {
    ContactRow {
        id: m.id.to_string(),
        status: output::paint_read_status(m.status, color),
        from: format!("{} <{}>", m.name, m.email),
        subject: m.subject.clone(),
        received: m
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default(),
    }
}

fn detail(m: &ContactMessage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Subject:  {}", m.subject);
    let _ = writeln!(out, "From:     {} <{}>", m.name, m.email);
    if let Some(ref phone) = m.phone {
        let _ = writeln!(out, "Phone:    {phone}");
    }
    let _ = writeln!(out, "Status:   {}", m.status);
    if let Some(received) = m.created_at {
        let _ = writeln!(out, "Received: {}", received.format("%Y-%m-%d %H:%M UTC"));
    }
    let _ = writeln!(out);
    let _ = write!(out, "{}", m.message);
    out
}

impl From<ReadStateArg> for ReadStatus {
    fn from(arg: ReadStateArg) -> Self {
        match arg {
            ReadStateArg::Unread => Self::Unread,
            ReadStateArg::Read => Self::Read,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(site: &Site, args: ContactsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut view = site.admin_view::<ContactMessage>();
    util::load(site, &mut view, global).await?;

    match args.command {
        ContactsCommand::List { status, list } => {
            let label = status.map(|s| ReadStatus::from(s).to_string());
            util::apply_filter(&mut view, label.as_deref())?;
            if let Some(search) = list.search {
                view.set_search(search);
            }
            util::apply_page(&mut view, list.page);

            let color = output::should_color(&global.color);
            let visible = view.visible();
            let out = output::render_list(
                &global.output,
                &visible,
                |m| row(m, color),
                |m| m.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            output::print_footer(global, &util::footer(&view));
            Ok(())
        }

        ContactsCommand::Show { id } => {
            let message = util::find(&view, &id, LIST_COMMAND)?;
            let out = output::render_single(&global.output, message, detail, |m| m.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ContactsCommand::Mark { id, unread } => {
            util::find(&view, &id, LIST_COMMAND)?;
            let status = if unread {
                ReadStatus::Unread
            } else {
                ReadStatus::Read
            };
            site.set_contact_status(&mut view, &ItemId::new(id), status)
                .await?;
            Ok(())
        }

        ContactsCommand::Delete { id } => {
            util::find(&view, &id, LIST_COMMAND)?;
            if !util::confirm(&format!("Delete message '{id}'?"), global.yes)? {
                return Ok(());
            }
            site.delete(&mut view, &ItemId::new(id)).await?;
            Ok(())
        }
    }
}
