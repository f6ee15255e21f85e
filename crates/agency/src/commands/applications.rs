//! Job application (admin) command handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use agency_core::{ApplicationStatus, ItemId, JobApplication, Site};

use crate::cli::{ApplicationsArgs, ApplicationsCommand, GlobalOpts, StageArg};
use crate::error::CliError;
use crate::output;

use super::util;

const LIST_COMMAND: &str = "applications list";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ApplicationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Applicant")]
    applicant: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Resume")]
    resume: String,
}

fn row(a: &JobApplication, color: bool) -> ApplicationRow {
    ApplicationRow {
        id: a.id.to_string(),
        status: output::paint_stage(a.status, color),
        applicant: format!("{} <{}>", a.name, a.email),
        position: a.position.clone(),
        resume: if a.resume.is_some() { "yes" } else { "-" }.into(),
    }
}

fn detail(a: &JobApplication) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Applicant: {} <{}>", a.name, a.email);
    if let Some(ref phone) = a.phone {
        let _ = writeln!(out, "Phone:     {phone}");
    }
    let _ = writeln!(out, "Position:  {}", a.position);
    let _ = writeln!(out, "Status:    {}", a.status);
    if let Some(ref resume) = a.resume {
        let _ = writeln!(out, "Resume:    {resume}");
    }
    if let Some(applied) = a.created_at {
        let _ = writeln!(out, "Applied:   {}", applied.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(ref letter) = a.cover_letter {
        let _ = writeln!(out);
        let _ = write!(out, "{letter}");
    }
    out
}

impl From<StageArg> for ApplicationStatus {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Pending => Self::Pending,
            StageArg::Reviewed => Self::Reviewed,
            StageArg::Shortlisted => Self::Shortlisted,
            StageArg::Rejected => Self::Rejected,
            StageArg::Hired => Self::Hired,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    site: &Site,
    args: ApplicationsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut view = site.admin_view::<JobApplication>();
    util::load(site, &mut view, global).await?;

    match args.command {
        ApplicationsCommand::List { status, list } => {
            let label = status.map(|s| ApplicationStatus::from(s).to_string());
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
                |a| row(a, color),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            output::print_footer(global, &util::footer(&view));
            Ok(())
        }

        ApplicationsCommand::Show { id } => {
            let application = util::find(&view, &id, LIST_COMMAND)?;
            let out =
                output::render_single(&global.output, application, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ApplicationsCommand::Status { id, status } => {
            util::find(&view, &id, LIST_COMMAND)?;
            site.set_application_status(&mut view, &ItemId::new(id), status.into())
                .await?;
            Ok(())
        }

        ApplicationsCommand::Delete { id } => {
            util::find(&view, &id, LIST_COMMAND)?;
            if !util::confirm(&format!("Delete application '{id}'?"), global.yes)? {
                return Ok(());
            }
            site.delete(&mut view, &ItemId::new(id)).await?;
            Ok(())
        }
    }
}
