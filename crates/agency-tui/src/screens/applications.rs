//! Job applications: stage filter, `s` advances the review stage.

use ratatui::layout::Constraint;
use ratatui::text::{Line, Span};
use ratatui::widgets::Cell;
use strum::IntoEnumIterator;

use agency_core::{
    ApplicationStatus, Command, CommandResult, CoreError, ItemId, JobApplication, ListView,
};

use super::{Listing, date, field};
use crate::action::Loaded;
use crate::screen::ScreenId;
use crate::theme;

/// The stage after `current`, wrapping from the last back to the first.
pub fn next_stage(current: ApplicationStatus) -> ApplicationStatus {
    ApplicationStatus::iter()
        .cycle()
        .skip_while(|s| *s != current)
        .nth(1)
        .unwrap_or_default()
}

impl Listing for JobApplication {
    const SCREEN: ScreenId = ScreenId::Applications;

    fn loaded(result: Result<Vec<Self>, CoreError>) -> Loaded {
        Loaded::Applications(result)
    }

    fn unpack(data: &Loaded) -> Option<&Result<Vec<Self>, CoreError>> {
        match data {
            Loaded::Applications(result) => Some(result),
            _ => None,
        }
    }

    fn columns() -> Vec<(&'static str, Constraint)> {
        vec![
            ("Stage", Constraint::Length(12)),
            ("Name", Constraint::Fill(2)),
            ("Position", Constraint::Fill(2)),
            ("Email", Constraint::Fill(2)),
            ("Applied", Constraint::Length(11)),
        ]
    }

    fn cells(&self) -> Vec<Cell<'static>> {
        vec![
            Cell::from(Span::styled(self.status.to_string(), theme::stage(self.status))),
            Cell::from(self.name.clone()),
            Cell::from(self.position.clone()),
            Cell::from(self.email.clone()),
            Cell::from(date(self.created_at)),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn detail(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            field("Name", self.name.clone()),
            field("Email", self.email.clone()),
        ];
        if let Some(phone) = &self.phone {
            lines.push(field("Phone", phone.clone()));
        }
        lines.push(field("Position", self.position.clone()));
        lines.push(Line::from(vec![
            Span::styled(format!("{:<11}", "Stage"), theme::key_hint()),
            Span::styled(self.status.to_string(), theme::stage(self.status)),
            Span::styled(
                format!("  (s → {})", next_stage(self.status)),
                theme::key_hint(),
            ),
        ]));
        if let Some(resume) = &self.resume {
            lines.push(field("Resume", resume.clone()));
        }
        if let Some(letter) = &self.cover_letter {
            lines.push(Line::from(""));
            lines.extend(letter.lines().map(|l| Line::from(l.to_owned())));
        }
        lines
    }

    fn status_command(&self) -> Option<Command> {
        Some(Command::SetApplicationStatus {
            id: self.id.clone(),
            status: next_stage(self.status),
        })
    }

    fn finish_status(
        view: &mut ListView<Self>,
        id: &ItemId,
        result: Result<CommandResult, CoreError>,
    ) {
        let status = result.and_then(|outcome| match outcome {
            CommandResult::ApplicationStatus { status, .. } => Ok(status),
            other => Err(CoreError::Internal(format!("unexpected outcome: {other:?}"))),
        });
        let _ = view.finish_status(id, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_and_wrap() {
        assert_eq!(next_stage(ApplicationStatus::Pending), ApplicationStatus::Reviewed);
        assert_eq!(next_stage(ApplicationStatus::Rejected), ApplicationStatus::Hired);
        assert_eq!(next_stage(ApplicationStatus::Hired), ApplicationStatus::Pending);
    }
}
