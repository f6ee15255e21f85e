//! Contact messages: read/unread filter, `s` toggles the read state.

use ratatui::layout::Constraint;
use ratatui::text::{Line, Span};
use ratatui::widgets::Cell;

use agency_core::{
    Command, CommandResult, ContactMessage, CoreError, ItemId, ListView,
};

use super::{Listing, date, field};
use crate::action::Loaded;
use crate::screen::ScreenId;
use crate::theme;

impl Listing for ContactMessage {
    const SCREEN: ScreenId = ScreenId::Contacts;

    fn loaded(result: Result<Vec<Self>, CoreError>) -> Loaded {
        Loaded::Contacts(result)
    }

    fn unpack(data: &Loaded) -> Option<&Result<Vec<Self>, CoreError>> {
        match data {
            Loaded::Contacts(result) => Some(result),
            _ => None,
        }
    }

    fn columns() -> Vec<(&'static str, Constraint)> {
        vec![
            ("", Constraint::Length(7)),
            ("From", Constraint::Fill(2)),
            ("Email", Constraint::Fill(2)),
            ("Subject", Constraint::Fill(3)),
            ("Received", Constraint::Length(11)),
        ]
    }

    fn cells(&self) -> Vec<Cell<'static>> {
        vec![
            Cell::from(Span::styled(
                self.status.to_string(),
                theme::read_status(self.status),
            )),
            Cell::from(self.name.clone()),
            Cell::from(self.email.clone()),
            Cell::from(self.subject.clone()),
            Cell::from(date(self.created_at)),
        ]
    }

    fn name(&self) -> &str {
        &self.subject
    }

    fn detail(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            field("From", self.name.clone()),
            field("Email", self.email.clone()),
        ];
        if let Some(phone) = &self.phone {
            lines.push(field("Phone", phone.clone()));
        }
        lines.push(field("Subject", self.subject.clone()));
        lines.push(Line::from(vec![
            Span::styled(format!("{:<11}", "Status"), theme::key_hint()),
            Span::styled(self.status.to_string(), theme::read_status(self.status)),
        ]));
        lines.push(Line::from(""));
        lines.extend(self.message.lines().map(|l| Line::from(l.to_owned())));
        lines
    }

    fn status_command(&self) -> Option<Command> {
        Some(Command::SetContactStatus {
            id: self.id.clone(),
            status: self.status.toggled(),
        })
    }

    fn finish_status(
        view: &mut ListView<Self>,
        id: &ItemId,
        result: Result<CommandResult, CoreError>,
    ) {
        let status = result.and_then(|outcome| match outcome {
            CommandResult::ContactStatus { status, .. } => Ok(status),
            other => Err(CoreError::Internal(format!("unexpected outcome: {other:?}"))),
        });
        // Errors were toasted when the command failed.
        let _ = view.finish_status(id, status);
    }
}
