//! Portfolio: derived category filter, incremental reveal.

use ratatui::layout::Constraint;
use ratatui::text::Line;
use ratatui::widgets::Cell;

use agency_core::{CoreError, PortfolioItem};

use super::{Listing, field};
use crate::action::Loaded;
use crate::screen::ScreenId;

impl Listing for PortfolioItem {
    const SCREEN: ScreenId = ScreenId::Portfolio;

    fn loaded(result: Result<Vec<Self>, CoreError>) -> Loaded {
        Loaded::Portfolio(result)
    }

    fn unpack(data: &Loaded) -> Option<&Result<Vec<Self>, CoreError>> {
        match data {
            Loaded::Portfolio(result) => Some(result),
            _ => None,
        }
    }

    fn columns() -> Vec<(&'static str, Constraint)> {
        vec![
            ("Title", Constraint::Fill(3)),
            ("Category", Constraint::Fill(2)),
            ("Client", Constraint::Fill(2)),
            ("Technologies", Constraint::Fill(3)),
        ]
    }

    fn cells(&self) -> Vec<Cell<'static>> {
        vec![
            Cell::from(self.title.clone()),
            Cell::from(self.category.clone()),
            Cell::from(self.client.clone().unwrap_or_default()),
            Cell::from(self.technologies.join(", ")),
        ]
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            field("Title", self.title.clone()),
            field("Category", self.category.clone()),
        ];
        if let Some(client) = &self.client {
            lines.push(field("Client", client.clone()));
        }
        if !self.technologies.is_empty() {
            lines.push(field("Stack", self.technologies.join(", ")));
        }
        if let Some(link) = &self.link {
            lines.push(field("Link", link.clone()));
        }
        lines.push(Line::from(""));
        lines.extend(self.description.lines().map(|l| Line::from(l.to_owned())));
        lines
    }
}
