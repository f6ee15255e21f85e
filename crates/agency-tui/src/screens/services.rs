//! Services offered, grouped by category.

use ratatui::layout::Constraint;
use ratatui::text::Line;
use ratatui::widgets::Cell;

use agency_core::{CoreError, Service};

use super::{Listing, field};
use crate::action::Loaded;
use crate::screen::ScreenId;

impl Listing for Service {
    const SCREEN: ScreenId = ScreenId::Services;

    fn loaded(result: Result<Vec<Self>, CoreError>) -> Loaded {
        Loaded::Services(result)
    }

    fn unpack(data: &Loaded) -> Option<&Result<Vec<Self>, CoreError>> {
        match data {
            Loaded::Services(result) => Some(result),
            _ => None,
        }
    }

    fn columns() -> Vec<(&'static str, Constraint)> {
        vec![
            ("Title", Constraint::Fill(2)),
            ("Category", Constraint::Fill(1)),
            ("Features", Constraint::Fill(3)),
        ]
    }

    fn cells(&self) -> Vec<Cell<'static>> {
        vec![
            Cell::from(self.title.clone()),
            Cell::from(self.category.clone()),
            Cell::from(self.features.join(", ")),
        ]
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            field("Title", self.title.clone()),
            field("Slug", self.slug.clone()),
            field("Category", self.category.clone()),
        ];
        for feature in &self.features {
            lines.push(Line::from(format!("  • {feature}")));
        }
        lines.push(Line::from(""));
        lines.extend(self.description.lines().map(|l| Line::from(l.to_owned())));
        lines
    }
}
