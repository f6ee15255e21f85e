//! Blog posts: category filter, fixed pages, address sync.

use ratatui::layout::Constraint;
use ratatui::text::Line;
use ratatui::widgets::Cell;

use agency_core::{BlogPost, CoreError};

use super::{Listing, date, field};
use crate::action::Loaded;
use crate::screen::ScreenId;

impl Listing for BlogPost {
    const SCREEN: ScreenId = ScreenId::Blog;

    fn loaded(result: Result<Vec<Self>, CoreError>) -> Loaded {
        Loaded::Blog(result)
    }

    fn unpack(data: &Loaded) -> Option<&Result<Vec<Self>, CoreError>> {
        match data {
            Loaded::Blog(result) => Some(result),
            _ => None,
        }
    }

    fn columns() -> Vec<(&'static str, Constraint)> {
        vec![
            ("Title", Constraint::Fill(3)),
            ("Category", Constraint::Fill(2)),
            ("Author", Constraint::Fill(1)),
            ("Read", Constraint::Length(7)),
            ("Published", Constraint::Length(11)),
        ]
    }

    fn cells(&self) -> Vec<Cell<'static>> {
        vec![
            Cell::from(self.title.clone()),
            Cell::from(self.category.clone()),
            Cell::from(self.author.clone()),
            Cell::from(format!("{} min", self.read_time)),
            Cell::from(date(self.published_at)),
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
            field("Author", self.author.clone()),
            field("Read time", format!("{} min", self.read_time)),
        ];
        if let Some(published) = self.published_at {
            lines.push(field("Published", published.format("%Y-%m-%d %H:%M").to_string()));
        }
        if !self.tags.is_empty() {
            lines.push(field("Tags", self.tags.join(", ")));
        }
        if let Some(image) = &self.image {
            lines.push(field("Image", image.clone()));
        }
        lines.push(Line::from(""));
        lines.extend(self.excerpt.lines().map(|l| Line::from(l.to_owned())));
        lines
    }
}
