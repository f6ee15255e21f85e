//! Screen implementations. Every collection gets a [`ListScreen`]; the
//! per-collection modules only describe columns, the detail panel and
//! the status control.

pub mod applications;
pub mod blog;
pub mod contacts;
pub mod list;
pub mod portfolio;
pub mod services;

use ratatui::layout::Constraint;
use ratatui::text::{Line, Span};
use ratatui::widgets::Cell;

use agency_core::{
    Command, CommandResult, CoreError, ItemId, ListQuery, ListView, MemoryNavigator, Resource,
    Site, UrlSync,
};

use crate::action::Loaded;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

pub use list::ListScreen;

/// A collection the console can list.
pub trait Listing: Resource {
    const SCREEN: ScreenId;

    fn loaded(result: Result<Vec<Self>, CoreError>) -> Loaded;

    /// The result for this collection, if `data` carries it.
    fn unpack(data: &Loaded) -> Option<&Result<Vec<Self>, CoreError>>;

    fn columns() -> Vec<(&'static str, Constraint)>;

    fn cells(&self) -> Vec<Cell<'static>>;

    /// Short name for prompts.
    fn name(&self) -> &str;

    fn detail(&self) -> Vec<Line<'static>>;

    /// The `s` key: the status change to request, if the collection has one.
    fn status_command(&self) -> Option<Command> {
        None
    }

    /// Reconcile a finished status change into the view.
    fn finish_status(
        _view: &mut ListView<Self>,
        _id: &ItemId,
        _result: Result<CommandResult, CoreError>,
    ) {
    }
}

/// Build every screen in tab order.
pub fn create_screens(site: &Site) -> Vec<(ScreenId, Box<dyn Component>)> {
    let blog_sync = UrlSync::mount::<agency_core::BlogPost>(MemoryNavigator::new("/blog"));
    let blog_view = site.blog_view(&ListQuery::default());
    vec![
        (
            ScreenId::Blog,
            Box::new(ListScreen::new(site.clone(), blog_view).with_url_sync(blog_sync)),
        ),
        (
            ScreenId::Portfolio,
            Box::new(ListScreen::new(site.clone(), site.portfolio_view())),
        ),
        (
            ScreenId::Services,
            Box::new(ListScreen::new(
                site.clone(),
                site.admin_view::<agency_core::Service>(),
            )),
        ),
        (
            ScreenId::Contacts,
            Box::new(ListScreen::new(
                site.clone(),
                site.admin_view::<agency_core::ContactMessage>(),
            )),
        ),
        (
            ScreenId::Applications,
            Box::new(ListScreen::new(
                site.clone(),
                site.admin_view::<agency_core::JobApplication>(),
            )),
        ),
    ]
}

/// `Label: value` detail line.
pub(crate) fn field(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<11}"), theme::key_hint()),
        Span::styled(value.into(), theme::table_row()),
    ])
}

/// Date column text, blank when unknown.
pub(crate) fn date(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
