//! Generic list screen: filter bar, paged or reveal table, detail panel.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, TableState, Wrap};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use agency_core::{
    CollectionItem, Command, FetchTicket, ListView, MemoryNavigator, Navigator, PageState,
    RemoteStatus, Site, Toast, UrlSync,
};

use crate::action::{Action, ConfirmDelete, MutationKind};
use crate::component::Component;
use crate::data_bridge;
use crate::theme;

use super::Listing;

pub struct ListScreen<T: Listing> {
    site: Site,
    view: ListView<T>,
    action_tx: Option<UnboundedSender<Action>>,
    url: Option<UrlSync<MemoryNavigator>>,
    /// Row cursor within the visible window.
    cursor: usize,
    focused: bool,
}

impl<T: Listing> ListScreen<T> {
    pub fn new(site: Site, view: ListView<T>) -> Self {
        Self {
            site,
            view,
            action_tx: None,
            url: None,
            cursor: 0,
            focused: false,
        }
    }

    /// Mirror filter and page into an address. The view is seeded from the
    /// navigator's current address.
    pub fn with_url_sync(mut self, sync: UrlSync<MemoryNavigator>) -> Self {
        let query = sync.query();
        let pager = match *self.view.pager() {
            PageState::Fixed { size, .. } => query.page_state(size),
            reveal @ PageState::Reveal { .. } => reveal,
        };
        self.view = self.view.with_state(query.filter.clone(), pager);
        self.url = Some(sync);
        self
    }

    #[cfg(test)]
    pub(crate) fn view(&self) -> &ListView<T> {
        &self.view
    }

    pub fn address(&self) -> Option<String> {
        self.url.as_ref().map(|sync| sync.navigator().current())
    }

    // ── Fetching ─────────────────────────────────────────────────────

    fn spawn_fetch(&self, ticket: FetchTicket) {
        if let Some(tx) = &self.action_tx {
            data_bridge::spawn_fetch::<T>(self.site.clone(), ticket, tx.clone());
        }
    }

    fn refresh(&mut self) {
        match self.view.begin_fetch() {
            Some(ticket) => self.spawn_fetch(ticket),
            None => debug!(collection = T::COLLECTION, "refresh already running"),
        }
    }

    // ── Cursor / paging ──────────────────────────────────────────────

    fn visible_len(&self) -> usize {
        self.view.visible().len()
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// After filter, search or page changes.
    fn after_state_change(&mut self, reset_cursor: bool) {
        if reset_cursor {
            self.cursor = 0;
        }
        self.clamp_cursor();
        if let Some(sync) = &mut self.url {
            sync.sync(self.view.filter(), self.view.pager());
        }
    }

    fn current(&self) -> Option<&T> {
        self.view.visible().get(self.cursor).copied()
    }

    /// The item the mutation keys act on: the open detail, else the cursor.
    fn target(&self) -> Option<&T> {
        self.view.selected().or_else(|| self.current())
    }

    // ── Mutations ────────────────────────────────────────────────────

    fn request_delete(&self) -> Option<Action> {
        let item = self.target()?;
        if self.view.is_busy(item.id()) {
            return None;
        }
        Some(Action::ShowConfirm(ConfirmDelete {
            screen: T::SCREEN,
            id: item.id().clone(),
            name: item.name().to_owned(),
        }))
    }

    fn start_mutation(&mut self, kind: MutationKind, command: Command) {
        let Some(id) = command.target().cloned() else {
            return;
        };
        if let Err(e) = self.view.begin_mutation(&id) {
            self.site.notify(Toast::error(e.user_message()));
            return;
        }
        match &self.action_tx {
            Some(tx) => data_bridge::spawn_mutation(
                self.site.clone(),
                T::SCREEN,
                id,
                kind,
                command,
                tx.clone(),
            ),
            None => debug!(%id, "no action channel; mutation left pending"),
        }
    }

    fn change_status(&mut self) {
        let Some(command) = self.target().and_then(T::status_command) else {
            return;
        };
        self.start_mutation(MutationKind::Status, command);
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let current = self.view.filter().display::<T>().to_owned();
        let mut spans = vec![Span::styled(" f ", theme::key_hint_key())];
        for option in self.view.filter_options() {
            let active = option == current;
            spans.push(Span::styled(format!(" {option} "), theme::chip(active)));
            spans.push(Span::raw(" "));
        }
        if !self.view.search().is_empty() {
            spans.push(Span::styled(
                format!("  / {}", self.view.search()),
                Style::default().fg(theme::CYAN),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        match self.view.status() {
            RemoteStatus::Loading => {
                let text = Paragraph::new(Line::from(Span::styled(
                    format!("Loading {}...", T::COLLECTION),
                    Style::default().fg(theme::YELLOW),
                )))
                .alignment(Alignment::Center);
                frame.render_widget(text, centered_line(area));
            }
            RemoteStatus::Error(message) => {
                let text = Paragraph::new(vec![
                    Line::from(Span::styled(message.clone(), Style::default().fg(theme::RED))),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("r ", theme::key_hint_key()),
                        Span::styled("try again", theme::key_hint()),
                    ]),
                ])
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
                frame.render_widget(text, area);
            }
            RemoteStatus::Ready => self.render_table(frame, area),
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let visible = self.view.visible();
        if visible.is_empty() {
            let text = Paragraph::new(Span::styled("No items.", theme::key_hint()))
                .alignment(Alignment::Center);
            frame.render_widget(text, centered_line(area));
            return;
        }

        let columns = T::columns();
        let header = Row::new(columns.iter().map(|(name, _)| *name)).style(theme::table_header());
        let rows: Vec<Row> = visible
            .iter()
            .map(|item| {
                let style = if self.view.is_busy(item.id()) {
                    theme::table_busy()
                } else {
                    theme::table_row()
                };
                Row::new(item.cells()).style(style)
            })
            .collect();

        let table = Table::new(rows, columns.iter().map(|(_, width)| *width))
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = TableState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, item: &T) {
        let block = Block::default()
            .title(format!(" {} ", T::NOUN))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = item.detail();
        if self.view.is_busy(item.id()) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Working...", theme::table_busy())));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn footer(&self) -> Line<'static> {
        let matching = self.view.filtered().len();
        let mut spans = Vec::new();
        match self.view.pager() {
            PageState::Fixed { page, .. } => {
                let total = self.view.total_pages().unwrap_or(0).max(1);
                spans.push(Span::styled(
                    format!(" Page {page} of {total} · {matching} matching"),
                    theme::table_row(),
                ));
            }
            PageState::Reveal { .. } => {
                spans.push(Span::styled(
                    format!(" Showing {} of {matching}", self.visible_len()),
                    theme::table_row(),
                ));
                if self.view.has_more() {
                    spans.push(Span::styled("  m ", theme::key_hint_key()));
                    spans.push(Span::styled("load more", theme::key_hint()));
                }
            }
        }
        if let Some(address) = self.address() {
            spans.push(Span::styled(
                format!("  {address}"),
                Style::default().fg(theme::CORAL),
            ));
        }
        Line::from(spans)
    }
}

fn centered_line(area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);
    middle
}

impl<T: Listing> Component for ListScreen<T> {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        let ticket = self.view.restart_fetch();
        self.spawn_fetch(ticket);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.view.selected().is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    self.view.clear_selection();
                    return Ok(None);
                }
                KeyCode::Char('d') => return Ok(self.request_delete()),
                KeyCode::Char('s') => {
                    self.change_status();
                    return Ok(None);
                }
                _ => return Ok(None),
            }
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
                if self.view.next_page() {
                    self.after_state_change(true);
                }
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => {
                if self.view.prev_page() {
                    self.after_state_change(true);
                }
            }
            KeyCode::Char('m') => {
                if self.view.load_more() {
                    self.after_state_change(false);
                }
            }
            KeyCode::Char('f') => {
                if self.view.cycle_filter() {
                    self.after_state_change(true);
                }
            }
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Enter => {
                if let Some(id) = self.current().map(|item| item.id().clone()) {
                    self.view.select(&id);
                }
            }
            KeyCode::Char('d') => return Ok(self.request_delete()),
            KeyCode::Char('s') => self.change_status(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Fetched { ticket, data } => {
                if let Some(result) = T::unpack(data) {
                    self.view.finish_fetch(*ticket, result.clone());
                    self.after_state_change(false);
                }
            }
            Action::Mutated {
                id, kind, result, ..
            } => {
                match kind {
                    MutationKind::Delete => {
                        // Failures were already toasted by the site.
                        let _ = self
                            .view
                            .finish_delete(id, result.clone().map(|_| ()));
                    }
                    MutationKind::Status => T::finish_status(&mut self.view, id, result.clone()),
                }
                self.after_state_change(false);
            }
            Action::DeleteConfirmed { id, .. } => {
                self.start_mutation(MutationKind::Delete, T::delete_command(id.clone()));
            }
            Action::SearchInput(query) => {
                if self.view.set_search(query.clone()) {
                    self.after_state_change(true);
                }
            }
            Action::CloseSearch => {
                if self.view.set_search("") {
                    self.after_state_change(true);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ({}) ", T::SCREEN, self.view.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [filter_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_filter_bar(frame, filter_area);

        match self.view.selected() {
            Some(item) => {
                let [list_area, detail_area] =
                    Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                        .areas(body_area);
                self.render_body(frame, list_area);
                self.render_detail(frame, detail_area, item);
            }
            None => self.render_body(frame, body_area),
        }

        frame.render_widget(Paragraph::new(self.footer()), footer_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_escape(&self) -> bool {
        self.view.selected().is_some()
    }
}
