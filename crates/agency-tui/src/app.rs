//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use agency_core::{Site, Toast};

use crate::action::{Action, ConfirmDelete};
use crate::component::Component;
use crate::data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const TOAST_TTL: Duration = Duration::from_secs(4);

pub struct App {
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    search_active: bool,
    search_query: String,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Toasts from the site's notifier; taken when the bridge starts.
    toasts: Option<mpsc::UnboundedReceiver<Toast>>,
    bridge_cancel: CancellationToken,
    /// Blocks all other input while open.
    pending_confirm: Option<ConfirmDelete>,
    notification: Option<(Toast, Instant)>,
    /// Shown in the status bar.
    backend: String,
}

impl App {
    pub fn new(site: &Site, toasts: mpsc::UnboundedReceiver<Toast>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens = create_screens(site).into_iter().collect();

        Self {
            active_screen: ScreenId::default(),
            screens,
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            action_tx,
            action_rx,
            toasts: Some(toasts),
            bridge_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
            backend: site.config().backend.to_string(),
        }
    }

    /// Mount every screen; each starts its initial fetch.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        if let Some(toasts) = self.toasts.take() {
            let tx = self.action_tx.clone();
            let cancel = self.bridge_cancel.clone();
            tokio::spawn(data_bridge::forward_toasts(toasts, tx, cancel));
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    debug!(w, h, "terminal resized");
                    self.action_tx.send(Action::Render)?;
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.bridge_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Global keys first, then the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.search_active {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::CloseSearch),
                KeyCode::Enter => Some(Action::SearchSubmit),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Some(Action::SearchInput(self.search_query.clone()))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Some(Action::SearchInput(self.search_query.clone()))
                }
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                return Ok(Some(Action::ToggleHelp));
            }
            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let n = u8::try_from(c).unwrap_or(b'0') - b'0';
                return Ok(ScreenId::from_number(n).map(Action::SwitchScreen));
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            (_, KeyCode::Esc) if !self.active_captures_escape() => {
                return Ok(self
                    .notification
                    .is_some()
                    .then_some(Action::DismissNotification));
            }
            _ => {}
        }

        match self.screens.get_mut(&self.active_screen) {
            Some(screen) => screen.handle_key_event(key),
            None => Ok(None),
        }
    }

    fn active_captures_escape(&self) -> bool {
        self.screens
            .get(&self.active_screen)
            .is_some_and(|screen| screen.captures_escape())
    }

    fn forward(&mut self, screen: ScreenId, action: &Action) -> Result<()> {
        if let Some(component) = self.screens.get_mut(&screen) {
            if let Some(follow_up) = component.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        if let Some(target) = action.target() {
            return self.forward(target, action);
        }

        match action {
            Action::Quit => self.running = false,

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() >= TOAST_TTL)
                {
                    self.notification = None;
                }
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::OpenSearch => {
                self.search_active = true;
                self.search_query.clear();
            }

            Action::SearchSubmit => self.search_active = false,

            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
                self.forward(self.active_screen, action)?;
            }

            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm.clone()),

            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.action_tx.send(Action::DeleteConfirmed {
                        screen: confirm.screen,
                        id: confirm.id,
                    })?;
                }
            }

            Action::ConfirmNo => self.pending_confirm = None,

            Action::Notify(toast) => self.notification = Some((toast.clone(), Instant::now())),

            Action::DismissNotification => self.notification = None,

            // Drawn by the main loop.
            Action::Render => {}

            other => self.forward(self.active_screen, other)?,
        }

        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }
        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        // Overlays, topmost last.
        if let Some((toast, _)) = &self.notification {
            Self::render_notification(frame, area, toast);
        }
        if let Some(confirm) = &self.pending_confirm {
            Self::render_confirm_dialog(frame, area, confirm);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let selected = ScreenId::ALL
            .iter()
            .position(|&s| s == self.active_screen)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(selected);

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if self.search_active {
            Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::ACCENT)),
                Span::styled(self.search_query.clone(), Style::default().fg(theme::CYAN)),
                Span::styled("█", Style::default().fg(theme::CYAN)),
                Span::styled("  Esc clear  Enter keep", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled(format!(" ● {}", self.backend), Style::default().fg(theme::GREEN)),
                Span::styled(
                    " │ ? help  / search  f filter  r refresh  q quit",
                    theme::key_hint(),
                ),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width.saturating_sub(4));
        let height = height.min(area.height.saturating_sub(2));
        let x = area.width.saturating_sub(width) / 2;
        let y = area.height.saturating_sub(height) / 2;
        Rect::new(area.x + x, area.y + y, width, height)
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_area = Self::centered(area, 60, 20);
        frame.render_widget(Clear, help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            Line::from(Span::styled(format!("  {title}"), Style::default().fg(theme::CYAN)))
        };
        let entry = |keys: &'static str, text: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<12}"), theme::key_hint_key()),
                Span::styled(text, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            section("Navigation"),
            entry("1-5 Tab", "Switch collection"),
            entry("j/k ↑/↓", "Move up / down"),
            entry("h/l ←/→", "Previous / next page"),
            entry("m", "Load more (portfolio)"),
            entry("Enter", "Open / close detail"),
            Line::from(""),
            section("List"),
            entry("f", "Next filter option"),
            entry("/", "Search"),
            entry("r", "Refresh"),
            Line::from(""),
            section("Admin"),
            entry("d", "Delete"),
            entry("s", "Change status"),
            Line::from(""),
            entry("q", "Quit"),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }

    fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let dialog_area = Self::centered(area, 56, 5);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::YELLOW))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {confirm}"),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Toast in the bottom-right corner, above the status bar.
    fn render_notification(frame: &mut Frame, area: Rect, toast: &Toast) {
        let msg_len = u16::try_from(toast.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (color, icon) = theme::toast(toast.level);
        frame.render_widget(Clear, toast_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(color)),
            Span::styled(toast.message.clone(), Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use agency_core::{ItemId, SiteConfig, TracingNotifier};

    use super::*;

    fn app() -> App {
        let config = SiteConfig::new(
            "http://127.0.0.1:9".parse().unwrap(),
            "https://studio.example".parse().unwrap(),
        );
        let site = Site::new(config, Arc::new(TracingNotifier)).unwrap();
        let (_tx, toasts) = mpsc::unbounded_channel();
        App::new(&site, toasts)
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn number_keys_switch_screens() {
        let mut app = app();
        let action = press(&mut app, KeyCode::Char('4')).unwrap();
        app.process_action(&action).unwrap();
        assert_eq!(app.active_screen, ScreenId::Contacts);

        assert!(press(&mut app, KeyCode::Char('9')).is_none());
    }

    #[test]
    fn confirmed_delete_is_routed_to_its_screen() {
        let mut app = app();
        let confirm = ConfirmDelete {
            screen: ScreenId::Services,
            id: ItemId::new("s1"),
            name: "Branding".into(),
        };
        app.process_action(&Action::ShowConfirm(confirm)).unwrap();

        // Other keys are swallowed while the dialog is open.
        assert!(press(&mut app, KeyCode::Char('q')).is_none());

        let yes = press(&mut app, KeyCode::Char('y')).unwrap();
        app.process_action(&yes).unwrap();
        assert!(app.pending_confirm.is_none());

        match app.action_rx.try_recv().unwrap() {
            Action::DeleteConfirmed { screen, id } => {
                assert_eq!(screen, ScreenId::Services);
                assert_eq!(id, ItemId::new("s1"));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let mut app = app();
        app.process_action(&Action::ShowConfirm(ConfirmDelete {
            screen: ScreenId::Blog,
            id: ItemId::new("b1"),
            name: "Post".into(),
        }))
        .unwrap();
        let no = press(&mut app, KeyCode::Esc).unwrap();
        app.process_action(&no).unwrap();
        assert!(app.pending_confirm.is_none());
        assert!(app.action_rx.try_recv().is_err());
    }

    #[test]
    fn search_mode_collects_typed_text() {
        let mut app = app();
        app.process_action(&Action::OpenSearch).unwrap();
        press(&mut app, KeyCode::Char('u'));
        let action = press(&mut app, KeyCode::Char('x')).unwrap();
        assert!(matches!(action, Action::SearchInput(ref q) if q == "ux"));

        // 'q' types into the search box instead of quitting.
        assert!(matches!(
            press(&mut app, KeyCode::Char('q')),
            Some(Action::SearchInput(_))
        ));
    }

    #[test]
    fn toasts_expire() {
        let mut app = app();
        app.process_action(&Action::Notify(Toast::success("Saved")))
            .unwrap();
        assert!(app.notification.is_some());

        app.notification = Some((
            Toast::success("Saved"),
            Instant::now().checked_sub(TOAST_TTL).unwrap(),
        ));
        app.process_action(&Action::Tick).unwrap();
        assert!(app.notification.is_none());
    }
}
