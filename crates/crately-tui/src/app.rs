//! Application core — event loop, action dispatch, overlays.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tui_popup::Popup;

use crately_core::{Command, ConnectionState, Controller};

use crate::action::{Action, Notification, NotificationLevel, PendingDelete};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::items::ItemsScreen;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    /// Whether the app should keep running.
    running: bool,
    /// The inventory table screen.
    screen: ItemsScreen,
    /// Connection status indicator.
    connection: ConnectionState,
    /// Help overlay visibility.
    help_visible: bool,
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Controller for live data and writes.
    controller: Controller,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Pending delete confirmation (blocks other input while active).
    pending_confirm: Option<PendingDelete>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            screen: ItemsScreen::new(),
            connection: ConnectionState::Disconnected,
            help_visible: false,
            action_tx,
            action_rx,
            controller,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
        }
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.screen.init(self.action_tx.clone())?;

        let controller = self.controller.clone();
        let cancel = self.data_cancel.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            crate::data_bridge::spawn_data_bridge(controller, tx, cancel).await;
        });

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
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Overlays take priority, then the
    /// screen when it holds an open input, then global keys.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // An open search bar or form gets every key
        if self.screen.capturing_input() {
            return self.screen.handle_key_event(key);
        }

        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::Quit)),
            KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
            _ => self.screen.handle_key_event(key),
        }
    }

    /// Process a single action — update app state and propagate to the screen.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(_, _) => {
                // Redraw immediately instead of waiting for the next pulse.
                self.action_tx.send(Action::Render)?;
            }

            Action::Render => {}

            Action::Tick => {
                // Auto-dismiss notifications after 3 seconds
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > Duration::from_secs(3) {
                        self.notification = None;
                    }
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::ConnectionChanged(state) => {
                self.connection = state.clone();
            }

            Action::ItemsUpdated(_) | Action::FormSaved => {
                if let Some(follow_up) = self.screen.update(action)? {
                    self.action_tx.send(follow_up)?;
                }
            }

            Action::CreateItem(request) => {
                self.execute_command(
                    Command::CreateItem(request.clone()),
                    format!("Created {}", request.name),
                    true,
                );
            }

            Action::UpdateItem { id, update } => {
                self.execute_command(
                    Command::UpdateItem {
                        id: *id,
                        update: update.clone(),
                    },
                    format!("Updated {}", update.name),
                    true,
                );
            }

            Action::RequestDelete(pending) => {
                self.pending_confirm = Some(pending.clone());
            }

            Action::ConfirmYes => {
                if let Some(pending) = self.pending_confirm.take() {
                    self.execute_command(
                        Command::DeleteItem { id: pending.id },
                        format!("Deleted {}", pending.name),
                        false,
                    );
                }
            }

            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            Action::Refresh => {
                let controller = self.controller.clone();
                tokio::spawn(async move {
                    controller.request_refresh().await;
                });
            }

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }
        }
        Ok(())
    }

    /// Execute a write on a background task. Success raises a toast and,
    /// for create/update, tells the form to clear and close; failure
    /// raises an error toast and leaves the draft as typed.
    fn execute_command(&self, cmd: Command, success_msg: String, saves_form: bool) {
        let controller = self.controller.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match controller.execute(cmd).await {
                Ok(_) => {
                    if saves_form {
                        let _ = tx.send(Action::FormSaved);
                    }
                    let _ = tx.send(Action::Notify(Notification::success(success_msg)));
                }
                Err(e) => {
                    warn!(error = %e, "command execution failed");
                    let _ = tx.send(Action::Notify(Notification::error(format!("{e}"))));
                }
            }
        });
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [status bar]
        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        self.screen.render(frame, layout[0]);
        self.render_status_bar(frame, layout[1]);

        // Overlays on top (order matters: last = topmost)
        if let Some((ref notification, _)) = self.notification {
            self.render_notification(frame, area, notification);
        }

        if let Some(ref pending) = self.pending_confirm {
            self.render_confirm_dialog(frame, area, pending);
        }

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Bottom status bar with connection status and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let connection_indicator = match self.connection {
            ConnectionState::Connected => {
                Span::styled("● connected", Style::default().fg(theme::MOSS_GREEN))
            }
            ConnectionState::Connecting => {
                Span::styled("◐ connecting", Style::default().fg(theme::AMBER))
            }
            ConnectionState::Disconnected => {
                Span::styled("○ disconnected", Style::default().fg(theme::GRID_GRAY))
            }
            ConnectionState::Failed => {
                Span::styled("○ connection failed", Style::default().fg(theme::BRICK_RED))
            }
        };

        let hints = Span::styled(" │ ? help  q quit", theme::key_hint());
        let line = Line::from(vec![Span::raw(" "), connection_indicator, hints]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Centered help overlay.
    #[allow(clippy::unused_self)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 20u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let hint = |keys: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
                Span::styled(desc, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Browse",
                Style::default().fg(theme::STEEL_BLUE),
            )),
            Line::from(Span::styled("  ──────", theme::key_hint())),
            hint("j/k ↑/↓", "Move selection"),
            hint("g/G", "Top / bottom of page"),
            hint("n/p ←/→", "Next / previous page"),
            hint("/", "Search name or category"),
            hint("1-5", "Sort column (repeat flips order)"),
            hint("r", "Refresh from the service"),
            Line::from(""),
            Line::from(Span::styled(
                "  Editing",
                Style::default().fg(theme::STEEL_BLUE),
            )),
            Line::from(Span::styled("  ───────", theme::key_hint())),
            hint("a", "Add item"),
            hint("e Enter", "Edit selected item"),
            hint("d", "Delete selected item"),
            Line::from(""),
            Line::from(Span::styled(
                "                      Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Centered delete confirmation dialog.
    #[allow(clippy::unused_self)]
    fn render_confirm_dialog(&self, frame: &mut Frame, area: Rect, pending: &PendingDelete) {
        let body = Text::from(vec![
            Line::from(format!(" {pending} ")),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", theme::key_hint_key()),
                Span::styled("delete    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ]);

        let popup = Popup::new(body)
            .title(" Confirm ")
            .style(Style::default().fg(theme::FOG_WHITE).bg(theme::BG_DARK))
            .border_style(Style::default().fg(theme::BRICK_RED));
        frame.render_widget(&popup, area);
    }

    /// Notification toast in the bottom-right corner.
    #[allow(clippy::unused_self, clippy::cast_possible_truncation, clippy::as_conversions)]
    fn render_notification(&self, frame: &mut Frame, area: Rect, notification: &Notification) {
        let msg_len = notification.message.len() as u16;
        let width = (msg_len + 6).clamp(20, 60);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notification.level {
            NotificationLevel::Success => (theme::MOSS_GREEN, "✓"),
            NotificationLevel::Error => (theme::BRICK_RED, "✗"),
            NotificationLevel::Info => (theme::STEEL_BLUE, "·"),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notification.message, Style::default().fg(theme::FOG_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}
