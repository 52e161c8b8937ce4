//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin client of the core:
//! - Event loop (keyboard, mouse, resize)
//! - `MascotClient` for the mascot driver, mounted while the dashboard shows
//! - `SessionManager` for sign-in state
//! - `PipelineTracker` to turn mock pipeline outcomes into mascot signals
//!
//! # Frame Loop
//!
//! ```text
//! select! {
//!   terminal event => keys / mouse  ──▶ session, studio, mascot inputs
//!   frame tick     => (nothing)
//! }
//! poll mock generation ──▶ PipelineTracker ──▶ mascot signals
//! snapshot mascot view ──▶ render
//! ```

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Tabs};
use ratatui::{Frame, Terminal};

use swifter_core::{
    DashboardConfig, DriverError, MascotView, PipelineTracker, Platform, PostResult, PostStatus,
    SessionError, SessionManager, SessionStore, SignalSet, StaticCredentialVerifier,
};

use crate::dashboard::{mock_analytics, LoginField, LoginForm, Screen, StudioState, Tab};
use crate::mascot_client::MascotClient;
use crate::theme::{DIM_GRAY, ERROR_RED, SUCCESS_GREEN, SWIFTER_LAVENDER, SWIFTER_VIOLET};
use crate::widgets::MascotWidget;

/// Redraw interval
const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Width of the mascot panel on the dashboard
const MASCOT_PANEL_WIDTH: u16 = 36;

/// Platform toggle keys, in [`Platform::ALL`] order
const PLATFORM_KEYS: [char; 4] = ['r', 'd', 'm', 't'];

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Which screen is showing
    screen: Screen,

    // === Session ===
    config: DashboardConfig,
    session: SessionManager<Box<dyn SessionStore>>,
    verifier: StaticCredentialVerifier,
    login: LoginForm,

    // === Dashboard ===
    tab: Tab,
    studio: StudioState,
    tracker: PipelineTracker,
    rng: StdRng,

    // === Mascot ===
    /// Present only while the dashboard is mounted
    mascot: Option<MascotClient>,
    /// Clickable mascot body from the last frame
    mascot_body: Rect,
}

impl App {
    /// Create a new App from resolved configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn new(config: &DashboardConfig) -> anyhow::Result<Self> {
        let session = SessionManager::restore(config.session_store()).await?;
        Ok(Self::with_session(config.clone(), session))
    }

    /// Create an App around an already restored session
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn with_session(
        config: DashboardConfig,
        session: SessionManager<Box<dyn SessionStore>>,
    ) -> Self {
        let (screen, mascot) = if session.is_authenticated() {
            (
                Screen::Dashboard,
                Some(MascotClient::spawn(config.mascot_controller())),
            )
        } else {
            (Screen::Login, None)
        };

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::info!(
            variant = ?config.variant,
            source = %config.source(),
            restored = session.is_authenticated(),
            "Starting dashboard"
        );

        Self {
            running: true,
            screen,
            verifier: config.verifier(),
            config,
            session,
            login: LoginForm::default(),
            tab: Tab::default(),
            studio: StudioState::default(),
            tracker: PipelineTracker::new(),
            rng,
            mascot,
            mascot_body: Rect::default(),
        }
    }

    /// Main event loop
    ///
    /// # Errors
    ///
    /// Returns an error if drawing to the terminal fails.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        self.draw(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event).await,
                    Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                    None => self.running = false,
                },

                () = tokio::time::sleep(FRAME_DURATION) => {}
            }

            self.poll_generation().await;
            self.draw(terminal)?;
        }

        Ok(())
    }

    /// Stop the mascot driver
    pub async fn shutdown(mut self) {
        self.unmount_mascot().await;
    }

    /// Signed-in user, if any
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.session.session().username.as_deref()
    }

    // ========================================================================
    // Input
    // ========================================================================

    async fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            Event::Mouse(mouse) if self.screen == Screen::Dashboard => {
                self.handle_mouse(mouse).await;
            }
            _ => {}
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let quit = key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
        if quit {
            self.running = false;
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key).await,
            Screen::Dashboard => self.handle_dashboard_key(key).await,
        }
    }

    async fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus();
            }
            KeyCode::Backspace => self.login.backspace(),
            KeyCode::Enter => self.sign_in().await,
            KeyCode::Char(c) => self.login.push(c),
            _ => {}
        }
    }

    async fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::Char('1') => self.tab = Tab::Studio,
            KeyCode::Char('2') => self.tab = Tab::Analytics,
            KeyCode::Char('o') => self.sign_out().await,

            KeyCode::Char('g') => self.begin_generation().await,
            KeyCode::Char('s') => self.force_outcome(PostStatus::Posted).await,
            KeyCode::Char('f') => self.force_outcome(PostStatus::Failed).await,
            KeyCode::Char('c') => self.studio.cycle_content_type(),
            KeyCode::Char(c) => {
                if let Some(index) = PLATFORM_KEYS.iter().position(|&k| k == c) {
                    self.studio.toggle_platform(index);
                }
            }
            _ => {}
        }
    }

    async fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(mascot) = self.mascot.as_mut() else {
            return;
        };
        let inside = self
            .mascot_body
            .contains(Position::new(mouse.column, mouse.row));

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                log_dropped(mascot.pointer_moved(inside));
            }
            MouseEventKind::Down(MouseButton::Left) if inside => {
                // Terminals without motion reporting still get a hover first
                log_dropped(mascot.pointer_moved(true));
                log_dropped(mascot.click().await);
            }
            _ => {}
        }
    }

    // ========================================================================
    // Session
    // ========================================================================

    async fn sign_in(&mut self) {
        let credentials = self.login.credentials();
        match self.session.sign_in(&self.verifier, &credentials).await {
            Ok(()) => {
                self.login.reset();
                self.mount_mascot().await;
                self.screen = Screen::Dashboard;
            }
            Err(SessionError::Auth(e)) => self.login.fail(e.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Sign-in could not be saved");
                self.login.fail(format!("Could not save session: {e}"));
            }
        }
    }

    async fn sign_out(&mut self) {
        if let Err(e) = self.session.sign_out().await {
            tracing::warn!(error = %e, "Stored session could not be removed");
        }
        self.unmount_mascot().await;
        self.screen = Screen::Login;
        self.tab = Tab::default();
    }

    // ========================================================================
    // Mascot Lifecycle
    // ========================================================================

    /// Start a fresh mascot, dropping any previous one with its timers
    async fn mount_mascot(&mut self) {
        self.unmount_mascot().await;
        self.mascot = Some(MascotClient::spawn(self.config.mascot_controller()));
    }

    async fn unmount_mascot(&mut self) {
        if let Some(mascot) = self.mascot.take() {
            mascot.shutdown().await;
        }
    }

    // ========================================================================
    // Mock Pipeline
    // ========================================================================

    async fn begin_generation(&mut self) {
        if !self.studio.begin(Instant::now()) {
            return;
        }
        tracing::debug!(content_type = ?self.studio.content_type(), "Mock generation started");
        let signals = self.tracker.begin_generation();
        self.send_signals(signals).await;
    }

    async fn poll_generation(&mut self) {
        let signals = match self.studio.poll(Instant::now(), &mut self.rng) {
            Some(results) => self.tracker.finish(results),
            None => return,
        };
        self.send_signals(signals).await;
    }

    /// Post to every selected platform with a fixed outcome
    async fn force_outcome(&mut self, status: PostStatus) {
        let results: Vec<PostResult> = self
            .studio
            .selected()
            .map(|platform| match status {
                PostStatus::Failed => PostResult::failed(platform, "forced failure"),
                _ => PostResult::posted(platform, "forced"),
            })
            .collect();
        if results.is_empty() {
            return;
        }

        // Clear first so the same outcome twice in a row still registers
        let cleared = self.tracker.reset();
        self.send_signals(cleared).await;
        let signals = self.tracker.finish(&results);
        self.studio.record(results);
        self.send_signals(signals).await;
    }

    async fn send_signals(&self, signals: SignalSet) {
        if let Some(ref mascot) = self.mascot {
            log_dropped(mascot.signals(signals).await);
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let now = Instant::now();
        let snapshot = self.mascot.as_mut().map(|mascot| mascot.snapshot(now));
        terminal.draw(|frame| self.render(frame, snapshot.as_ref()))?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, mascot: Option<&(MascotView, Duration)>) {
        match self.screen {
            Screen::Login => self.render_login(frame),
            Screen::Dashboard => self.render_dashboard(frame, mascot),
        }
    }

    fn render_login(&self, frame: &mut Frame) {
        let area = centered_rect(frame.area(), 44, 11);
        let block = Block::default()
            .title(" Swifter · Sign in ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SWIFTER_VIOLET));

        let field = |label: &str, value: String, focused: bool| {
            let style = if focused {
                Style::default().fg(SWIFTER_VIOLET).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(SWIFTER_LAVENDER)
            };
            let cursor = if focused { "▏" } else { "" };
            Line::from(vec![
                Span::styled(format!("{label:>10} "), style),
                Span::raw(value),
                Span::styled(cursor, style),
            ])
        };

        let mut lines = vec![
            Line::default(),
            field(
                "Username",
                self.login.username.clone(),
                self.login.focus == LoginField::Username,
            ),
            Line::default(),
            field(
                "Password",
                self.login.masked_password(),
                self.login.focus == LoginField::Password,
            ),
            Line::default(),
        ];
        if let Some(ref error) = self.login.error {
            lines.push(Line::styled(error.clone(), Style::default().fg(ERROR_RED)));
        } else {
            lines.push(Line::default());
        }
        lines.push(Line::default());
        lines.push(Line::styled(
            "Enter sign in · Tab switch field · Esc quit",
            Style::default().fg(DIM_GRAY),
        ));

        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
    }

    fn render_dashboard(&mut self, frame: &mut Frame, mascot: Option<&(MascotView, Duration)>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_tabs(frame, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(MASCOT_PANEL_WIDTH)])
            .split(rows[1]);

        match self.tab {
            Tab::Studio => self.render_studio(frame, columns[0]),
            Tab::Analytics => render_analytics(frame, columns[0]),
        }

        let panel = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if self.mascot_hovered() {
                SWIFTER_VIOLET
            } else {
                DIM_GRAY
            }));
        let mascot_area = panel.inner(columns[1]);
        frame.render_widget(panel, columns[1]);
        if let Some((view, elapsed)) = mascot {
            frame.render_widget(MascotWidget::new(view, *elapsed), mascot_area);
        }
        self.mascot_body = MascotWidget::body_rect(mascot_area);

        let help = match self.tab {
            Tab::Studio => {
                "g generate · s/f force success/failure · c content type · r/d/m/t platforms · Tab/1/2 tabs · o sign out · Esc quit"
            }
            Tab::Analytics => "Tab/1/2 tabs · o sign out · Esc quit",
        };
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(DIM_GRAY)),
            rows[2],
        );
    }

    fn mascot_hovered(&self) -> bool {
        self.mascot.as_ref().is_some_and(MascotClient::is_hovered)
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let user = self.username().unwrap_or("guest");
        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(SWIFTER_VIOLET)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .title(" Swifter ")
                    .title(Line::from(format!(" {user} ")).alignment(Alignment::Right))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
        frame.render_widget(tabs, area);
    }

    fn render_studio(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Content type  ", Style::default().fg(DIM_GRAY)),
                Span::styled(
                    self.studio.content_type().label(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::default(),
            Line::styled("Platforms", Style::default().fg(DIM_GRAY)),
        ];

        for (platform, key) in Platform::ALL.iter().zip(PLATFORM_KEYS) {
            let mark = if self.studio.is_selected(*platform) {
                "[x]"
            } else {
                "[ ]"
            };
            lines.push(Line::from(format!("  {mark} ({key}) {}", platform.label())));
        }
        lines.push(Line::default());

        if self.studio.is_generating() {
            lines.push(Line::styled(
                "Generating...",
                Style::default().fg(SWIFTER_LAVENDER),
            ));
        }

        for result in self.studio.last_results() {
            let (mark, style, detail) = match result.status {
                PostStatus::Posted => (
                    "✔",
                    Style::default().fg(SUCCESS_GREEN),
                    result.post_id.clone().unwrap_or_default(),
                ),
                _ => (
                    "✘",
                    Style::default().fg(ERROR_RED),
                    result.error.clone().unwrap_or_default(),
                ),
            };
            lines.push(Line::styled(
                format!("  {mark} {:<9} {detail}", result.platform.label()),
                style,
            ));
        }

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .title(" Studio ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            ),
            area,
        );
    }
}

fn render_analytics(frame: &mut Frame, area: Rect) {
    let header = Row::new(["Platform", "Likes", "Comments", "Shares", "Views", "Clicks", "Rate"])
        .style(Style::default().fg(SWIFTER_VIOLET).add_modifier(Modifier::BOLD));

    let rows = mock_analytics().into_iter().map(|(platform, m)| {
        Row::new(vec![
            Cell::from(platform.label()),
            Cell::from(m.likes.to_string()),
            Cell::from(m.comments.to_string()),
            Cell::from(m.shares.to_string()),
            Cell::from(m.views.to_string()),
            Cell::from(m.clicks.to_string()),
            Cell::from(format!("{:.1}%", m.engagement_rate())),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Analytics (sample data) ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );

    frame.render_widget(table, area);
}

/// A `width` x `height` rectangle centred in `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn log_dropped(result: Result<(), DriverError>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "Mascot input dropped");
    }
}
