use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
    Terminal,
};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use poi_navigator::actions::KnowledgeBaseEntry;
use poi_navigator::demo::{demo_world, scatter_points, SimulatedHost};
use poi_navigator::event::{create_event_queue, EventReceiver, EventSender, PluginEvent, WorldWatcher};
use poi_navigator::host::{file, Entity, EntityId, EntityStore, PanelControl};
use poi_navigator::modifier::EditorMode;
use poi_navigator::selector::{rank_by_distance, PointFilter};
use poi_navigator::window::{PointsWindow, WindowCommand, WindowKey, MENU_ITEM_ID};
use poi_navigator::{
    Category, HostError, NavigationOutcome, PluginConfig, PoiError, PointOfInterest,
    PointOfInterestPlugin,
};

use crate::input::{InputEvent, InputHandler};
use crate::render::colors::{ACCENT, ERROR, TEXT_MUTED, WARNING};
use crate::render::{
    category_color, detect_unicode, ActivityLog, ActivityLogWidget, ColorMode, EmptyStateType,
    EmptyStateWidget, HelpOverlay, KnowledgeOverlay, MapWidget, PointsPanel, StatusBar,
};

/// Target frame rate
const TARGET_FPS: u64 = 30;

const FRAME_DURATION: Duration = Duration::from_millis(1000 / TARGET_FPS);

/// Right-hand activity column; hidden on narrow terminals
const ACTIVITY_LOG_WIDTH: u16 = 44;
const MIN_WIDTH_FOR_LOG: u16 = 100;

/// Reloaded worlds waiting to be applied. Only the newest one matters.
const WORLD_QUEUE_SIZE: usize = 4;

/// World units around the origin that scattered points land in
const SCATTER_EXTENT: f64 = 40.0;

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub world_path: Option<PathBuf>,
    pub demo_mode: bool,
    pub watch: bool,
    /// Extra unnamed points added to the demo world
    pub scatter: usize,
    pub seed: Option<u64>,
    pub plugin: PluginConfig,
}

impl AppConfig {
    /// Entities to start from: the world file, or the demo world when in
    /// demo mode and the file does not exist yet
    pub fn initial_world(&self) -> Result<Vec<Entity>, HostError> {
        if let Some(path) = &self.world_path {
            if !self.demo_mode || path.exists() {
                return file::load_world(path);
            }
        }

        let mut entities = demo_world();
        if self.scatter > 0 {
            entities.extend(scatter_points(&mut self.rng(), self.scatter, SCATTER_EXTENT));
        }
        Ok(entities)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Loaded plugin bound to a simulated host holding the initial world
    pub fn build_plugin(
        &self,
        events: Option<EventSender>,
    ) -> Result<PointOfInterestPlugin<SimulatedHost>, PoiError> {
        let mut host = SimulatedHost::new(self.initial_world()?);
        if let Some(sender) = events {
            host = host.with_event_forwarding(sender);
        }

        let mut plugin = PointOfInterestPlugin::with_rng(host, self.plugin.clone(), self.rng());
        plugin.on_load()?;
        Ok(plugin)
    }
}

/// Main application state
pub struct App {
    config: AppConfig,
    plugin: PointOfInterestPlugin<SimulatedHost>,
    input_handler: InputHandler,

    /// Points as of the last frame
    points: Vec<PointOfInterest>,

    /// Open points panel
    window: Option<PointsWindow>,

    /// Assistant knowledge overlay
    knowledge: Option<Vec<KnowledgeBaseEntry>>,

    show_help: bool,

    /// Point the last navigation went to, highlighted on the map
    last_target: Option<EntityId>,

    activity_log: ActivityLog,
    event_rx: EventReceiver,
    world_rx: Option<mpsc::Receiver<Vec<Entity>>>,

    use_unicode: bool,
    color_mode: ColorMode,

    running: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, PoiError> {
        let (event_tx, event_rx) = create_event_queue();
        let plugin = config.build_plugin(Some(event_tx))?;
        let points = plugin.points()?;

        let mut activity_log = ActivityLog::new(100);
        let source = match &config.world_path {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "demo world".to_string(),
        };
        activity_log.add(
            "world",
            format!("{} points from {}", points.len(), source),
            ACCENT,
        );

        let mut app = Self {
            config,
            plugin,
            input_handler: InputHandler::new(),
            points,
            window: None,
            knowledge: None,
            show_help: false,
            last_target: None,
            activity_log,
            event_rx,
            world_rx: None,
            use_unicode: detect_unicode(),
            color_mode: ColorMode::detect(),
            running: true,
        };

        // A demo world with a file name gets written out so it can be
        // edited and watched
        if let Some(path) = app.config.world_path.clone() {
            if app.config.demo_mode && !path.exists() {
                app.save_world();
                app.activity_log
                    .add("world", format!("wrote demo world to {}", path.display()), TEXT_MUTED);
            }
        }

        Ok(app)
    }

    /// Run the application
    pub async fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let _watcher = self.start_watcher();
        let result = self.main_loop(&mut terminal).await;

        // Restore the terminal even when the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let mut frames = tokio::time::interval(FRAME_DURATION);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while self.running {
            frames.tick().await;

            self.handle_input();
            self.process_plugin_events();
            self.process_world_reloads();
            self.tick_editor();
            self.refresh_points();

            terminal.draw(|frame| {
                let area = frame.area();
                self.render(area, frame.buffer_mut());
            })?;
        }

        Ok(())
    }

    /// Watch the world file when asked to
    fn start_watcher(&mut self) -> Option<WorldWatcher> {
        if !self.config.watch {
            return None;
        }
        let path = self.config.world_path.clone()?;

        let (tx, rx) = mpsc::channel(WORLD_QUEUE_SIZE);
        match WorldWatcher::new(&path, tx) {
            Ok(watcher) => {
                self.world_rx = Some(rx);
                tracing::info!(path = %watcher.path().display(), "watching world file");
                self.activity_log.add(
                    "world",
                    format!("watching {}", watcher.path().display()),
                    TEXT_MUTED,
                );
                Some(watcher)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot watch world file");
                self.activity_log.add("world", format!("watch failed: {}", e), ERROR);
                None
            }
        }
    }

    /// Drain pending key presses
    fn handle_input(&mut self) {
        while let Some(event) = self.input_handler.poll(Duration::ZERO) {
            self.handle_input_event(event);
            if !self.running {
                return;
            }
        }
    }

    fn handle_input_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.running = false,

            InputEvent::TogglePanel => match self.plugin.toggle_ui() {
                Ok(window) => self.window = window,
                Err(e) => self.report_error(&e),
            },

            InputEvent::GoRandom => {
                let result = self.plugin.go_to_random_point(None, None);
                self.report_navigation("random", result);
            }

            InputEvent::GoClosest => {
                let result = self.plugin.go_to_closest_point(None, None);
                self.report_navigation("closest", result);
            }

            InputEvent::GoClosestIn(category) => {
                let result = self.plugin.go_to_closest_point(Some(category.as_str()), None);
                self.report_navigation(&format!("closest {}", category), result);
            }

            InputEvent::GoRandomIn(category) => {
                let result = self.plugin.go_to_random_point(Some(category.as_str()), None);
                self.report_navigation(&format!("random {}", category), result);
            }

            InputEvent::GoAnywhere => {
                let result = self.plugin.go_to_point(None);
                self.report_navigation("anywhere", result);
            }

            InputEvent::ToggleEditor => {
                let host = self.plugin.host_mut();
                let open = !host.editor_open;
                host.set_editor_open(open);
            }

            InputEvent::AddPoint => self.add_point(),

            InputEvent::ClearIcon => self.clear_icon(),

            InputEvent::ToggleKnowledge => {
                self.knowledge = match self.knowledge.take() {
                    Some(_) => None,
                    None => match self.plugin.knowledge_base() {
                        Ok(entries) => Some(entries),
                        Err(e) => {
                            self.report_error(&e);
                            None
                        }
                    },
                };
            }

            InputEvent::ToggleHelp => self.show_help = !self.show_help,

            InputEvent::CloseOverlay => {
                self.show_help = false;
                self.knowledge = None;
            }

            InputEvent::SearchInput(c) => {
                if let Some(window) = self.window.as_mut() {
                    window.push_char(c);
                }
            }

            InputEvent::SearchBackspace => {
                if let Some(window) = self.window.as_mut() {
                    window.pop_char();
                }
            }

            InputEvent::Panel(key) => self.handle_panel_key(key),

            InputEvent::None => {}
        }

        // Navigation closes the host panel; drop our view of it too
        if self.window.is_some() && !self.plugin.host().is_panel_open(MENU_ITEM_ID) {
            self.window = None;
        }
        self.input_handler.set_panel_open(self.window.is_some());
        self.input_handler
            .set_overlay_visible(self.show_help || self.knowledge.is_some());
    }

    fn handle_panel_key(&mut self, key: WindowKey) {
        let Some(window) = self.window.as_mut() else {
            return;
        };

        match window.on_key(key) {
            WindowCommand::None => {}
            WindowCommand::Close => {
                self.plugin.host_mut().close_panel();
                self.window = None;
            }
            WindowCommand::GoTo(point) => {
                let label = format!("panel {}", point.display_name());
                let result = self.plugin.go_to_point(Some(point));
                self.report_navigation(&label, result);
            }
        }
    }

    fn add_point(&mut self) {
        if !self.plugin.host().editor_open {
            self.activity_log
                .add("editor", "open the editor (e) to add points", WARNING);
            return;
        }

        let added = self
            .plugin
            .add_point()
            .and_then(|id| self.plugin.load_modifiers().map(|_| id));
        match added {
            Ok(id) => {
                self.activity_log.add("editor", format!("added {}", id), ACCENT);
                self.save_world();
            }
            Err(e) => self.report_error(&e),
        }
    }

    /// Clear the icon of the point closest to the avatar
    fn clear_icon(&mut self) {
        let Some(avatar) = self.plugin.host().avatar else {
            return;
        };
        let Some(id) = rank_by_distance(&self.points, &PointFilter::new(), &avatar)
            .first()
            .map(|(_, p)| p.id.clone())
        else {
            return;
        };

        match self.plugin.remove_image(&id) {
            Ok(true) => {
                self.activity_log.add("editor", format!("cleared icon of {}", id), ACCENT);
                self.save_world();
            }
            Ok(false) => self
                .activity_log
                .add("editor", format!("{} has no marker", id), WARNING),
            Err(e) => self.report_error(&e),
        }
    }

    /// Write the store back to the world file, if there is one
    fn save_world(&mut self) {
        let Some(path) = self.config.world_path.clone() else {
            return;
        };

        let saved = self
            .plugin
            .host()
            .store
            .entities()
            .and_then(|entities| file::save_world(&path, &entities));
        if let Err(e) = saved {
            tracing::warn!(path = %path.display(), error = %e, "failed to save world");
            self.activity_log.add("world", format!("save failed: {}", e), ERROR);
        }
    }

    /// Turn plugin events into activity entries
    fn process_plugin_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            let name = event.name();
            match event {
                PluginEvent::Moved(p) => self.activity_log.add(
                    "event",
                    format!("{} ({:.1}, {:.1}, {:.1})", name, p.x, p.y, p.z),
                    TEXT_MUTED,
                ),
            }
        }
    }

    /// Swap in the newest reloaded world, if any
    fn process_world_reloads(&mut self) {
        let latest = match self.world_rx.as_mut() {
            Some(rx) => {
                let mut latest = None;
                while let Ok(entities) = rx.try_recv() {
                    latest = Some(entities);
                }
                latest
            }
            None => return,
        };
        let Some(entities) = latest else {
            return;
        };

        let count = entities.len();
        self.plugin.host_mut().store.replace_all(entities);
        match self.plugin.sync_modifiers() {
            Ok(attached) => self.activity_log.add(
                "world",
                format!("reloaded {} entities, {} new markers", count, attached),
                ACCENT,
            ),
            Err(e) => self.report_error(&e),
        }

        // Keep an open panel but show the new points under the same search
        if let Some(window) = self.window.take() {
            if let Ok(points) = self.plugin.points() {
                let mut refreshed = PointsWindow::new(points);
                refreshed.on_search(window.search_text());
                self.window = Some(refreshed);
            }
        }
    }

    fn tick_editor(&mut self) {
        match self.plugin.tick(Instant::now()) {
            Ok(Some(EditorMode::Open)) => {
                self.activity_log.add("editor", "editor opened, markers shown", WARNING)
            }
            Ok(Some(EditorMode::Closed)) => {
                self.activity_log.add("editor", "editor closed, markers hidden", TEXT_MUTED)
            }
            Ok(None) => {}
            Err(e) => self.report_error(&e),
        }
    }

    fn refresh_points(&mut self) {
        match self.plugin.points() {
            Ok(points) => self.points = points,
            Err(e) => tracing::warn!(error = %e, "cannot list points"),
        }
    }

    fn report_navigation(&mut self, label: &str, result: poi_navigator::Result<NavigationOutcome>) {
        match result {
            Ok(outcome) if outcome.moved => {
                let target = outcome
                    .point_id
                    .as_deref()
                    .and_then(|id| self.points.iter().find(|p| p.id == id));
                let (name, color) = match target {
                    Some(point) => (point.display_name().to_string(), category_color(point.category)),
                    None => (outcome.point_id.clone().unwrap_or_default(), category_color(Category::General)),
                };
                self.activity_log.add("move", format!("{}: {}", label, name), color);
                self.last_target = outcome.point_id;
            }
            Ok(_) => {
                self.activity_log
                    .add("move", format!("{}: no point found", label), WARNING);
                self.last_target = None;
            }
            Err(e) => self.report_error(&e),
        }
    }

    fn report_error(&mut self, error: &PoiError) {
        tracing::error!(error = %error, "plugin call failed");
        self.activity_log.add("error", error.to_string(), ERROR);
    }

    /// Map on the left, activity on the right, status bar at the bottom,
    /// then the panel and overlays on top.
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 {
            return;
        }
        let host = self.plugin.host();

        let log_width = if area.width >= MIN_WIDTH_FOR_LOG {
            ACTIVITY_LOG_WIDTH
        } else {
            0
        };
        let body_height = area.height - 1;
        let map_area = Rect::new(area.x, area.y, area.width - log_width, body_height);

        MapWidget::new(&self.points)
            .avatar(host.avatar, host.yaw)
            .highlighted(self.last_target.as_deref())
            .use_unicode(self.use_unicode)
            .color_mode(self.color_mode)
            .render(map_area, buf);

        if self.points.is_empty() {
            EmptyStateWidget::new(EmptyStateType::NoPoints).render(map_area, buf);
        }

        if log_width > 0 {
            let log_area = Rect::new(area.x + map_area.width, area.y, log_width, body_height);
            ActivityLogWidget::new(&self.activity_log).render(log_area, buf);
        }

        let nearest = host.avatar.and_then(|avatar| {
            rank_by_distance(&self.points, &PointFilter::new(), &avatar)
                .into_iter()
                .next()
                .map(|(distance, point)| (point.display_name(), distance))
        });
        StatusBar::new(self.points.len())
            .avatar(host.avatar, host.yaw)
            .editor_open(host.editor_open)
            .nearest(nearest)
            .watching(self.world_rx.is_some())
            .render(Rect::new(area.x, area.y + body_height, area.width, 1), buf);

        if let Some(window) = &self.window {
            PointsPanel::new(window)
                .origin(host.avatar)
                .render(PointsPanel::centered(map_area), buf);
        }

        if let Some(entries) = &self.knowledge {
            KnowledgeOverlay::new(entries).render(area, buf);
        }

        if self.show_help {
            HelpOverlay.render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn demo_app() -> App {
        App::new(AppConfig {
            demo_mode: true,
            seed: Some(7),
            ..Default::default()
        })
        .unwrap()
    }

    fn screen(app: &App) -> String {
        let area = Rect::new(0, 0, 140, 40);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_initial_world_prefers_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.jsonl");
        std::fs::write(&path, "{\"id\": \"only\", \"name\": \"Point of Interest\"}\n").unwrap();

        let config = AppConfig {
            world_path: Some(path),
            demo_mode: true,
            ..Default::default()
        };
        let world = config.initial_world().unwrap();
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_initial_world_falls_back_to_demo() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            world_path: Some(dir.path().join("missing.jsonl")),
            demo_mode: true,
            scatter: 5,
            seed: Some(1),
            ..Default::default()
        };
        let world = config.initial_world().unwrap();
        assert_eq!(world.len(), demo_world().len() + 5);
    }

    #[test]
    fn test_missing_world_without_demo_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            world_path: Some(dir.path().join("missing.jsonl")),
            ..Default::default()
        };
        assert!(matches!(config.initial_world(), Err(HostError::Io(_))));
    }

    #[test]
    fn test_panel_flow() {
        let mut app = demo_app();
        app.handle_input_event(InputEvent::TogglePanel);
        assert!(app.window.is_some());
        assert!(app.input_handler.is_panel_open());

        for c in "cinema".chars() {
            app.handle_input_event(InputEvent::SearchInput(c));
        }
        assert!(screen(&app).contains("1 found"));

        app.handle_input_event(InputEvent::Panel(WindowKey::Enter));
        assert!(app.window.is_none());
        assert!(!app.input_handler.is_panel_open());
        assert_eq!(app.plugin.host().move_count(), 1);
        assert!(app
            .activity_log
            .last()
            .is_some_and(|e| e.message == "panel Cinema: Cinema"));
    }

    #[test]
    fn test_category_navigation_logs_the_target() {
        let mut app = demo_app();
        app.handle_input_event(InputEvent::GoClosestIn(Category::Activity));
        let last = app.activity_log.last().unwrap();
        assert_eq!(last.source, "move");
        assert!(last.message.starts_with("closest activity: "));
        assert!(app.last_target.is_some());
    }

    #[test]
    fn test_add_point_needs_open_editor() {
        let mut app = demo_app();
        let before = app.plugin.host().store.len();
        app.handle_input_event(InputEvent::AddPoint);
        assert_eq!(app.plugin.host().store.len(), before);

        app.handle_input_event(InputEvent::ToggleEditor);
        app.handle_input_event(InputEvent::AddPoint);
        assert_eq!(app.plugin.host().store.len(), before + 1);
        assert_eq!(app.plugin.modifiers().len(), app.points.len() + 1);
    }

    #[test]
    fn test_overlays_capture_keys() {
        let mut app = demo_app();
        app.handle_input_event(InputEvent::ToggleKnowledge);
        assert!(app.knowledge.is_some());
        assert!(screen(&app).contains("Assistant knowledge"));

        app.handle_input_event(InputEvent::CloseOverlay);
        assert!(app.knowledge.is_none());
    }

    #[test]
    fn test_draw_on_test_backend() {
        let app = demo_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.render(area, frame.buffer_mut());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Points: 8"));
    }
}
