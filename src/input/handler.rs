use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use poi_navigator::window::WindowKey;
use poi_navigator::Category;

/// Processed input events for the application
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Quit the application
    Quit,
    /// Open or close the points panel
    TogglePanel,
    /// Go to a random point
    GoRandom,
    /// Go to the closest point
    GoClosest,
    /// Go to the closest point of a category
    GoClosestIn(Category),
    /// Go to a random point of a category
    GoRandomIn(Category),
    /// Navigate with no point given
    GoAnywhere,
    /// Open or close the world editor
    ToggleEditor,
    /// Add a point in front of the camera
    AddPoint,
    /// Clear the icon of the closest point
    ClearIcon,
    /// Show or hide the assistant knowledge
    ToggleKnowledge,
    /// Toggle help overlay
    ToggleHelp,
    /// Close an overlay (any key while one is shown)
    CloseOverlay,
    /// Typed into the panel search box
    SearchInput(char),
    /// Backspace in the panel search box
    SearchBackspace,
    /// Navigation key for the open panel
    Panel(WindowKey),
    /// No event
    None,
}

/// Number keys 1-4 and 5-8 pick these categories
const CATEGORY_KEYS: [Category; 4] = [
    Category::General,
    Category::Content,
    Category::Media,
    Category::Activity,
];

/// Input handler for processing terminal events
pub struct InputHandler {
    overlay_visible: bool,
    panel_open: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            overlay_visible: false,
            panel_open: false,
        }
    }

    /// Help or knowledge overlay shown
    pub fn set_overlay_visible(&mut self, visible: bool) {
        self.overlay_visible = visible;
    }

    /// Points panel open: keys go to the search box
    pub fn set_panel_open(&mut self, open: bool) {
        self.panel_open = open;
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Poll for input events with timeout
    pub fn poll(&mut self, timeout: Duration) -> Option<InputEvent> {
        if event::poll(timeout).ok()? {
            match event::read().ok()? {
                Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                    Some(self.handle_key(key_event))
                }
                _ => None,
            }
        } else {
            None
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&self, event: KeyEvent) -> InputEvent {
        if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return InputEvent::Quit;
        }

        if self.overlay_visible {
            return InputEvent::CloseOverlay;
        }

        if self.panel_open {
            return self.handle_panel_key(event);
        }

        match event.code {
            KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,

            KeyCode::Char('p') => InputEvent::TogglePanel,
            KeyCode::Char('r') => InputEvent::GoRandom,
            KeyCode::Char('c') => InputEvent::GoClosest,
            KeyCode::Char('g') => InputEvent::GoAnywhere,

            KeyCode::Char(d @ '1'..='4') => {
                InputEvent::GoClosestIn(CATEGORY_KEYS[(d as u8 - b'1') as usize])
            }
            KeyCode::Char(d @ '5'..='8') => {
                InputEvent::GoRandomIn(CATEGORY_KEYS[(d as u8 - b'5') as usize])
            }

            KeyCode::Char('e') => InputEvent::ToggleEditor,
            KeyCode::Char('a') => InputEvent::AddPoint,
            KeyCode::Char('x') => InputEvent::ClearIcon,
            KeyCode::Char('k') => InputEvent::ToggleKnowledge,
            KeyCode::Char('?') => InputEvent::ToggleHelp,

            _ => InputEvent::None,
        }
    }

    /// Handle keyboard input while the points panel is open
    fn handle_panel_key(&self, event: KeyEvent) -> InputEvent {
        match event.code {
            KeyCode::Esc => InputEvent::Panel(WindowKey::Escape),
            KeyCode::Enter => InputEvent::Panel(WindowKey::Enter),
            KeyCode::Up => InputEvent::Panel(WindowKey::Up),
            KeyCode::Down => InputEvent::Panel(WindowKey::Down),
            KeyCode::Backspace => InputEvent::SearchBackspace,
            KeyCode::Char(c) => InputEvent::SearchInput(c),
            _ => InputEvent::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
