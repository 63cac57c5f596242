use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use poi_navigator::actions::{EntryKind, KnowledgeBaseEntry};
use poi_navigator::Vec3;

use super::colors::{ACCENT, SURFACE, SURFACE_RAISED, TEXT, TEXT_MUTED, WARNING};

/// Status bar at the bottom of the screen
pub struct StatusBar<'a> {
    point_count: usize,
    avatar: Option<Vec3>,
    yaw: f64,
    editor_open: bool,
    nearest: Option<(&'a str, f64)>,
    watching: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(point_count: usize) -> Self {
        Self {
            point_count,
            avatar: None,
            yaw: 0.0,
            editor_open: false,
            nearest: None,
            watching: false,
        }
    }

    pub fn avatar(mut self, position: Option<Vec3>, yaw: f64) -> Self {
        self.avatar = position;
        self.yaw = yaw;
        self
    }

    pub fn editor_open(mut self, open: bool) -> Self {
        self.editor_open = open;
        self
    }

    /// Name of and distance to the closest point
    pub fn nearest(mut self, nearest: Option<(&'a str, f64)>) -> Self {
        self.nearest = nearest;
        self
    }

    pub fn watching(mut self, watching: bool) -> Self {
        self.watching = watching;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let bg_style = Style::default().bg(SURFACE);
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_style(bg_style);
        }

        let label_style = Style::default().fg(TEXT_MUTED);
        let value_style = Style::default().fg(TEXT);
        let accent_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);

        let mut parts: Vec<(String, Style)> = vec![
            ("◈ POI".to_string(), accent_style),
            (format!("Points: {}", self.point_count), value_style),
        ];

        match self.avatar {
            Some(p) => parts.push((
                format!(
                    "Avatar: ({:.1}, {:.1}, {:.1}) {:.0}°",
                    p.x,
                    p.y,
                    p.z,
                    self.yaw.to_degrees()
                ),
                value_style,
            )),
            None => parts.push(("Avatar: none".to_string(), label_style)),
        }

        if let Some((name, distance)) = self.nearest {
            parts.push((format!("Nearest: {} {:.1}m", name, distance), label_style));
        }

        if self.editor_open {
            let editor_style = Style::default().fg(WARNING).add_modifier(Modifier::BOLD);
            parts.push(("✎ EDITOR".to_string(), editor_style));
        }

        if self.watching {
            parts.push(("⟳ watching".to_string(), label_style));
        }

        let help_text = "?:help q:quit";
        let help_width = help_text.len() as u16 + 1;
        let limit = (area.x + area.width).saturating_sub(help_width);

        let mut x = area.x + 1;
        for (text, style) in parts {
            if x >= limit {
                break;
            }
            let (next_x, _) = buf.set_stringn(x, area.y, text, (limit - x) as usize, style);
            x = next_x + 2;
        }

        if area.width > help_width {
            buf.set_string(area.x + area.width - help_width, area.y, help_text, label_style);
        }
    }
}

/// Draw a rounded box with a background and a centred title; returns the
/// box rectangle.
fn draw_box(area: Rect, buf: &mut Buffer, width: u16, height: u16, title: &str) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let box_x = area.x + (area.width - width) / 2;
    let box_y = area.y + (area.height - height) / 2;
    let rect = Rect::new(box_x, box_y, width, height);
    if width < 4 || height < 3 {
        return rect;
    }

    let box_bg = Style::default().bg(SURFACE_RAISED);
    for y in box_y..box_y + height {
        for x in box_x..box_x + width {
            buf[(x, y)].set_char(' ').set_style(box_bg);
        }
    }

    let border_style = Style::default().fg(ACCENT);
    let right = box_x + width - 1;
    let bottom = box_y + height - 1;
    for x in box_x..=right {
        buf[(x, box_y)].set_char('─').set_style(border_style);
        buf[(x, bottom)].set_char('─').set_style(border_style);
    }
    for y in box_y..=bottom {
        buf[(box_x, y)].set_char('│').set_style(border_style);
        buf[(right, y)].set_char('│').set_style(border_style);
    }
    buf[(box_x, box_y)].set_char('╭').set_style(border_style);
    buf[(right, box_y)].set_char('╮').set_style(border_style);
    buf[(box_x, bottom)].set_char('╰').set_style(border_style);
    buf[(right, bottom)].set_char('╯').set_style(border_style);

    let title_x = box_x + width.saturating_sub(title.chars().count() as u16) / 2;
    buf.set_stringn(
        title_x,
        box_y,
        title,
        width as usize,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    );
    rect
}

/// Help overlay widget
pub struct HelpOverlay;

impl HelpOverlay {
    pub const CONTROLS: [(&'static str, &'static str); 12] = [
        ("p", "Points panel (type to search)"),
        ("r", "Go to a random point"),
        ("c", "Go to the closest point"),
        ("1-4", "Closest general/content/media/activity"),
        ("5-8", "Random general/content/media/activity"),
        ("g", "Go anywhere (no point given)"),
        ("e", "Open/close the editor"),
        ("a", "Add a point (editor open)"),
        ("x", "Clear icon of the closest point"),
        ("k", "Show the assistant knowledge"),
        ("?", "Toggle this help"),
        ("q, Esc", "Quit"),
    ];
}

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = Self::CONTROLS.len() as u16 + 4;
        let rect = draw_box(area, buf, 52, height, " Controls ");
        if rect.width < 20 || rect.height < 4 {
            return;
        }

        let key_style = Style::default()
            .fg(Color::Rgb(200, 200, 100))
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(TEXT);
        let desc_width = rect.width.saturating_sub(14) as usize;

        let mut y = rect.y + 2;
        for (key, desc) in Self::CONTROLS {
            if y >= rect.y + rect.height - 1 {
                break;
            }
            buf.set_string(rect.x + 3, y, key, key_style);
            buf.set_stringn(rect.x + 12, y, desc, desc_width, desc_style);
            y += 1;
        }
    }
}

/// What the assistant is told: the info entry wrapped, then one line per
/// action.
pub struct KnowledgeOverlay<'a> {
    entries: &'a [KnowledgeBaseEntry],
}

impl<'a> KnowledgeOverlay<'a> {
    pub fn new(entries: &'a [KnowledgeBaseEntry]) -> Self {
        Self { entries }
    }
}

impl Widget for KnowledgeOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(8).max(20);
        let height = area.height.saturating_sub(4).max(6);
        let rect = draw_box(area, buf, width, height, " Assistant knowledge ");
        if rect.width < 20 || rect.height < 4 {
            return;
        }

        let text_width = (rect.width - 4) as usize;
        let last_row = rect.y + rect.height - 1;
        let mut y = rect.y + 1;

        for entry in self.entries {
            let lines = match entry.kind {
                EntryKind::Info => wrap(&entry.content, text_width),
                EntryKind::Action => vec![format!("• {} ({})", entry.name, entry.id)],
            };
            for line in lines {
                if y >= last_row {
                    return;
                }
                let style = match entry.kind {
                    EntryKind::Info => Style::default().fg(TEXT),
                    EntryKind::Action => Style::default().fg(ACCENT),
                };
                buf.set_stringn(rect.x + 2, y, line, text_width, style);
                y += 1;
            }
        }
    }
}

/// Greedy word wrap; explicit newlines start a new line
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}

/// Type of empty state to display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyStateType {
    /// The world has no points of interest
    NoPoints,
}

impl EmptyStateType {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyStateType::NoPoints => "No points of interest",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            EmptyStateType::NoPoints => "Press e to open the editor, then a to add one",
        }
    }
}

/// Centred message for an empty map
pub struct EmptyStateWidget {
    state_type: EmptyStateType,
}

impl EmptyStateWidget {
    pub fn new(state_type: EmptyStateType) -> Self {
        Self { state_type }
    }
}

impl Widget for EmptyStateWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 20 {
            return;
        }

        let center_y = area.y + area.height / 2;
        let message = self.state_type.message();
        let hint = self.state_type.hint();

        let msg_x = area.x + area.width.saturating_sub(message.len() as u16) / 2;
        buf.set_stringn(
            msg_x,
            center_y,
            message,
            area.width as usize,
            Style::default().fg(Color::Rgb(150, 150, 160)),
        );

        if center_y + 1 < area.y + area.height {
            let hint_x = area.x + area.width.saturating_sub(hint.len() as u16) / 2;
            buf.set_stringn(
                hint_x,
                center_y + 1,
                hint,
                (area.x + area.width - hint_x) as usize,
                Style::default().fg(TEXT_MUTED),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poi_navigator::actions::knowledge_base;
    use poi_navigator::PointOfInterest;

    fn text(buf: &Buffer) -> String {
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("a\nb", 10), vec!["a", "b"]);
    }

    #[test]
    fn test_status_bar() {
        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(3)
            .avatar(Some(Vec3::new(1.0, 0.1, -2.0)), 0.0)
            .editor_open(true)
            .nearest(Some(("Cinema", 4.25)))
            .render(area, &mut buf);

        let text = text(&buf);
        assert!(text.contains("Points: 3"));
        assert!(text.contains("Avatar: (1.0, 0.1, -2.0)"));
        assert!(text.contains("Nearest: Cinema 4.2m") || text.contains("Nearest: Cinema 4.3m"));
        assert!(text.contains("EDITOR"));
        assert!(text.contains("?:help"));
    }

    #[test]
    fn test_knowledge_overlay_lists_actions() {
        let points = vec![PointOfInterest::new("1", Vec3::ZERO).with_name("Cinema")];
        let entries = knowledge_base("pointofinterest", &points, false);
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        KnowledgeOverlay::new(&entries).render(area, &mut buf);

        let text = text(&buf);
        assert!(text.contains("name=Cinema"));
        assert!(text.contains("pointofinterest:goToClosestPoint"));
    }

    #[test]
    fn test_empty_state() {
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        EmptyStateWidget::new(EmptyStateType::NoPoints).render(area, &mut buf);
        assert!(text(&buf).contains("No points of interest"));
    }
}
