//! The "Points of Interest" panel: search box and the matching places.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use poi_navigator::window::{PointsWindow, WINDOW_TITLE};
use poi_navigator::Vec3;

use super::colors::{category_color, ACCENT, SURFACE_RAISED, TEXT, TEXT_MUTED, WARNING};

const PANEL_WIDTH: u16 = 48;
const PANEL_HEIGHT: u16 = 18;

/// Rows used by the title, search line, separator and footer
const CHROME_ROWS: u16 = 5;

pub struct PointsPanel<'a> {
    window: &'a PointsWindow,
    /// Distances are measured from here when set
    origin: Option<Vec3>,
}

impl<'a> PointsPanel<'a> {
    pub fn new(window: &'a PointsWindow) -> Self {
        Self {
            window,
            origin: None,
        }
    }

    pub fn origin(mut self, origin: Option<Vec3>) -> Self {
        self.origin = origin;
        self
    }

    /// Panel rectangle centred in `area`, shrunk to fit
    pub fn centered(area: Rect) -> Rect {
        let width = PANEL_WIDTH.min(area.width);
        let height = PANEL_HEIGHT.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }
}

impl Widget for PointsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.width < 16 || area.height < CHROME_ROWS + 1 {
            return;
        }

        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        let bg_style = Style::default().bg(SURFACE_RAISED);
        for y in area.y..=bottom {
            for x in area.x..=right {
                buf[(x, y)].set_char(' ').set_style(bg_style);
            }
        }

        let border_style = Style::default().fg(ACCENT);
        for x in area.x..=right {
            buf[(x, area.y)].set_char('─').set_style(border_style);
            buf[(x, bottom)].set_char('─').set_style(border_style);
        }
        for y in area.y..=bottom {
            buf[(area.x, y)].set_char('│').set_style(border_style);
            buf[(right, y)].set_char('│').set_style(border_style);
        }
        buf[(area.x, area.y)].set_char('╭').set_style(border_style);
        buf[(right, area.y)].set_char('╮').set_style(border_style);
        buf[(area.x, bottom)].set_char('╰').set_style(border_style);
        buf[(right, bottom)].set_char('╯').set_style(border_style);

        let title = format!(" {} ", WINDOW_TITLE);
        let title_x = area.x + area.width.saturating_sub(title.chars().count() as u16) / 2;
        buf.set_string(
            title_x,
            area.y,
            &title,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        );

        let content_x = area.x + 2;
        let content_width = (area.width - 4) as usize;

        // Search line
        let search = format!("Search: {}_", self.window.search_text());
        buf.set_stringn(
            content_x,
            area.y + 1,
            truncate(&search, content_width),
            content_width,
            Style::default().fg(WARNING),
        );
        for x in area.x + 1..right {
            buf[(x, area.y + 2)]
                .set_char('┄')
                .set_style(Style::default().fg(TEXT_MUTED));
        }

        // Rows, scrolled so the selection stays visible
        let visible = (area.height - CHROME_ROWS) as usize;
        let rows = self.window.rows();
        let selected = rows.iter().position(|r| r.selected).unwrap_or(0);
        let first = selected.saturating_sub(visible.saturating_sub(1));

        if rows.is_empty() {
            buf.set_stringn(
                content_x,
                area.y + 3,
                "No places match",
                content_width,
                Style::default().fg(TEXT_MUTED),
            );
        }

        let mut y = area.y + 3;
        for (row, point) in rows
            .iter()
            .zip(self.window.results())
            .skip(first)
            .take(visible)
        {
            let marker = if row.selected { '›' } else { ' ' };
            let mut name_style = Style::default().fg(TEXT);
            if row.selected {
                name_style = name_style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }

            let distance = self
                .origin
                .map(|o| format!("{:>6.1}m", o.distance_to(&point.position)))
                .unwrap_or_default();
            let category = format!("{:<8}", row.category);
            let name_width = content_width
                .saturating_sub(2 + category.len() + 1 + distance.chars().count());

            buf[(content_x, y)]
                .set_char(marker)
                .set_style(Style::default().fg(ACCENT));
            buf.set_stringn(
                content_x + 2,
                y,
                format!("{:<width$}", truncate(row.name, name_width), width = name_width),
                name_width,
                name_style,
            );
            let category_x = content_x + 2 + name_width as u16;
            buf.set_string(
                category_x,
                y,
                &category,
                Style::default().fg(category_color(point.category)),
            );
            buf.set_string(
                category_x + category.len() as u16 + 1,
                y,
                &distance,
                Style::default().fg(TEXT_MUTED),
            );
            y += 1;
        }

        let footer = format!(
            "{} found  ↑↓ select  Enter go  Esc close",
            self.window.result_count()
        );
        buf.set_stringn(
            content_x,
            bottom - 1,
            truncate(&footer, content_width),
            content_width,
            Style::default().fg(TEXT_MUTED),
        );
    }
}

/// Truncate a string to fit within a maximum width
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 1 {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    } else {
        "…".to_string()
    }
}
