//! Side panel listing moves, actions, editor changes and world reloads.
//!
//! Newest entries sit at the bottom and dim as they age.

use std::collections::VecDeque;
use std::time::Instant;

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use super::colors::{dim_color, ACCENT, TEXT};

/// Width reserved for the source tag, brackets included
const SOURCE_WIDTH: usize = 8;

/// A single entry in the activity log.
#[derive(Debug, Clone)]
pub struct ActivityEntry {
    /// Wall-clock time shown next to the entry
    pub logged_at: DateTime<Local>,
    /// Monotonic creation time, drives the fade
    pub created: Instant,
    /// Short tag for what produced the entry, e.g. `move`
    pub source: String,
    pub message: String,
    pub color: Color,
}

impl ActivityEntry {
    pub fn new(source: impl Into<String>, message: impl Into<String>, color: Color) -> Self {
        Self {
            logged_at: Local::now(),
            created: Instant::now(),
            source: source.into(),
            message: message.into(),
            color,
        }
    }

    /// Get the age of this entry in seconds.
    pub fn age_seconds(&self) -> f32 {
        self.created.elapsed().as_secs_f32()
    }
}

/// Bounded log of recent activity.
#[derive(Debug)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    max_entries: usize,
}

impl ActivityLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Add a new entry. At capacity the oldest entry is dropped.
    pub fn add(&mut self, source: impl Into<String>, message: impl Into<String>, color: Color) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(ActivityEntry::new(source, message, color));
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.back()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(50)
    }
}

/// Widget for rendering the activity log.
pub struct ActivityLogWidget<'a> {
    log: &'a ActivityLog,
    /// Seconds until an entry is fully faded
    max_age: f32,
    title: Option<&'a str>,
}

impl<'a> ActivityLogWidget<'a> {
    pub fn new(log: &'a ActivityLog) -> Self {
        Self {
            log,
            max_age: 30.0,
            title: Some("Activity"),
        }
    }

    pub fn max_age(mut self, max_age: f32) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn title(mut self, title: Option<&'a str>) -> Self {
        self.title = title;
        self
    }

    /// Full opacity for five seconds, then fade down to 30%
    fn opacity_for_age(&self, age_seconds: f32) -> f32 {
        let fade_start = 5.0;
        if age_seconds < fade_start {
            1.0
        } else {
            let fade_progress = (age_seconds - fade_start) / (self.max_age - fade_start);
            (1.0 - fade_progress).clamp(0.3, 1.0)
        }
    }
}

impl Widget for ActivityLogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut y = area.y;
        let bottom = area.y + area.height;

        if let Some(title) = self.title {
            let title_style = Style::default().fg(ACCENT);
            buf.set_stringn(area.x, y, format!(" {} ", title), area.width as usize, title_style);
            y += 1;
        }

        let available_height = bottom.saturating_sub(y) as usize;
        if available_height == 0 {
            return;
        }

        // The last entries that fit, newest at the bottom
        let entries: Vec<_> = self.log.entries().collect();
        let start_idx = entries.len().saturating_sub(available_height);

        for entry in &entries[start_idx..] {
            let opacity = self.opacity_for_age(entry.age_seconds());
            let time_style = Style::default().fg(dim_color(Color::Rgb(110, 110, 130), opacity));
            let source_style = Style::default().fg(dim_color(entry.color, opacity));
            let msg_style = Style::default().fg(dim_color(TEXT, opacity));

            let right = area.x + area.width;
            let line = [
                (entry.logged_at.format("%H:%M:%S ").to_string(), time_style),
                (format!("{:<width$}", format!("[{}]", entry.source), width = SOURCE_WIDTH), source_style),
                (entry.message.clone(), msg_style),
            ];

            let mut x = area.x;
            for (text, style) in line {
                if x >= right {
                    break;
                }
                let (next_x, _) = buf.set_stringn(x, y, text, (right - x) as usize, style);
                x = next_x;
            }

            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_log_add() {
        let mut log = ActivityLog::new(10);
        assert!(log.is_empty());
        log.add("move", "Moved to Cinema", Color::Blue);
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().map(|e| e.source.as_str()), Some("move"));
    }

    #[test]
    fn test_activity_log_max_entries() {
        let mut log = ActivityLog::new(3);
        for i in 1..=4 {
            log.add("move", format!("Message {}", i), Color::Blue);
        }

        assert_eq!(log.len(), 3);
        let entries: Vec<_> = log.entries().collect();
        assert_eq!(entries[0].message, "Message 2");
        assert_eq!(entries[2].message, "Message 4");
    }

    #[test]
    fn test_opacity_fades_with_age() {
        let log = ActivityLog::default();
        let widget = ActivityLogWidget::new(&log);
        assert_eq!(widget.opacity_for_age(1.0), 1.0);
        assert_eq!(widget.opacity_for_age(29.0), 0.3);
    }

    #[test]
    fn test_render_shows_newest_entries() {
        let mut log = ActivityLog::new(10);
        log.add("move", "first", Color::Blue);
        log.add("action", "second", Color::Blue);

        let area = Rect::new(0, 0, 40, 2);
        let mut buf = Buffer::empty(area);
        ActivityLogWidget::new(&log).render(area, &mut buf);

        let text: String = buf.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Activity"));
        assert!(text.contains("[action]"));
        assert!(text.contains("second"));
        assert!(!text.contains("first"));
    }
}
