//! State behind the "Points of Interest" panel: a searchable list of places.

use crate::point::PointOfInterest;
use crate::selector::PointFilter;

/// Menubar item that owns the panel
pub const MENU_ITEM_ID: &str = "pointsofinterest.menu";

/// Panel title
pub const WINDOW_TITLE: &str = "Points of Interest";

/// Icon shown for points without their own image
pub const DEFAULT_ICON: &str = "point-of-interest-icon.svg";

/// One list row as displayed
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRow<'a> {
    pub name: &'a str,
    pub category: String,
    pub icon: &'a str,
    pub selected: bool,
}

/// Keys the panel reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKey {
    Escape,
    Enter,
    Up,
    Down,
}

/// What the owner of the panel should do after a key press
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    None,
    Close,
    /// Navigate to this point in explicit mode
    GoTo(PointOfInterest),
}

/// Searchable list of points
#[derive(Debug, Clone)]
pub struct PointsWindow {
    all_points: Vec<PointOfInterest>,
    /// Indices into `all_points` matching the current search
    results: Vec<usize>,
    search_text: String,
    prev_search: Option<String>,
    selected: usize,
}

impl PointsWindow {
    pub fn new(points: Vec<PointOfInterest>) -> Self {
        let results = (0..points.len()).collect();
        Self {
            all_points: points,
            results,
            search_text: String::new(),
            prev_search: None,
            selected: 0,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Update the search query. Repeating the previous query is a no-op; a
    /// blank query shows every point again.
    pub fn on_search(&mut self, text: &str) {
        if self.prev_search.as_deref() == Some(text) {
            return;
        }
        self.prev_search = Some(text.to_string());
        self.search_text = text.to_string();
        self.selected = 0;

        let filter = PointFilter::new().name(text);
        self.results = if filter.is_empty() {
            (0..self.all_points.len()).collect()
        } else {
            self.all_points
                .iter()
                .enumerate()
                .filter(|(_, p)| filter.matches(p))
                .map(|(i, _)| i)
                .collect()
        };
    }

    /// Append a typed character to the query
    pub fn push_char(&mut self, c: char) {
        let mut text = self.search_text.clone();
        text.push(c);
        self.on_search(&text);
    }

    /// Remove the last character of the query
    pub fn pop_char(&mut self) {
        let mut text = self.search_text.clone();
        text.pop();
        self.on_search(&text);
    }

    /// Points matching the current search, in world order
    pub fn results(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.results.iter().map(|&i| &self.all_points[i])
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn selected(&self) -> Option<&PointOfInterest> {
        self.results.get(self.selected).map(|&i| &self.all_points[i])
    }

    pub fn rows(&self) -> Vec<PlaceRow<'_>> {
        self.results()
            .enumerate()
            .map(|(row, point)| PlaceRow {
                name: point.display_name(),
                category: point.category.label(),
                icon: point.icon_url.as_deref().unwrap_or(DEFAULT_ICON),
                selected: row == self.selected,
            })
            .collect()
    }

    pub fn on_key(&mut self, key: WindowKey) -> WindowCommand {
        match key {
            WindowKey::Escape => WindowCommand::Close,
            WindowKey::Enter => match self.selected() {
                Some(point) => WindowCommand::GoTo(point.clone()),
                None => WindowCommand::None,
            },
            WindowKey::Up => {
                self.selected = self.selected.saturating_sub(1);
                WindowCommand::None
            }
            WindowKey::Down => {
                if self.selected + 1 < self.results.len() {
                    self.selected += 1;
                }
                WindowCommand::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{Category, Vec3};

    fn window() -> PointsWindow {
        PointsWindow::new(vec![
            PointOfInterest::new("1", Vec3::ZERO).with_name("Lobby Desk"),
            PointOfInterest::new("2", Vec3::ZERO)
                .with_name("Cinema")
                .with_category(Category::Media),
            PointOfInterest::new("3", Vec3::ZERO),
        ])
    }

    fn names(window: &PointsWindow) -> Vec<&str> {
        window.results().map(|p| p.display_name()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut w = window();
        w.on_search("  DESK ");
        assert_eq!(names(&w), vec!["Lobby Desk"]);
    }

    #[test]
    fn test_blank_search_shows_everything() {
        let mut w = window();
        w.on_search("cin");
        assert_eq!(w.result_count(), 1);
        w.on_search("   ");
        assert_eq!(w.result_count(), 3);
    }

    #[test]
    fn test_typing_narrows_results() {
        let mut w = window();
        for c in "lob".chars() {
            w.push_char(c);
        }
        assert_eq!(w.search_text(), "lob");
        assert_eq!(names(&w), vec!["Lobby Desk"]);

        w.pop_char();
        w.pop_char();
        w.pop_char();
        assert_eq!(w.result_count(), 3);
    }

    #[test]
    fn test_rows_use_labels_and_default_icon() {
        let w = window();
        let rows = w.rows();
        assert_eq!(rows[1].category, "Media");
        assert_eq!(rows[0].category, "General");
        assert_eq!(rows[2].name, "unnamed");
        assert_eq!(rows[0].icon, DEFAULT_ICON);
        assert!(rows[0].selected);
    }

    #[test]
    fn test_keys() {
        let mut w = window();
        assert_eq!(w.on_key(WindowKey::Escape), WindowCommand::Close);

        w.on_key(WindowKey::Down);
        w.on_key(WindowKey::Down);
        w.on_key(WindowKey::Down);
        match w.on_key(WindowKey::Enter) {
            WindowCommand::GoTo(p) => assert_eq!(p.id, "3"),
            other => panic!("unexpected {:?}", other),
        }

        w.on_key(WindowKey::Up);
        match w.on_key(WindowKey::Enter) {
            WindowCommand::GoTo(p) => assert_eq!(p.id, "2"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_enter_with_no_results() {
        let mut w = window();
        w.on_search("zzz");
        assert_eq!(w.on_key(WindowKey::Enter), WindowCommand::None);
    }
}
