pub mod activity_log;
pub mod colors;
pub mod map;
pub mod points_panel;
pub mod symbols;
pub mod ui;

pub use activity_log::{ActivityEntry, ActivityLog, ActivityLogWidget};
pub use colors::{category_color, ColorMode};
pub use map::{MapProjection, MapWidget};
pub use points_panel::PointsPanel;
pub use symbols::detect_unicode;
pub use ui::{EmptyStateType, EmptyStateWidget, HelpOverlay, KnowledgeOverlay, StatusBar};
