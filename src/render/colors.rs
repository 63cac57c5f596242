//! Colors for the terminal host.
//!
//! Categories use the Okabe-Ito colorblind-safe palette so the map stays
//! readable for people with color vision deficiency.
//!
//! Reference: https://jfly.uni-koeln.de/color/

use ratatui::style::Color;

use poi_navigator::Category;

/// Color depth of the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Full 24-bit RGB color support
    #[default]
    TrueColor,
    /// Basic 16 ANSI colors
    Basic16,
}

impl ColorMode {
    /// Guess the color depth from `COLORTERM`
    pub fn detect() -> Self {
        match std::env::var("COLORTERM") {
            Ok(value) if value.contains("truecolor") || value.contains("24bit") => {
                ColorMode::TrueColor
            }
            Ok(_) => ColorMode::Basic16,
            Err(_) => ColorMode::TrueColor,
        }
    }
}

/// Category colors, in `Category` declaration order
pub const CATEGORY_COLORS: [Color; 4] = [
    Color::Rgb(136, 136, 136), // General: gray
    Color::Rgb(86, 180, 233),  // Content: sky blue
    Color::Rgb(213, 94, 0),    // Media: vermillion
    Color::Rgb(0, 158, 115),   // Activity: bluish green
];

pub const CATEGORY_COLORS_BASIC: [Color; 4] = [Color::Gray, Color::Cyan, Color::Red, Color::Green];

/// Avatar marker
pub const AVATAR_COLOR: Color = Color::Rgb(240, 228, 66);

/// Accent used for titles and borders
pub const ACCENT: Color = Color::Rgb(100, 200, 150);

/// Panel and bar backgrounds
pub const SURFACE: Color = Color::Rgb(25, 25, 35);
pub const SURFACE_RAISED: Color = Color::Rgb(35, 35, 45);

pub const TEXT: Color = Color::Rgb(180, 180, 190);
pub const TEXT_MUTED: Color = Color::Rgb(100, 100, 120);
pub const WARNING: Color = Color::Rgb(255, 200, 80);
pub const ERROR: Color = Color::Rgb(255, 80, 80);

fn category_index(category: Category) -> usize {
    match category {
        Category::General => 0,
        Category::Content => 1,
        Category::Media => 2,
        Category::Activity => 3,
    }
}

pub fn category_color(category: Category) -> Color {
    CATEGORY_COLORS[category_index(category)]
}

pub fn category_color_for_mode(category: Category, mode: ColorMode) -> Color {
    match mode {
        ColorMode::TrueColor => CATEGORY_COLORS[category_index(category)],
        ColorMode::Basic16 => CATEGORY_COLORS_BASIC[category_index(category)],
    }
}

/// Dim a color by a factor (0.0 = black, 1.0 = unchanged). Non-RGB colors
/// are returned as is.
pub fn dim_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * factor) as u8,
            (g as f32 * factor) as u8,
            (b as f32 * factor) as u8,
        ),
        other => other,
    }
}
