//! Map glyphs with Unicode and ASCII fallbacks

use poi_navigator::Category;

/// Symbol with Unicode and ASCII fallback
#[derive(Debug, Clone, Copy)]
pub struct Symbol {
    pub unicode: char,
    pub ascii: char,
    pub name: &'static str,
}

impl Symbol {
    pub const fn new(unicode: char, ascii: char, name: &'static str) -> Self {
        Self {
            unicode,
            ascii,
            name,
        }
    }

    pub fn render(&self, use_unicode: bool) -> char {
        if use_unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// One shape per category, in `Category` declaration order
pub const CATEGORY_SYMBOLS: [Symbol; 4] = [
    Symbol::new('\u{25CF}', 'o', "general"),  // ●
    Symbol::new('\u{25A0}', '#', "content"),  // ■
    Symbol::new('\u{25C6}', '*', "media"),    // ◆
    Symbol::new('\u{25B2}', '^', "activity"), // ▲
];

/// Avatar facing, by octant starting at -Z and turning toward -X
pub const AVATAR_FACING: [Symbol; 8] = [
    Symbol::new('\u{2191}', '^', "north"),      // ↑
    Symbol::new('\u{2196}', '\\', "northwest"), // ↖
    Symbol::new('\u{2190}', '<', "west"),       // ←
    Symbol::new('\u{2199}', '/', "southwest"),  // ↙
    Symbol::new('\u{2193}', 'v', "south"),      // ↓
    Symbol::new('\u{2198}', '\\', "southeast"), // ↘
    Symbol::new('\u{2192}', '>', "east"),       // →
    Symbol::new('\u{2197}', '/', "northeast"),  // ↗
];

pub const AVATAR: Symbol = Symbol::new('@', '@', "avatar");

pub fn category_symbol(category: Category) -> &'static Symbol {
    match category {
        Category::General => &CATEGORY_SYMBOLS[0],
        Category::Content => &CATEGORY_SYMBOLS[1],
        Category::Media => &CATEGORY_SYMBOLS[2],
        Category::Activity => &CATEGORY_SYMBOLS[3],
    }
}

/// Arrow for a camera yaw in radians
pub fn facing_symbol(yaw: f64) -> &'static Symbol {
    let octant = (yaw.rem_euclid(std::f64::consts::TAU) / std::f64::consts::FRAC_PI_4).round();
    &AVATAR_FACING[octant as usize % AVATAR_FACING.len()]
}

/// Detect if the terminal supports Unicode characters
///
/// Checks the locale variables for a UTF-8 locale, then `TERM` for common
/// Unicode-capable terminal types.
pub fn detect_unicode() -> bool {
    for var in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if value.to_lowercase().contains("utf") {
                return true;
            }
        }
    }

    if let Ok(term) = std::env::var("TERM") {
        let unicode_terms = ["xterm", "screen", "tmux", "rxvt", "kitty", "alacritty"];
        if unicode_terms.iter().any(|t| term.contains(t)) {
            return true;
        }
    }

    false
}
