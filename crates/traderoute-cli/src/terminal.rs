//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions plus color detection, so renderers can ask
//! for a palette instead of checking the environment themselves.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bold reverse green for the START tag.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse cyan for intermediate LEG tags.
    pub const TAG_LEG: &str = "\x1b[1;7;36m";
    /// Bold reverse magenta for the GOAL tag.
    pub const TAG_GOAL: &str = "\x1b[1;7;35m";

    /// Bright bold white for region names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for region ids and decorations.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for travel times.
    pub const GREEN: &str = "\x1b[32m";
    /// Red for unreachable goals.
    pub const RED: &str = "\x1b[31m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color
/// is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_start: &'static str,
    pub tag_leg: &'static str,
    pub tag_goal: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_start: colors::TAG_START,
            tag_leg: colors::TAG_LEG,
            tag_goal: colors::TAG_GOAL,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            red: colors::RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_start: "",
            tag_leg: "",
            tag_goal: "",
            white_bold: "",
            gray: "",
            green: "",
            red: "",
        }
    }

    /// `colored()` if the terminal supports ANSI colors, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/) and
/// the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Format a travel time with two decimals.
#[must_use]
pub fn format_travel_time(value: f64) -> String {
    if value.is_infinite() {
        return "unreachable".to_string();
    }
    format!("{value:.2}")
}
