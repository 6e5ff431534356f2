//! Maps Jira statuses to the emoji and color used in reports.
//!
//! Both lookups are total: unknown or missing values fall back to a default
//! entry instead of failing.

const STATUS_EMOJIS: &[(&str, &str)] = &[
    ("selected for development", "📝"),
    ("spec review", "📋"),
    ("implement", "💻"),
    ("ready to review", "👀"),
    ("review", "🔍"),
    ("ready to validate", "✔️"),
    ("validate", "✅"),
    ("ready for staging", "🚀"),
    ("staging", "🎯"),
    ("done", "✅"),
];

pub const DEFAULT_EMOJI: &str = "⚪";

// Keyed by Jira's three universal status categories.
const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("new", "#6B7280"),
    ("indeterminate", "#3B82F6"),
    ("done", "#10B981"),
];

pub const DEFAULT_COLOR: &str = "#9CA3AF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub emoji: &'static str,
    pub color: &'static str,
}

impl Classification {
    /// The color token as an RGB triple, for terminal output.
    pub fn rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(self.color)
            .or_else(|| parse_hex_color(DEFAULT_COLOR))
            .unwrap_or((128, 128, 128))
    }
}

pub fn classify(status_name: &str, category_key: Option<&str>) -> Classification {
    Classification {
        emoji: status_emoji(status_name),
        color: category_color(category_key),
    }
}

pub fn status_emoji(status_name: &str) -> &'static str {
    lookup(STATUS_EMOJIS, status_name).unwrap_or(DEFAULT_EMOJI)
}

pub fn category_color(category_key: Option<&str>) -> &'static str {
    category_key
        .and_then(|key| lookup(CATEGORY_COLORS, key))
        .unwrap_or(DEFAULT_COLOR)
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    let key = key.to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

fn parse_hex_color(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
