//! Terminal palette for listings.
//!
//! Roles rather than hues, so callers say what they print:
//! `keyword` for declaration kinds, `name` for declared names, `muted` for
//! indices and origins.

/// Standard 16-color ANSI escapes, or empty strings when disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub keyword: &'static str,
    pub name: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        keyword: "\x1b[34m",
        name: "\x1b[1;32m",
        muted: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        keyword: "",
        name: "",
        muted: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// `text` wrapped in `color` and a reset, or `text` alone when disabled.
    pub fn paint(&self, color: &str, text: &str) -> String {
        if self.is_enabled() {
            format!("{color}{text}{}", self.reset)
        } else {
            text.to_string()
        }
    }
}
