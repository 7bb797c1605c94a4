use regex::Regex;
use std::sync::LazyLock;

/// Drive-letter prefix (`C:\`, `C:/`) or a leading separator.
static ABSOLUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z]:[\\/]|[\\/])").unwrap());

/// Separator placed between the base path and a relative value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// Always `\`, matching the Windows shells most users paste into.
    #[default]
    Backslash,
    /// Whatever the host platform uses (`/` on unix).
    Native,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Backslash => '\\',
            Separator::Native => std::path::MAIN_SEPARATOR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Backslash => "backslash",
            Separator::Native => "native",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "backslash" => Some(Separator::Backslash),
            "native" => Some(Separator::Native),
            _ => None,
        }
    }
}

pub fn is_absolute(value: &str) -> bool {
    ABSOLUTE.is_match(value)
}

/// Resolve `raw` (or `fallback` when blank) against `base`.
///
/// Absolute values and an empty base leave the value untouched. Otherwise the
/// two are joined textually with exactly one `separator`; nothing is checked
/// against the filesystem.
pub fn resolve_with(raw: &str, fallback: &str, base: &str, separator: Separator) -> String {
    let value = if raw.trim().is_empty() { fallback } else { raw };

    if is_absolute(value) || base.is_empty() {
        return value.to_string();
    }

    let trimmed_base = base.trim_end_matches(['/', '\\']);
    let trimmed_value = value.trim_start_matches(['/', '\\']);
    format!("{trimmed_base}{}{trimmed_value}", separator.as_char())
}

/// Base path plus separator choice, handed to the template engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResolver {
    base: String,
    separator: Separator,
}

impl PathResolver {
    pub fn new(base: impl Into<String>, separator: Separator) -> Self {
        Self {
            base: base.into(),
            separator,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn resolve(&self, raw: &str, fallback: &str) -> String {
        resolve_with(raw, fallback, &self.base, self.separator)
    }
}
