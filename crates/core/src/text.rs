//! Greedy word wrapping.
//!
//! Two strategies share the same greedy accumulation: a fixed character
//! budget (the historical report layout, 80 characters per line) and a
//! measured width supplied by the caller's font metrics.

/// Character budget used by the report's paragraph layout.
pub const DEFAULT_WRAP_CHARS: usize = 80;

/// How paragraphs are broken into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Break when a line would exceed this many characters.
    Characters(usize),
    /// Break when a line would exceed the available width in points.
    Measured,
}

impl Default for WrapMode {
    fn default() -> Self {
        Self::Characters(DEFAULT_WRAP_CHARS)
    }
}

impl WrapMode {
    /// Parse `chars`, `chars:<n>` or `measured`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_lowercase();
        match raw.as_str() {
            "measured" => Some(Self::Measured),
            "chars" | "characters" => Some(Self::default()),
            other => other
                .strip_prefix("chars:")
                .and_then(|n| n.parse().ok())
                .filter(|n: &usize| *n > 0)
                .map(Self::Characters),
        }
    }
}

/// Wrap `text` so that no line exceeds `max_chars` characters.
///
/// Explicit newlines start a new paragraph. A single word longer than the
/// budget is kept whole on its own line.
pub fn wrap_by_chars(text: &str, max_chars: usize) -> Vec<String> {
    wrap_with(text, |line| line.chars().count() as f32, max_chars as f32)
}

/// Wrap `text` so that no line's measured width exceeds `max_width`.
pub fn wrap_by_width<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    wrap_with(text, measure, max_width)
}

fn wrap_with<F>(text: &str, measure: F, limit: f32) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure(&candidate) > limit {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
