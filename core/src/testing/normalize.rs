use lazy_regex::regex;

/// Line normalization applied to both sides before comparing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Normalizer {
    /// Split into lines and trim each one.
    #[default]
    Lenient,
    /// Like `Lenient`, then lowercase and drop one trailing `.`, `!` or `?`.
    Strict,
}

impl Normalizer {
    pub fn apply(self, text: &str) -> Vec<String> {
        match self {
            Normalizer::Lenient => normalize_lines(text),
            Normalizer::Strict => normalize_lines_strict(text),
        }
    }
}

/// Splits `text` on every run of `\n`/`\r` and trims each fragment.
///
/// A leading newline run yields a leading empty line; trailing runs are
/// dropped. Text without any newline is a single line (even when empty).
pub fn normalize_lines(text: &str) -> Vec<String> {
    let mut parts: Vec<&str> = regex!(r"[\n\r]+").split(text).collect();
    if parts.len() > 1 {
        while parts.last().map_or(false, |s| s.is_empty()) {
            parts.pop();
        }
    }
    parts.into_iter().map(|s| s.trim().to_owned()).collect()
}

pub fn normalize_lines_strict(text: &str) -> Vec<String> {
    normalize_lines(text)
        .into_iter()
        .map(|line| {
            let line = line.to_lowercase();
            match line.strip_suffix(|c| matches!(c, '.' | '!' | '?')) {
                Some(stripped) => stripped.to_owned(),
                None => line,
            }
        })
        .collect()
}
