use super::{ExtractError, ExtractedTask, TaskExtractor};
use crate::task::Quadrant;
use async_trait::async_trait;

const URGENT_WORDS: &[&str] = &[
    "urgent",
    "urgently",
    "asap",
    "today",
    "now",
    "immediately",
    "deadline",
];

const IMPORTANT_WORDS: &[&str] = &[
    "important",
    "critical",
    "must",
    "boss",
    "client",
    "accountant",
    "tax",
    "taxes",
];

const LOW_PRIORITY_WORDS: &[&str] = &["someday", "maybe", "eventually"];

/// Deterministic extractor: one task per line or `;`-separated fragment
///
/// Quadrants are inferred from keywords; fragments without any marker are
/// returned without a quadrant so the caller's default applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleExtractor;

impl RuleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Split text into cleaned task titles
    pub fn split(text: &str) -> Vec<String> {
        text.split(['\n', ';'])
            .map(strip_bullet)
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Infer a quadrant from keywords in a title
    pub fn classify(title: &str) -> Option<Quadrant> {
        let words: Vec<String> = title
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        let has = |list: &[&str]| words.iter().any(|w| list.contains(&w.as_str()));

        let important = has(IMPORTANT_WORDS);
        let urgent = has(URGENT_WORDS);

        if important || urgent {
            Some(Quadrant::from_axes(important, urgent))
        } else if has(LOW_PRIORITY_WORDS) {
            Some(Quadrant::NotImportantNotUrgent)
        } else {
            None
        }
    }
}

/// Trim whitespace and a leading list marker (`-`, `*`, `•`, `1.`, `2)`)
fn strip_bullet(fragment: &str) -> &str {
    let trimmed = fragment.trim();
    let without_symbol = trimmed
        .strip_prefix(['-', '*', '•'])
        .map(str::trim_start)
        .unwrap_or(trimmed);

    let digits = without_symbol
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits > 0 {
        let rest = &without_symbol[digits..];
        if let Some(stripped) = rest.strip_prefix(['.', ')']) {
            return stripped.trim();
        }
    }
    without_symbol.trim()
}

#[async_trait]
impl TaskExtractor for RuleExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedTask>, ExtractError> {
        Ok(Self::split(text)
            .into_iter()
            .map(|title| {
                let quadrant = Self::classify(&title);
                ExtractedTask::new(title, quadrant)
            })
            .collect())
    }
}
