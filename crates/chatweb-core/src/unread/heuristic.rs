use crate::Profile;

use std::sync::LazyLock;

use regex::RegexSet;
use tracing::error;

/// Best-effort badge patterns seen in chat service titles.
pub(crate) const BADGE_PATTERNS: [&str; 4] = [
    r"\(\s*\d+\s*\)",
    r"^\s*\d+",
    r"(?i)inbox\s*\d+",
    r"(?i)\b\d+\s+(new|unread)\b",
];

static BADGES: LazyLock<Result<RegexSet, regex::Error>> =
    LazyLock::new(|| RegexSet::new(BADGE_PATTERNS));

/// Compiled badge patterns, or the error that kept them from compiling.
pub(crate) fn badge_patterns() -> Result<&'static RegexSet, &'static regex::Error> {
    BADGES.as_ref()
}

/// Whether `profile` is in scope for attention tracking.
///
/// An empty keyword filter means every profile is in scope. Otherwise one of
/// the keywords must appear (case-insensitively) in the configured URL or in
/// `current_url`.
pub fn matches_attention_targets(profile: &Profile, current_url: &str) -> bool {
    if profile.attention_keywords.is_empty() {
        return true;
    }

    let haystack = format!("{} {}", profile.url.trim(), current_url.trim()).to_lowercase();
    profile
        .attention_keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}

/// Whether a page title carries an unread badge.
pub fn title_indicates_unread(title: &str) -> bool {
    let title = title.trim();
    if title.is_empty() {
        return false;
    }

    match badge_patterns() {
        Ok(badges) => badges.is_match(title),
        Err(e) => {
            error!(error = %e, "Badge patterns failed to compile");
            false
        }
    }
}

/// Unread evaluation for one title observation: `true` means Unread.
pub fn evaluate(title: &str, profile: &Profile, current_url: &str) -> bool {
    matches_attention_targets(profile, current_url) && title_indicates_unread(title)
}
