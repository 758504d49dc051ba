//! Text matching and truncation utilities
//!
//! Matching uses `unicase` for Unicode case folding, so `ß`/`SS` and similar
//! pairs compare the way a reader would expect.

/// Case-insensitive substring match.
///
/// An empty needle matches everything; callers decide separately whether an
/// empty filter value is active at all.
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack_folded = unicase::UniCase::new(haystack).to_folded_case();
    let needle_folded = unicase::UniCase::new(needle).to_folded_case();
    haystack_folded.contains(&needle_folded)
}

/// Case-insensitive equality (allocation-free)
pub fn eq_case_insensitive(a: &str, b: &str) -> bool {
    unicase::eq(a, b)
}

/// Compare two strings ignoring case, falling back to byte order for ties
pub fn cmp_case_insensitive(a: &str, b: &str) -> std::cmp::Ordering {
    unicase::UniCase::new(a)
        .cmp(&unicase::UniCase::new(b))
        .then_with(|| a.cmp(b))
}

/// Truncate a string to a maximum length, handling multi-byte characters properly.
/// Appends "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
