//! Judgment normalization
//!
//! The judge model is instructed to answer with exactly `pro` or `con`, but
//! free-text backends drift. Normalization is deliberately lenient: exact
//! match first, then substring containment. Anything else is an invalid
//! judgment, surfaced as an error rather than a default winner.

use rostrum_core::Winner;

/// Normalize a raw judge reply into a verdict.
///
/// `pro` is checked before `con`, so a reply naming both sides resolves to
/// pro. Returns `None` when neither side can be found in the reply.
pub fn normalize(raw: &str) -> Option<Winner> {
    let normalized = raw.trim().to_lowercase();

    match normalized.as_str() {
        "pro" => Some(Winner::Pro),
        "con" => Some(Winner::Con),
        _ if normalized.contains("pro") => Some(Winner::Pro),
        _ if normalized.contains("con") => Some(Winner::Con),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_answers() {
        assert_eq!(normalize("pro"), Some(Winner::Pro));
        assert_eq!(normalize("con"), Some(Winner::Con));
        assert_eq!(normalize("  PRO \n"), Some(Winner::Pro));
    }

    #[test]
    fn test_substring_fallback() {
        assert_eq!(normalize("The winner is clearly PRO."), Some(Winner::Pro));
        assert_eq!(normalize("I choose con."), Some(Winner::Con));
    }

    #[test]
    fn test_pro_takes_precedence_when_both_appear() {
        assert_eq!(
            normalize("Both pro and con argued well, but..."),
            Some(Winner::Pro)
        );
    }

    #[test]
    fn test_unparsable_reply() {
        assert_eq!(normalize("It's a tie."), None);
        assert_eq!(normalize(""), None);
    }
}
