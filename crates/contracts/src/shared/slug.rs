//! URL-safe slug derivation from display names
//!
//! Pure and deterministic. Uniqueness is NOT handled here: the storage layer
//! carries a unique index per slug column, and a collision surfaces as a
//! field-level conflict to the caller.

/// Derive a lowercase, hyphen-separated token from a display name.
///
/// ASCII alphanumerics are kept (lowercased); any run of other characters
/// collapses to a single hyphen. No leading or trailing hyphens.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_name() {
        assert_eq!(slugify("Acme Co"), "acme-co");
    }

    #[test]
    fn test_collapses_separator_runs() {
        assert_eq!(slugify("  Foo --  Bar!! "), "foo-bar");
        assert_eq!(slugify("a&b"), "a-b");
    }

    #[test]
    fn test_no_leading_or_trailing_hyphen() {
        assert_eq!(slugify("--x--"), "x");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_idempotent() {
        for name in ["Acme Co", "Déjà Vu 2000", "already-a-slug", "  A  B  "] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_non_ascii_dropped() {
        assert_eq!(slugify("Déjà Vu"), "d-j-vu");
    }
}
