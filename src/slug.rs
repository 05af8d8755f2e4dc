//! Filesystem-safe name normalization.

use unicode_normalization::UnicodeNormalization;

/// Normalizes an icon label into a slug usable as a file name stem and as
/// a search tag.
///
/// The input is decomposed (NFKD), lowercased and trimmed; internal
/// whitespace runs fold into single hyphens, anything that is not an ASCII
/// word character or a hyphen is dropped, and hyphen runs collapse to one.
/// Empty input comes back empty.
///
/// Idempotent: feeding a slug back in returns it unchanged.
///
/// # Example
///
/// ```
/// assert_eq!(glyphpack::slugify("Font Awesome"), "font-awesome");
/// assert_eq!(glyphpack::slugify("Café au Lait"), "cafe-au-lait");
/// ```
pub fn slugify(text: &str) -> String {
    let normalized = text.nfkd().collect::<String>().to_lowercase();
    let trimmed = normalized.trim();

    let mut slug = String::with_capacity(trimmed.len());
    let mut pending_hyphen = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            pending_hyphen = true;
            continue;
        }
        if pending_hyphen {
            slug.push('-');
            pending_hyphen = false;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            slug.push(ch);
        }
    }

    collapse_hyphens(&slug)
}

fn collapse_hyphens(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut previous_was_hyphen = false;
    for ch in slug.chars() {
        if ch == '-' {
            if previous_was_hyphen {
                continue;
            }
            previous_was_hyphen = true;
        } else {
            previous_was_hyphen = false;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Font Awesome"), "font-awesome");
        assert_eq!(slugify("Coffee"), "coffee");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("  Multi   Space  "), "multi-space");
        assert_eq!(slugify("tab\there"), "tab-here");
    }

    #[test]
    fn strips_non_word_characters() {
        assert_eq!(slugify("Wi-Fi (strong)"), "wi-fi-strong");
        assert_eq!(slugify("100% done!"), "100-done");
        assert_eq!(slugify("under_score"), "under_score");
    }

    #[test]
    fn decomposes_accented_characters() {
        assert_eq!(slugify("Café au Lait"), "cafe-au-lait");
        assert_eq!(slugify("Über"), "uber");
    }

    #[test]
    fn collapses_hyphen_runs() {
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("dash--dash"), "dash-dash");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn idempotent() {
        for input in [
            "Font Awesome",
            "  Multi   Space  ",
            "Café au Lait",
            "Wi-Fi (strong)",
            "code-branch",
            "",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {input:?}");
        }
    }
}
