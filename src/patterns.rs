use regex::Regex;
use std::sync::LazyLock;

/// Characters stripped from tokens before counting. The hyphen is included.
pub const DELIMITERS: &str = ".,;:?$@^<>#%`!*-=()[]{}/'\"";

static START_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*\*\s*START OF (?:THE |THIS )?PROJECT GUTENBERG EBOOK\b.*\*\*\*")
        .expect("start marker pattern is valid")
});

static END_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*\*\s*END OF (?:THE |THIS )?PROJECT GUTENBERG EBOOK\b.*\*\*\*")
        .expect("end marker pattern is valid")
});

pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(c)
}

pub fn is_start_marker(line: &str) -> bool {
    START_MARKER.is_match(line)
}

pub fn is_end_marker(line: &str) -> bool {
    END_MARKER.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimiters_cover_common_punctuation() {
        for c in ".,;:?$@^<>#%`!*-=()[]{}/'\"".chars() {
            assert!(is_delimiter(c), "{c:?} should be a delimiter");
        }
        assert!(!is_delimiter('a'));
        assert!(!is_delimiter('_'));
        assert!(!is_delimiter(' '));
    }

    #[test]
    fn markers_match_with_and_without_the() {
        assert!(is_start_marker("*** START OF PROJECT GUTENBERG EBOOK TITLE ***"));
        assert!(is_start_marker(
            "  *** START OF THE PROJECT GUTENBERG EBOOK ALICE'S ADVENTURES ***  "
        ));
        assert!(is_end_marker("*** END OF PROJECT GUTENBERG EBOOK TITLE ***"));
        assert!(is_end_marker("*** END OF THE PROJECT GUTENBERG EBOOK ALICE ***"));
    }

    #[test]
    fn markers_accept_this_form() {
        assert!(is_start_marker(
            "*** START OF THIS PROJECT GUTENBERG EBOOK PRIDE AND PREJUDICE ***"
        ));
        assert!(is_end_marker(
            "*** END OF THIS PROJECT GUTENBERG EBOOK PRIDE AND PREJUDICE ***"
        ));
    }

    #[test]
    fn markers_reject_ordinary_lines() {
        assert!(!is_start_marker("START OF PROJECT GUTENBERG EBOOK"));
        assert!(!is_start_marker("*** END OF PROJECT GUTENBERG EBOOK TITLE ***"));
        assert!(!is_end_marker("*** START OF PROJECT GUTENBERG EBOOK TITLE ***"));
        assert!(!is_end_marker("The end of the story."));
    }
}
