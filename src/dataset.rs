use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::patterns;

/// Reads a UTF-8 text file into lines with their line endings removed.
pub fn load_text(path: &Path) -> Result<Vec<String>> {
    let start_time = Instant::now();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read text file {:?}", path))?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();

    info!(
        action = "load",
        component = "text_loader",
        file_path = ?path,
        line_count = lines.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Loaded text file"
    );
    Ok(lines)
}

/// Writes `text` verbatim, replacing any existing file.
pub fn save_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write text file {:?}", path))?;
    info!(
        action = "save",
        component = "text_writer",
        file_path = ?path,
        bytes = text.len(),
        "Saved text file"
    );
    Ok(())
}

/// Returns the text between the first start marker and the first end marker after it.
///
/// Lines strictly between the markers are joined with `\n` and the result is trimmed.
/// A document missing either marker yields an empty string.
pub fn strip_headers<S: AsRef<str>>(lines: &[S]) -> String {
    let Some(start) = lines
        .iter()
        .position(|line| patterns::is_start_marker(line.as_ref()))
    else {
        return String::new();
    };

    let body = &lines[start + 1..];
    let Some(end) = body
        .iter()
        .position(|line| patterns::is_end_marker(line.as_ref()))
    else {
        return String::new();
    };

    body[..end]
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<&str>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Dataset preparation stage: load `input`, strip the boilerplate and save to `output`.
///
/// Returns the extracted text. An empty extraction is still written.
pub fn prepare_dataset(input: &Path, output: &Path) -> Result<String> {
    let start_time = Instant::now();
    info!(action = "start", component = "dataset_prep", input = ?input, "Preparing dataset");

    let lines = load_text(input)?;
    let text = strip_headers(&lines);
    if text.is_empty() {
        warn!(
            action = "strip",
            component = "header_stripper",
            input = ?input,
            "No content found between Gutenberg markers"
        );
    }
    save_text(output, &text)?;

    info!(
        action = "complete",
        component = "dataset_prep",
        output = ?output,
        duration_ms = start_time.elapsed().as_millis(),
        "Dataset prepared"
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const START: &str = "*** START OF PROJECT GUTENBERG EBOOK TITLE ***";
    const END: &str = "*** END OF PROJECT GUTENBERG EBOOK TITLE ***";

    #[test]
    fn load_text_strips_line_endings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("book.txt");
        fs::write(&path, "line1\nline2\r\nline3\n").unwrap();

        assert_eq!(load_text(&path).unwrap(), vec!["line1", "line2", "line3"]);
    }

    #[test]
    fn load_text_handles_empty_and_single_line_files() {
        let temp = TempDir::new().unwrap();
        let empty = temp.path().join("empty.txt");
        let single = temp.path().join("single.txt");
        fs::write(&empty, "").unwrap();
        fs::write(&single, "single line").unwrap();

        assert!(load_text(&empty).unwrap().is_empty());
        assert_eq!(load_text(&single).unwrap(), vec!["single line"]);
    }

    #[test]
    fn load_text_reads_unicode() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("unicode.txt");
        fs::write(&path, "héllo wörld\nünicode tëst\n").unwrap();

        assert_eq!(load_text(&path).unwrap(), vec!["héllo wörld", "ünicode tëst"]);
    }

    #[test]
    fn load_text_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_text(&temp.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn save_text_writes_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");

        save_text(&path, "héllo wörld\nünicode tëst").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "héllo wörld\nünicode tëst");

        save_text(&path, "").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn strips_gutenberg_wrapper() {
        let lines = [
            "Some header text",
            START,
            "Title: Book Title",
            "Author: Book Author",
            "",
            "Chapter 1",
            "This is the actual content",
            "",
            "Chapter 2",
            "Even more content",
            END,
            "Some footer text",
        ];

        assert_eq!(
            strip_headers(&lines),
            "Title: Book Title\nAuthor: Book Author\n\nChapter 1\nThis is the actual content\n\nChapter 2\nEven more content"
        );
    }

    #[test]
    fn missing_markers_yield_nothing() {
        assert_eq!(strip_headers(&["Line 1", "Line 2", "Line 3"]), "");
        assert_eq!(strip_headers(&["Header", START, "Content", "No end marker"]), "");
        assert_eq!(strip_headers(&["Header", "Content", END, "Footer"]), "");
        assert_eq!(strip_headers::<&str>(&[]), "");
    }

    #[test]
    fn end_marker_before_start_is_ignored() {
        assert_eq!(strip_headers(&[END, "junk", START, "content"]), "");
        assert_eq!(strip_headers(&[END, START, "content", END]), "content");
    }

    #[test]
    fn blank_body_yields_nothing() {
        assert_eq!(strip_headers(&["Header", START, END, "Footer"]), "");
        assert_eq!(strip_headers(&["Header", START, "   ", "\t", "", END, "Footer"]), "");
    }

    #[test]
    fn only_first_marker_pair_is_used() {
        let lines = [
            START,
            "  Content 1",
            "Content 2  ",
            END,
            START,
            "Second book",
            END,
        ];
        assert_eq!(strip_headers(&lines), "Content 1\nContent 2");
    }

    #[test]
    fn strips_older_this_style_wrapper() {
        let lines = [
            "The Project Gutenberg EBook of Pride and Prejudice",
            "*** START OF THIS PROJECT GUTENBERG EBOOK PRIDE AND PREJUDICE ***",
            "It is a truth universally acknowledged",
            "*** END OF THIS PROJECT GUTENBERG EBOOK PRIDE AND PREJUDICE ***",
        ];
        assert_eq!(strip_headers(&lines), "It is a truth universally acknowledged");
    }

    #[test]
    fn prepare_dataset_writes_stripped_text() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("raw.txt");
        let output = temp.path().join("processed.txt");
        fs::write(&input, format!("header\n{START}\nbody text\n{END}\nfooter\n")).unwrap();

        let text = prepare_dataset(&input, &output).unwrap();
        assert_eq!(text, "body text");
        assert_eq!(fs::read_to_string(&output).unwrap(), "body text");
    }

    #[test]
    fn prepare_dataset_writes_empty_output_without_markers() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("raw.txt");
        let output = temp.path().join("processed.txt");
        fs::write(&input, "no markers here\n").unwrap();

        assert_eq!(prepare_dataset(&input, &output).unwrap(), "");
        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }
}
