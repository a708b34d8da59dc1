//! Candidate text pool for card sampling.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::CardError;

/// Ordered list of candidate cell values, one per non-blank source line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<String>,
}

impl Corpus {
    /// Build a corpus from raw text. Blank and whitespace-only lines are
    /// skipped; surviving entries are trimmed.
    pub fn from_text(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    /// Build a corpus from already separated entries, applying the same
    /// blank filtering as [`Corpus::from_text`].
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    /// Read a corpus file. A missing or unreadable file is reported as
    /// [`CardError::CorpusUnavailable`].
    pub fn load(path: &Path) -> Result<Self, CardError> {
        let text = fs::read_to_string(path).map_err(|source| CardError::CorpusUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_text(&text);
        debug!(path = %path.display(), entries = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Insert a line break wherever a lowercase letter is directly followed by an
/// uppercase one. Repairs corpora pasted from sources that dropped newlines
/// (`"Best PictureBest Actor"` becomes two lines).
pub fn split_case_boundaries(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        out.push(ch);
        if ch.is_lowercase() && chars.peek().is_some_and(|next| next.is_uppercase()) {
            out.push('\n');
        }
    }
    out
}

/// Join a line onto its predecessor (with a single space) when it starts with
/// a lowercase letter. Undoes over-eager splitting of entries such as
/// `"Best Actor in a\nsupporting role"`.
pub fn join_continuations(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = String::with_capacity(text.len());
    for (idx, line) in lines.iter().enumerate() {
        out.push_str(line);
        let Some(next) = lines.get(idx + 1) else {
            break;
        };
        if next.chars().next().is_some_and(char::is_lowercase) {
            out.push(' ');
        } else {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_lines_are_skipped_and_entries_trimmed() {
        let corpus = Corpus::from_text("alpha\n\n   \n  beta  \r\ngamma\n");
        assert_eq!(corpus.entries(), &["alpha", "beta", "gamma"]);
    }

    #[test]
    fn empty_text_yields_empty_corpus() {
        assert!(Corpus::from_text("").is_empty());
        assert!(Corpus::from_entries(["", "  "]).is_empty());
    }

    #[test]
    fn missing_file_is_corpus_unavailable() {
        let err = Corpus::load(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, CardError::CorpusUnavailable { .. }));
    }

    #[test]
    fn case_boundaries_become_line_breaks() {
        assert_eq!(
            split_case_boundaries("Best PictureBest DirectorOpening Monologue"),
            "Best Picture\nBest Director\nOpening Monologue"
        );
        assert_eq!(split_case_boundaries("NASA rocks"), "NASA rocks");
    }

    #[test]
    fn lowercase_lines_join_their_predecessor() {
        let text = "Someone thanks their\nagent\nPlayoff music\nstarts early";
        assert_eq!(
            join_continuations(text),
            "Someone thanks their agent\nPlayoff music starts early"
        );
    }
}
