use serde::{Deserialize, Serialize};

pub const DEFAULT_DELIMITERS: &[char] = &['-', '(', '[', '<', '>', '"', ':'];

/// How raw titles are cut down before they become identity keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleRules {
    pub delimiters: Vec<char>,
    /// Kept for settings compatibility. Both values currently truncate at the
    /// first delimiter.
    pub trim_first: bool,
}

impl Default for TitleRules {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.to_vec(),
            trim_first: true,
        }
    }
}

impl TitleRules {
    pub fn new(delimiters: Vec<char>, trim_first: bool) -> Self {
        let mut rules = Self {
            delimiters: Vec::new(),
            trim_first,
        };
        for delimiter in delimiters {
            rules.push_delimiter(delimiter);
        }
        rules
    }

    /// Parses comma-separated delimiter input such as `"-, (, ["`.
    ///
    /// Every non-whitespace character of an entry is a delimiter on its own.
    pub fn parse_delimiters(input: &str) -> Vec<char> {
        let mut rules = Self::new(Vec::new(), true);
        for entry in input.split(',') {
            for ch in entry.trim().chars().filter(|ch| !ch.is_whitespace()) {
                rules.push_delimiter(ch);
            }
        }
        rules.delimiters
    }

    fn push_delimiter(&mut self, delimiter: char) {
        if !self.delimiters.contains(&delimiter) {
            self.delimiters.push(delimiter);
        }
    }

    pub fn normalize(&self, title: &str) -> String {
        normalize_title(title, &self.delimiters, self.trim_first)
    }
}

/// Trims `title` and cuts it at the first delimiter, if any.
// TODO: decide whether trim_first=false should cut at the last delimiter;
// until then both values cut at the first one.
pub fn normalize_title(title: &str, delimiters: &[char], _trim_first: bool) -> String {
    let title = title.trim();
    let kept = title
        .find(|ch: char| delimiters.contains(&ch))
        .map_or(title, |at| &title[..at]);
    kept.trim().to_string()
}

pub fn join_artists<S: AsRef<str>>(artists: &[S]) -> String {
    artists
        .iter()
        .map(|name| name.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `normalized title + " - " + artists joined in source order`.
pub fn identity_key<S: AsRef<str>>(normalized_title: &str, artists: &[S]) -> String {
    format!("{} - {}", normalized_title, join_artists(artists))
}
