use crate::schema::{ExportPayload, RunSettings};
use anyhow::Context;
use bingo_core::RawRecord;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Reads a playlist export and flattens it into records, pages in order.
pub fn load_playlist_export(path: &Path) -> anyhow::Result<Vec<RawRecord>> {
    let payload: ExportPayload = load_json(path)?;
    let records = parse_entries(payload);
    tracing::debug!(path = %path.display(), records = records.len(), "playlist export loaded");
    Ok(records)
}

pub fn parse_playlist_export(raw: &str) -> anyhow::Result<Vec<RawRecord>> {
    let payload: ExportPayload = serde_json::from_str(raw).context("parse playlist export")?;
    Ok(parse_entries(payload))
}

fn parse_entries(payload: ExportPayload) -> Vec<RawRecord> {
    payload
        .into_entries()
        .iter()
        .map(|entry| entry.to_record())
        .collect()
}

pub fn load_settings(path: &Path) -> anyhow::Result<RunSettings> {
    let settings: RunSettings = load_json(path)?;
    settings
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(settings)
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

fn playlist_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:spotify:playlist:|playlist/)([A-Za-z0-9]+)").expect("valid regex")
    })
}

/// Pulls the playlist id out of a share URL or `spotify:playlist:` URI.
pub fn extract_playlist_id(source: &str) -> Option<String> {
    playlist_pattern()
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

/// Cache identity of a source: its playlist id when one is present.
pub fn source_key(source: &str) -> String {
    extract_playlist_id(source).unwrap_or_else(|| source.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_playlist_ids() {
        assert_eq!(
            extract_playlist_id("https://open.spotify.com/playlist/0So85N4Wfnw98d0FC9sDaR?si=abc")
                .as_deref(),
            Some("0So85N4Wfnw98d0FC9sDaR")
        );
        assert_eq!(
            extract_playlist_id("spotify:playlist:37i9dQZF1DX").as_deref(),
            Some("37i9dQZF1DX")
        );
        assert_eq!(extract_playlist_id("https://example.com/album/xyz"), None);
    }

    #[test]
    fn source_key_falls_back_to_trimmed_input() {
        assert_eq!(
            source_key("https://open.spotify.com/playlist/abc123?si=1"),
            "abc123"
        );
        assert_eq!(source_key("  exports/party.json "), "exports/party.json");
    }

    #[test]
    fn parses_all_export_shapes() {
        let entries = r#"[{"track":null},{"track":{"name":"A","artists":[{"name":"X"}]}}]"#;
        let page = r#"{"items":[{"track":{"name":"A","artists":[{"name":"X"}]}}],"next":null}"#;
        let pages = r#"[
            {"items":[{"track":{"name":"A","artists":[{"name":"X"}]}}],"next":"page2"},
            {"items":[{"track":{"name":"B","artists":[{"name":"Y"}]}},{"track":null}],"next":null}
        ]"#;
        assert_eq!(parse_playlist_export(entries).expect("entries").len(), 2);
        assert_eq!(parse_playlist_export(page).expect("page").len(), 1);
        let flattened = parse_playlist_export(pages).expect("pages");
        assert_eq!(
            flattened,
            vec![
                RawRecord::present("A", vec!["X"]),
                RawRecord::present("B", vec!["Y"]),
                RawRecord::Removed,
            ]
        );
    }

    #[test]
    fn rejects_non_export_json() {
        assert!(parse_playlist_export(r#"{"tracks": 3}"#).is_err());
    }
}
