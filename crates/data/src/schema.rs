use bingo_core::{RawRecord, RngState, TitleRules};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_DELIMITER_INPUT: &str = "-, (, [, <, >, \", :";
pub const DEFAULT_NUM_CARDS: usize = 16;
pub const DEFAULT_PAGE_TITLE: &str = "Playlist Bingo";

/// User-facing run settings. Every field is optional in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Comma-separated delimiter characters.
    pub delimiters: String,
    pub trim_first: bool,
    pub num_cards: usize,
    pub page_title: String,
    pub show_artists: bool,
    pub seed: Option<u64>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITER_INPUT.to_string(),
            trim_first: true,
            num_cards: DEFAULT_NUM_CARDS,
            page_title: DEFAULT_PAGE_TITLE.to_string(),
            show_artists: true,
            seed: None,
        }
    }
}

impl RunSettings {
    pub fn title_rules(&self) -> TitleRules {
        TitleRules::new(
            TitleRules::parse_delimiters(&self.delimiters),
            self.trim_first,
        )
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.num_cards == 0 {
            anyhow::bail!("num_cards must be at least 1");
        }
        Ok(())
    }

    /// Seeded from the settings when present, otherwise from entropy.
    pub fn rng(&self) -> RngState {
        match self.seed {
            Some(seed) => RngState::from_seed(seed),
            None => RngState::from_entropy(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportArtist {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportTrack {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Option<Vec<ExportArtist>>,
}

/// One playlist entry. `track` is null for removed or unavailable entries.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportEntry {
    #[serde(default)]
    pub track: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportPage {
    pub items: Vec<ExportEntry>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExportPayload {
    Pages(Vec<ExportPage>),
    Page(ExportPage),
    Entries(Vec<ExportEntry>),
}

impl ExportPayload {
    pub fn into_entries(self) -> Vec<ExportEntry> {
        match self {
            Self::Pages(pages) => pages.into_iter().flat_map(|page| page.items).collect(),
            Self::Page(page) => page.items,
            Self::Entries(entries) => entries,
        }
    }
}

impl ExportEntry {
    pub fn to_record(&self) -> RawRecord {
        if self.track.is_null() {
            return RawRecord::Removed;
        }
        let track: ExportTrack = match serde_json::from_value(self.track.clone()) {
            Ok(track) => track,
            Err(err) => {
                return RawRecord::Malformed {
                    reason: format!("unreadable track: {err}"),
                }
            }
        };
        let Some(title) = track.name else {
            return RawRecord::Malformed {
                reason: "track has no name".to_string(),
            };
        };
        let Some(artists) = track.artists else {
            return RawRecord::Malformed {
                reason: format!("track '{title}' has no artist list"),
            };
        };
        let mut names = Vec::with_capacity(artists.len());
        for artist in artists {
            match artist.name {
                Some(name) => names.push(name),
                None => {
                    return RawRecord::Malformed {
                        reason: format!("track '{title}' has an unnamed artist"),
                    }
                }
            }
        }
        RawRecord::Present {
            title,
            artists: names,
        }
    }
}
