use crate::{wrap, wrap_clipped, ReportError};
use bingo_core::{Analysis, Card, Deck, Heatmap, Item, GRID_SIZE};
use std::fs;
use std::path::Path;

pub const PAGE_BREAK: &str = "\n\u{c}\n";
pub const CELL_WIDTH: usize = 16;
pub const TITLE_LINES: usize = 3;
pub const ARTIST_LINES: usize = 1;
pub const COLUMN_LABELS: [&str; GRID_SIZE] = ["B", "I", "N", "G", "O"];

const PAGE_WIDTH: usize = 1 + GRID_SIZE * (CELL_WIDTH + 3);
const KEY_WIDTH: usize = 44;
const COVER_HEADING: &str = "Playlist Bingo";
const COVER_NOTE: &[&str] = &[
    "Duplicate detection:",
    "",
    "Each cell counts how many times a grid position held a track it had",
    "already held on an earlier card. Higher values mean that position",
    "repeats more often across the deck.",
    "",
    "The centre of every card is the FREE space and is never counted.",
];

/// Paginated plain-text rendering of a deck: cover with the duplicate
/// heatmap, the per-track statistics table, then one page per card.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    pub deck: &'a Deck,
    pub analysis: &'a Analysis,
    pub page_title: &'a str,
    pub show_artists: bool,
}

impl<'a> Document<'a> {
    pub fn new(
        deck: &'a Deck,
        analysis: &'a Analysis,
        page_title: &'a str,
        show_artists: bool,
    ) -> Self {
        Self {
            deck,
            analysis,
            page_title,
            show_artists,
        }
    }

    pub fn pages(&self) -> Vec<String> {
        let mut pages = Vec::with_capacity(self.deck.len() + 2);
        pages.push(self.cover_page());
        pages.push(self.table_page());
        for (index, card) in self.deck.iter().enumerate() {
            pages.push(self.card_page(index, card));
        }
        pages
    }

    pub fn render(&self) -> String {
        self.pages().join(PAGE_BREAK)
    }

    fn cover_page(&self) -> String {
        let mut lines = vec![
            centered(COVER_HEADING),
            centered("Duplicate Detection Analysis"),
            String::new(),
        ];
        lines.extend(heatmap_lines(&self.analysis.heatmap));
        lines.push(String::new());
        lines.extend(COVER_NOTE.iter().map(|line| line.to_string()));
        lines.join("\n")
    }

    fn table_page(&self) -> String {
        let mut lines = vec![
            centered("Track Distribution"),
            String::new(),
            format!(
                "{:<key$} {:>5} {:>7} {:>3} {:>7} {:>7} {:>10}",
                "Track",
                "Freq",
                "PosFreq",
                "Dup",
                "MaxFreq",
                "Dist%",
                "Randomness",
                key = KEY_WIDTH
            ),
        ];
        for (key, stats) in &self.analysis.stats {
            lines.push(format!(
                "{:<key_width$} {:>5} {:>7} {:>3} {:>7} {:>7.3} {:>10.3}",
                clip(key, KEY_WIDTH),
                stats.freq,
                stats.pos_freq,
                stats.dup,
                stats.max_freq,
                stats.dist_percent,
                stats.randomness_score,
                key_width = KEY_WIDTH
            ));
        }
        let duplicates = self
            .analysis
            .stats
            .values()
            .filter(|stats| stats.dup > 0)
            .count();
        lines.push(String::new());
        lines.push(format!(
            "cards: {}  tracks: {}  repeat placements: {}  intra-card duplicates: {}",
            self.analysis.num_cards,
            self.analysis.stats.len(),
            self.analysis.total_repeats,
            duplicates
        ));
        lines.join("\n")
    }

    fn card_page(&self, index: usize, card: &Card) -> String {
        let border = grid_border();
        let mut lines = vec![
            centered(self.page_title),
            centered(&format!("Card {} of {}", index + 1, self.deck.len())),
            String::new(),
            border.clone(),
        ];
        for row in card.rows() {
            let cells: Vec<Vec<String>> = row.iter().map(|item| self.cell_lines(item)).collect();
            let height = cells.iter().map(Vec::len).max().unwrap_or(0);
            for line in 0..height {
                let mut text = String::from("|");
                for cell in &cells {
                    let value = cell.get(line).map(String::as_str).unwrap_or("");
                    text.push_str(&format!(" {:^width$} |", value, width = CELL_WIDTH));
                }
                lines.push(text);
            }
            lines.push(border.clone());
        }
        lines.join("\n")
    }

    fn cell_lines(&self, item: &Item) -> Vec<String> {
        let mut lines: Vec<String> = wrap(&item.title, CELL_WIDTH)
            .into_iter()
            .take(TITLE_LINES)
            .collect();
        lines.resize(TITLE_LINES, String::new());
        if self.show_artists {
            let mut artist = wrap_clipped(&item.artist, CELL_WIDTH, ARTIST_LINES);
            artist.resize(ARTIST_LINES, String::new());
            lines.extend(artist);
        }
        lines
    }
}

pub fn render_text(deck: &Deck, analysis: &Analysis, page_title: &str, show_artists: bool) -> String {
    Document::new(deck, analysis, page_title, show_artists).render()
}

pub fn write_text(path: &Path, body: &str) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)?;
    Ok(())
}

/// Heatmap as a labelled grid: columns B I N G O, rows 1 to 5.
pub fn heatmap_lines(heatmap: &Heatmap) -> Vec<String> {
    let mut header = format!("{:>6}", "");
    for label in COLUMN_LABELS {
        header.push_str(&format!("{:>6}", label));
    }
    let mut lines = vec![header];
    for (row, values) in heatmap.iter().enumerate() {
        let mut line = format!("{:>6}", row + 1);
        for value in values {
            line.push_str(&format!("{:>6}", value));
        }
        lines.push(line);
    }
    lines
}

fn grid_border() -> String {
    let mut border = String::from("+");
    for _ in 0..GRID_SIZE {
        border.push_str(&"-".repeat(CELL_WIDTH + 2));
        border.push('+');
    }
    border
}

fn centered(text: &str) -> String {
    format!("{:^width$}", text, width = PAGE_WIDTH)
        .trim_end()
        .to_string()
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
