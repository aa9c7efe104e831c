use bingo_core::{
    analyze, build_pool, generate_deck, Card, Deck, Item, RawRecord, RngState, TitleRules,
    FREE_TITLE,
};
use bingo_report::{
    render_text, write_json, write_text, AnalysisReport, Document, CELL_WIDTH, PAGE_BREAK,
};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn sample_deck(cards: usize, seed: u64) -> Deck {
    let records = (0..30).map(|i| {
        RawRecord::present(
            format!("Song Number {i} With A Rather Long Title Indeed"),
            vec!["The Band With The Extremely Long Name", "Guest"],
        )
    });
    let mut rng = RngState::from_seed(seed);
    let pool = build_pool(records, &TitleRules::default(), &mut rng)
        .expect("pool")
        .pool;
    generate_deck(&pool, cards, &mut rng).expect("deck")
}

fn unique_temp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "bingo_report_test_{}_{}.{}",
        std::process::id(),
        nanos,
        ext
    ))
}

#[test]
fn one_page_per_card_after_cover_and_table() {
    let deck = sample_deck(3, 1);
    let analysis = analyze(&deck);
    let body = render_text(&deck, &analysis, "Friday Quiz", true);
    let pages: Vec<&str> = body.split(PAGE_BREAK).collect();
    assert_eq!(pages.len(), 5);
    assert!(pages[0].contains("Duplicate Detection Analysis"));
    assert!(pages[1].contains("Randomness"));
    for (index, page) in pages[2..].iter().enumerate() {
        assert!(page.contains("Friday Quiz"));
        assert!(page.contains(&format!("Card {} of 3", index + 1)));
        assert!(page.contains(FREE_TITLE));
    }
}

#[test]
fn cell_text_stays_inside_the_grid() {
    let deck = sample_deck(1, 2);
    let analysis = analyze(&deck);
    let document = Document::new(&deck, &analysis, "Title", true);
    let card_page = &document.pages()[2];
    let grid: Vec<&str> = card_page
        .lines()
        .filter(|line| line.starts_with('|') || line.starts_with('+'))
        .collect();
    let width = grid[0].chars().count();
    assert!(grid.iter().all(|line| line.chars().count() == width));
    // 5 rows of (3 title + 1 artist) lines plus 6 borders.
    assert_eq!(grid.len(), 5 * 4 + 6);
    assert!(card_page.contains("The Band With..."));
    assert!(card_page
        .lines()
        .filter(|line| line.starts_with('|'))
        .flat_map(|line| line.split('|'))
        .all(|cell| cell.chars().count() <= CELL_WIDTH + 2));
}

#[test]
fn hiding_artists_drops_the_artist_line() {
    let deck = sample_deck(1, 3);
    let analysis = analyze(&deck);
    let page = Document::new(&deck, &analysis, "Title", false).pages()[2].clone();
    assert!(!page.contains("The Band"));
    let grid_lines = page.lines().filter(|line| line.starts_with('|')).count();
    assert_eq!(grid_lines, 5 * 3);
}

#[test]
fn table_lists_every_track() {
    let cells: Vec<Item> = (0..24).map(|i| Item::new(format!("T{i}"), "A")).collect();
    let card = Card::from_draw(cells).expect("card");
    let deck = Deck::new(vec![card.clone(), card]);
    let analysis = analyze(&deck);
    let table = &Document::new(&deck, &analysis, "t", true).pages()[1];
    for i in 0..24 {
        assert!(table.contains(&format!("T{i} - A")));
    }
    assert!(table.contains("repeat placements: 24"));
    assert!(table.contains("intra-card duplicates: 0"));
}

#[test]
fn json_and_text_reports_are_written() {
    let deck = sample_deck(4, 4);
    let analysis = analyze(&deck);
    let report = AnalysisReport::new(4, 30, &analysis);
    assert!(report.dup_free);

    let json_path = unique_temp_file("json");
    write_json(&json_path, &report).expect("write json");
    let loaded: AnalysisReport =
        serde_json::from_str(&std::fs::read_to_string(&json_path).expect("read")).expect("parse");
    assert_eq!(loaded, report);

    let text_path = unique_temp_file("txt");
    let body = render_text(&deck, &analysis, "t", true);
    write_text(&text_path, &body).expect("write text");
    assert_eq!(std::fs::read_to_string(&text_path).expect("read"), body);

    let _ = std::fs::remove_file(json_path);
    let _ = std::fs::remove_file(text_path);
}
