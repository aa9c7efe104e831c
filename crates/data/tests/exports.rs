use bingo_core::{BingoEngine, EngineError, RawRecord, RngState};
use bingo_data::{load_playlist_export, load_settings, PoolCache, RunSettings};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_file(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "bingo_data_test_{}_{}_{}.json",
        tag,
        std::process::id(),
        nanos
    ))
}

fn entry(title: &str, artists: &[&str]) -> String {
    let artists: Vec<String> = artists
        .iter()
        .map(|name| format!(r#"{{"name":"{name}"}}"#))
        .collect();
    format!(
        r#"{{"track":{{"name":"{title}","artists":[{}]}}}}"#,
        artists.join(",")
    )
}

fn export_pages(tracks: usize) -> String {
    let mut entries: Vec<String> = (0..tracks)
        .map(|i| entry(&format!("Song {i} - 2019 Remaster"), &["Band", "Guest"]))
        .collect();
    entries.push(r#"{"track":null}"#.to_string());
    entries.push(r#"{"track":{"artists":[]}}"#.to_string());
    let half = entries.len() / 2;
    format!(
        r#"[{{"items":[{}],"next":"page-2"}},{{"items":[{}],"next":null}}]"#,
        entries[..half].join(","),
        entries[half..].join(",")
    )
}

#[test]
fn export_file_feeds_the_engine() {
    let path = unique_temp_file("export");
    std::fs::write(&path, export_pages(30)).expect("write");
    let records = load_playlist_export(&path).expect("load");
    assert_eq!(records.len(), 32);
    assert!(records.contains(&RawRecord::Removed));

    let settings = RunSettings {
        num_cards: 8,
        seed: Some(99),
        ..RunSettings::default()
    };
    let engine = BingoEngine::new(settings.title_rules(), settings.num_cards);
    let run = engine.run(records, &mut settings.rng()).expect("run");
    assert_eq!(run.seed, 99);
    assert_eq!(run.pool.len(), 30);
    assert_eq!(run.pool_report.removed, 1);
    assert_eq!(run.pool_report.malformed, 1);
    assert_eq!(run.deck.len(), 8);
    assert!(run.analysis.dup_free());
    assert!(run
        .pool
        .items()
        .iter()
        .all(|item| !item.title.contains("Remaster") && item.artist == "Band, Guest"));
    let _ = std::fs::remove_file(path);
}

#[test]
fn missing_export_reports_the_path() {
    let path = unique_temp_file("missing");
    let err = load_playlist_export(&path).expect_err("missing file");
    assert!(format!("{err:#}").contains(&path.display().to_string()));
}

#[test]
fn settings_file_round_trip() {
    let path = unique_temp_file("settings");
    std::fs::write(
        &path,
        r#"{"delimiters":"(, [","trim_first":false,"num_cards":32,"page_title":"Office Party","show_artists":false,"seed":5}"#,
    )
    .expect("write");
    let settings = load_settings(&path).expect("settings");
    assert_eq!(settings.num_cards, 32);
    assert_eq!(settings.page_title, "Office Party");
    assert!(!settings.show_artists);
    let rules = settings.title_rules();
    assert_eq!(rules.delimiters, vec!['(', '[']);
    assert!(!rules.trim_first);
    assert_eq!(rules.normalize("Song - Live (Remix)"), "Song - Live");
    let _ = std::fs::remove_file(path);
}

#[test]
fn invalid_settings_file_is_rejected() {
    let path = unique_temp_file("bad_settings");
    std::fs::write(&path, r#"{"num_cards":0}"#).expect("write");
    assert!(load_settings(&path).is_err());
    let _ = std::fs::remove_file(path);
}

#[test]
fn cached_pool_is_reused_across_runs() {
    let path = unique_temp_file("cached");
    std::fs::write(&path, export_pages(30)).expect("write");
    let settings = RunSettings {
        num_cards: 3,
        ..RunSettings::default()
    };
    let rules = settings.title_rules();
    let source = path.display().to_string();
    let mut cache = PoolCache::new();
    let mut loads = 0;
    for seed in [100u64, 101] {
        let mut rng = RngState::from_seed(seed);
        let cached = cache
            .pool_for_run(&source, &rules, &mut rng, || {
                loads += 1;
                load_playlist_export(&path)
            })
            .expect("pool");
        let engine = BingoEngine::new(rules.clone(), settings.num_cards);
        let run = engine
            .run_with_pool(cached.pool, cached.report, &mut rng)
            .expect("run");
        assert_eq!(run.seed, seed);

        let records = load_playlist_export(&path).expect("load");
        let replay = engine
            .run(records, &mut RngState::from_seed(run.seed))
            .expect("replay");
        assert_eq!(replay.pool, run.pool);
        assert_eq!(replay.deck, run.deck);
    }
    assert_eq!(loads, 1);
    let _ = std::fs::remove_file(path);
}

#[test]
fn too_small_export_is_surfaced() {
    let path = unique_temp_file("small");
    std::fs::write(&path, export_pages(10)).expect("write");
    let records = load_playlist_export(&path).expect("load");
    let engine = BingoEngine::new(RunSettings::default().title_rules(), 16);
    let err = engine
        .run(records, &mut RngState::from_seed(1))
        .expect_err("too small");
    assert_eq!(
        err,
        EngineError::InsufficientItems {
            found: 10,
            required: 24
        }
    );
    let _ = std::fs::remove_file(path);
}
