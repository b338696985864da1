//! Recording a live session and reading it back

use hulu_brawl::config::GameConfig;
use hulu_brawl::entity::EntityKind;
use hulu_brawl::game::GameSession;
use hulu_brawl::input::{InputSnapshot, InputState, Key};
use hulu_brawl::recording::{FORMAT_HEADER, read_frames};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

const DT: f32 = 1.0 / 60.0;

fn recording_files(dir: &std::path::Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect()
}

#[test]
fn test_record_key_captures_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GameConfig::default();
    config.recording.directory = Some(dir.path().to_path_buf());
    let mut session = GameSession::with_seed(config, 99);

    let mut input = InputState::new();
    input.key_down(Key::ToggleRecording);
    session.update(DT, &input.snapshot());
    assert!(session.is_recording());

    input.begin_frame();
    input.key_up(Key::ToggleRecording);
    for _ in 0..60 {
        session.update(DT, &input.snapshot());
        input.begin_frame();
    }

    input.key_down(Key::ToggleRecording);
    session.update(DT, &input.snapshot());
    assert!(!session.is_recording());

    let files = recording_files(dir.path());
    assert_eq!(files.len(), 1);

    let contents = fs::read_to_string(&files[0]).unwrap();
    assert_eq!(contents.lines().next(), Some(FORMAT_HEADER));

    let parsed = read_frames(BufReader::new(File::open(&files[0]).unwrap())).unwrap();
    assert_eq!(parsed.skipped, 0);
    // Just over one simulated second at 0.02 s per line
    assert!(
        (49..=51).contains(&parsed.frames.len()),
        "{} frames",
        parsed.frames.len()
    );

    // Elapsed time is cumulative
    for pair in parsed.frames.windows(2) {
        assert!(pair[0].elapsed < pair[1].elapsed);
    }

    let first = &parsed.frames[0];
    let count = |kind: EntityKind| first.entities.iter().filter(|e| e.kind == kind).count();
    assert_eq!(count(EntityKind::Player), 1);
    assert_eq!(count(EntityKind::EnemySoldier), 6);
    assert_eq!(count(EntityKind::Neutral), 3);
}

#[test]
fn test_unwritable_directory_disables_recording() {
    let dir = tempfile::tempdir().unwrap();
    // A file where the directory should be
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let mut config = GameConfig::default();
    config.recording.directory = Some(blocker);
    let mut session = GameSession::with_seed(config, 1);

    assert!(!session.toggle_recording());
    session.update(DT, &InputSnapshot::empty());
    assert!(!session.is_recording());
}
