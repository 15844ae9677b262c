// File-backed progress persistence.

use egg_hunt_words::badges::{BadgeSink, MEMORY_KING};
use egg_hunt_words::progress::{Progress, ProgressError, ProgressStore};
use egg_hunt_words::session::Session;
use egg_hunt_words::words::Grade;

#[test]
fn missing_file_loads_empty_progress()
{
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ProgressStore::new(dir.path().join("none.json"));
    assert_eq!(store.load().expect("load"), Progress::default());
}

#[test]
fn session_progress_survives_a_restart()
{
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ProgressStore::new(dir.path().join("nested").join("progress.json"));

    let mut session = Session::from_progress(store.load().expect("load"));
    session.select_grade(Grade::Middle);
    session.select_scene("museum");
    session.reveal_egg(3);
    session.badges().award(MEMORY_KING);
    store.save(&session.to_progress()).expect("save");

    let restored = Session::from_progress(store.load().expect("reload"));
    assert_eq!(restored.score(), 10);
    assert_eq!(restored.found_count(), 1);
    assert!(restored.badges().contains(MEMORY_KING));
}

#[test]
fn reads_the_flat_record_layout()
{
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("progress.json");
    std::fs::write(
        &path,
        r#"{"score":40,"foundEggs":["park-0","park-1"],"badges":["word-master"]}"#,
    )
    .expect("write");
    let progress = ProgressStore::new(&path).load().expect("load");
    assert_eq!(progress.score, 40);
    assert_eq!(progress.found_eggs.len(), 2);
    assert!(progress.badges.contains("word-master"));
}

#[test]
fn corrupt_file_is_a_serialization_error()
{
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("progress.json");
    std::fs::write(&path, "{not json").expect("write");
    let result = ProgressStore::new(&path).load();
    assert!(matches!(result, Err(ProgressError::Serialize(_))));
}

#[test]
fn clear_removes_the_file_and_tolerates_absence()
{
    let dir = tempfile::tempdir().expect("tempdir");
    let store = ProgressStore::new(dir.path().join("progress.json"));
    store.save(&Progress::default()).expect("save");
    store.clear().expect("clear");
    assert!(!store.path().exists());
    store.clear().expect("second clear");
}
