use super::*;
use std::path::PathBuf;

#[test]
fn track_display_name_is_file_stem() {
    let t = Track::new(PathBuf::from("/music/rock/Blue_Moon.mp3"));
    assert_eq!(t.display_name, "Blue_Moon");

    // Only the final extension is stripped.
    let t = Track::new(PathBuf::from("/music/Take.Five.flac"));
    assert_eq!(t.display_name, "Take.Five");
}

#[test]
fn track_search_key_covers_name_file_name_and_directory() {
    let t = Track::new(PathBuf::from("/music/Best-Of/Blue_Moon.mp3"));
    assert!(t.search_key.contains("blue moon"));
    assert!(t.search_key.contains("blue moon.mp3"));
    assert!(t.search_key.contains("best of"));
}

#[test]
fn add_is_idempotent_per_path() {
    let mut lib = Library::new();
    assert!(lib.add(PathBuf::from("/music/a.mp3")));
    assert_eq!(lib.count(), 1);

    assert!(!lib.add(PathBuf::from("/music/a.mp3")));
    assert_eq!(lib.count(), 1);

    assert!(lib.add(PathBuf::from("/music/b.mp3")));
    assert_eq!(lib.count(), 2);
}

#[test]
fn all_enumerates_every_added_track() {
    let mut lib = Library::new();
    lib.add(PathBuf::from("/music/a.mp3"));
    lib.add(PathBuf::from("/music/b.mp3"));

    let paths: Vec<_> = lib.all().iter().map(|t| t.path.clone()).collect();
    assert!(paths.contains(&PathBuf::from("/music/a.mp3")));
    assert!(paths.contains(&PathBuf::from("/music/b.mp3")));
}
