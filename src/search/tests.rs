use super::*;
use crate::library::Library;
use std::path::PathBuf;

fn library_of(paths: &[&str]) -> Library {
    let mut lib = Library::new();
    for p in paths {
        lib.add(PathBuf::from(p));
    }
    lib
}

#[test]
fn normalize_lowercases_and_maps_separators_to_spaces() {
    assert_eq!(normalize("Blue_Moon"), "blue moon");
    assert_eq!(normalize("Best-Of-2020"), "best of 2020");
    assert_eq!(normalize("  A \t B\n C  "), "a b c");
}

#[test]
fn normalize_is_idempotent() {
    for t in ["", "  ", "Blue_Moon", "a-b_c  d", "ÉTÉ - remix"] {
        let once = normalize(t);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn tokenize_drops_empty_tokens() {
    assert_eq!(tokenize("  blue   moon "), vec!["blue", "moon"]);
    assert!(tokenize("").is_empty());
    assert!(tokenize(" _-_ ").is_empty());
}

#[test]
fn empty_query_matches_every_track() {
    let lib = library_of(&["/m/b.mp3", "/m/a.mp3", "/m/c.mp3"]);
    let index = SearchIndex::new();
    let view = index.filtered_view(&lib);
    assert_eq!(view.len(), 3);
}

#[test]
fn filtered_view_is_sorted_by_display_name_case_insensitive() {
    let lib = library_of(&["/m/banana.mp3", "/m/Apple.mp3", "/m/cherry.mp3"]);
    let index = SearchIndex::new();
    let view = index.filtered_view(&lib);

    let names: Vec<_> = view.iter().map(|t| t.display_name.as_str()).collect();
    assert_eq!(names, vec!["Apple", "banana", "cherry"]);
}

#[test]
fn filtered_view_breaks_display_name_ties_by_path() {
    let lib = library_of(&["/m/two/song.mp3", "/m/one/song.mp3"]);
    let index = SearchIndex::new();
    let view = index.filtered_view(&lib);

    assert_eq!(view.get(0).unwrap().path, PathBuf::from("/m/one/song.mp3"));
    assert_eq!(view.get(1).unwrap().path, PathBuf::from("/m/two/song.mp3"));
}

#[test]
fn multi_token_query_requires_all_tokens() {
    let lib = library_of(&["/m/Blue Moon.mp3", "/m/Blue Sky.mp3"]);
    let mut index = SearchIndex::new();
    index.set_query("blue moon");

    let view = index.filtered_view(&lib);
    assert_eq!(view.len(), 1);
    assert_eq!(view.get(0).unwrap().display_name, "Blue Moon");
}

#[test]
fn query_matches_directory_components() {
    let lib = library_of(&["/m/Best-Of/track01.mp3", "/m/Other/track02.mp3"]);
    let mut index = SearchIndex::new();
    index.set_query("best of");

    let view = index.filtered_view(&lib);
    assert_eq!(view.len(), 1);
    assert_eq!(view.get(0).unwrap().display_name, "track01");
}

#[test]
fn query_is_normalized_like_the_search_key() {
    let lib = library_of(&["/m/Blue_Moon.mp3"]);
    let mut index = SearchIndex::new();

    // Underscores and case in the query must not matter.
    index.set_query("BLUE_moon");
    assert_eq!(index.filtered_view(&lib).len(), 1);

    index.set_query("blue   moon");
    assert_eq!(index.filtered_view(&lib).len(), 1);

    index.set_query("green");
    assert!(index.filtered_view(&lib).is_empty());
}

#[test]
fn position_of_reports_visible_row() {
    let lib = library_of(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);
    let index = SearchIndex::new();
    let view = index.filtered_view(&lib);

    assert_eq!(view.position_of(&PathBuf::from("/m/b.mp3")), Some(1));
    assert_eq!(view.position_of(&PathBuf::from("/m/zz.mp3")), None);
}
