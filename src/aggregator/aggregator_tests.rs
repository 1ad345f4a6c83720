use super::*;

fn p(raw: &str) -> AssetPath {
    AssetPath::new(raw)
}

fn paths(raw: &[&str]) -> Vec<AssetPath> {
    raw.iter().map(|r| p(r)).collect()
}

fn sample() -> UnusedIndex {
    UnusedIndex::rebuild(paths(&["B/z.png", "A/x.png", "A/y.png", "top.png"]), None)
}

// =============================================================================
// Rebuild Tests
// =============================================================================

#[test]
fn rebuild_keeps_flat_order_and_groups_by_parent() {
    let index = sample();

    assert_eq!(index.flat(), paths(&["B/z.png", "A/x.png", "A/y.png", "top.png"]));
    assert_eq!(index.assets_in(&p("A")), paths(&["A/x.png", "A/y.png"]));
    assert_eq!(index.assets_in(&p("B")), paths(&["B/z.png"]));
    assert_eq!(index.assets_in(&p("")), paths(&["top.png"]));
    assert!(index.is_consistent());
}

#[test]
fn folder_keys_are_sorted() {
    let index = sample();
    let keys: Vec<&str> = index.by_folder().keys().map(AssetPath::as_str).collect();
    assert_eq!(keys, vec!["", "A", "B"]);
}

#[test]
fn rebuild_selects_smallest_folder_without_previous_selection() {
    let index = UnusedIndex::rebuild(paths(&["B/z.png", "A/x.png"]), None);
    assert_eq!(index.selection(), Some(&p("A")));
    assert_eq!(index.selected_assets(), paths(&["A/x.png"]));
}

#[test]
fn rebuild_keeps_previous_selection_when_present() {
    let index = UnusedIndex::rebuild(paths(&["B/z.png", "A/x.png"]), Some(&p("B")));
    assert_eq!(index.selection(), Some(&p("B")));
}

#[test]
fn rebuild_resets_stale_selection() {
    let index = UnusedIndex::rebuild(paths(&["B/z.png", "C/w.png"]), Some(&p("A")));
    assert_eq!(index.selection(), Some(&p("B")));
}

#[test]
fn rebuild_empty_has_no_selection() {
    let index = UnusedIndex::rebuild(Vec::new(), Some(&p("A")));
    assert!(index.is_empty());
    assert!(index.selection().is_none());
    assert!(index.selected_assets().is_empty());
    assert!(index.is_consistent());
}

// =============================================================================
// Selection Tests
// =============================================================================

#[test]
fn select_known_folder() {
    let mut index = sample();
    assert_eq!(index.select(&p("B")), Some(&p("B")));
    assert_eq!(index.selected_assets(), paths(&["B/z.png"]));
}

#[test]
fn select_unknown_folder_clears_selection() {
    let mut index = sample();
    assert!(index.select(&p("Nope")).is_none());
    assert!(index.selection().is_none());
    assert!(index.is_consistent());
}

// =============================================================================
// Removal Tests
// =============================================================================

#[test]
fn remove_patches_flat_and_bucket() {
    let mut index = sample();
    assert!(index.remove(&p("A/x.png")));

    assert_eq!(index.flat(), paths(&["B/z.png", "A/y.png", "top.png"]));
    assert_eq!(index.assets_in(&p("A")), paths(&["A/y.png"]));
    assert!(!index.contains(&p("A/x.png")));
    assert!(index.is_consistent());
}

#[test]
fn remove_last_asset_drops_folder() {
    let mut index = sample();
    assert!(index.remove(&p("B/z.png")));

    assert!(!index.by_folder().contains_key(&p("B")));
    assert!(index.is_consistent());
}

#[test]
fn remove_last_asset_of_selected_folder_moves_selection() {
    let mut index = sample();
    index.select(&p("B"));
    index.remove(&p("B/z.png"));

    assert_eq!(index.selection(), Some(&p("")));
    assert!(index.is_consistent());
}

#[test]
fn remove_unknown_path_changes_nothing() {
    let mut index = sample();
    let before = index.clone();

    assert!(!index.remove(&p("A/missing.png")));
    assert!(!index.remove(&p("Z/missing.png")));
    assert_eq!(index, before);
}

#[test]
fn removing_everything_empties_index() {
    let mut index = sample();
    for path in paths(&["B/z.png", "A/x.png", "A/y.png", "top.png"]) {
        assert!(index.remove(&path));
        assert!(index.is_consistent());
    }
    assert!(index.is_empty());
    assert!(index.by_folder().is_empty());
    assert!(index.selection().is_none());
}

// =============================================================================
// Listing Tests
// =============================================================================

#[test]
fn folders_report_depth_and_count() {
    let index = UnusedIndex::rebuild(
        paths(&["Assets/Art/a.png", "Assets/Art/b.png", "Assets/c.png"]),
        None,
    );
    let folders = index.folders();

    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0].key, p("Assets"));
    assert_eq!(folders[0].depth, 0);
    assert_eq!(folders[0].asset_count, 1);
    assert_eq!(folders[1].key, p("Assets/Art"));
    assert_eq!(folders[1].depth, 1);
    assert_eq!(folders[1].asset_count, 2);
}

#[test]
fn inconsistent_index_is_detected() {
    let mut index = sample();
    index.flat.push(p("A/ghost.png"));
    assert!(!index.is_consistent());
}
