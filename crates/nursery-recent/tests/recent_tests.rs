use std::fs;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use nursery_core::config::RecentConfig;
use nursery_core::error::{Error, Result};
use nursery_core::traits::KeyValueStore;
use nursery_recent::{JsonFileStore, MemoryStore, RecentSearches, DEFAULT_KEY};

struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>> { Err(Error::Storage("disk on fire".into())) }
    fn set(&self, _key: &str, _value: &str) -> Result<()> { Err(Error::Storage("disk on fire".into())) }
    fn remove(&self, _key: &str) -> Result<()> { Err(Error::Storage("disk on fire".into())) }
}

#[test]
fn save_moves_repeats_to_front_without_duplicates() {
    let recent = RecentSearches::new(MemoryStore::new());
    recent.save("x");
    recent.save("y");
    recent.save("x");

    assert_eq!(recent.load(), ["x", "y"]);
}

#[test]
fn dedup_is_case_sensitive() {
    let recent = RecentSearches::new(MemoryStore::new());
    recent.save("Mānuka");
    recent.save("mānuka");
    assert_eq!(recent.load(), ["mānuka", "Mānuka"]);
}

#[test]
fn keeps_ten_most_recent() {
    let recent = RecentSearches::new(MemoryStore::new());
    for n in 0..11 {
        recent.save(&format!("query {n}"));
    }
    let loaded = recent.load();
    assert_eq!(loaded.len(), 10);
    assert_eq!(loaded[0], "query 10");
    assert_eq!(loaded[9], "query 1");
    assert!(!loaded.contains(&"query 0".to_string()));
}

#[test]
fn over_long_stored_list_is_cut_to_capacity() {
    let store = MemoryStore::new();
    let stored: Vec<String> = (0..15).map(|n| format!("q{n}")).collect();
    store.set(DEFAULT_KEY, &serde_json::to_string(&stored).unwrap()).unwrap();
    let recent = RecentSearches::new(store);

    assert_eq!(recent.load(), &stored[..10]);

    recent.save("x");
    let loaded = recent.load();
    assert_eq!(loaded.len(), 10);
    assert_eq!(loaded[0], "x");
    assert_eq!(loaded[1..].to_vec(), stored[..9].to_vec());
}

#[test]
fn saved_queries_are_trimmed_before_dedup() {
    let recent = RecentSearches::new(MemoryStore::new());
    recent.save("x");
    recent.save("y");
    recent.save("  x ");

    assert_eq!(recent.load(), ["x", "y"]);
}

#[test]
fn blank_queries_are_not_recorded() {
    let recent = RecentSearches::new(MemoryStore::new());
    recent.save("   ");
    recent.save("");
    assert!(recent.load().is_empty());
    assert_eq!(recent.store().get(DEFAULT_KEY).unwrap(), None);
}

#[test]
fn malformed_entries_load_as_empty() {
    let store = MemoryStore::new();
    store.set(DEFAULT_KEY, "{\"not\": \"a list\"}").unwrap();
    let recent = RecentSearches::new(store);
    assert!(recent.load().is_empty());

    recent.save("tōtara");
    assert_eq!(recent.load(), ["tōtara"], "a save replaces the malformed entry");
}

#[test]
fn backend_failures_are_swallowed() {
    let recent = RecentSearches::new(BrokenStore);
    recent.save("harakeke");
    recent.clear();
    assert!(recent.load().is_empty());
}

#[test]
fn config_controls_key_and_capacity() {
    let config = RecentConfig { store_path: String::new(), key: "greenhouse.history".into(), capacity: 2 };
    let recent = RecentSearches::from_config(MemoryStore::new(), &config);
    recent.save("a");
    recent.save("b");
    recent.save("c");

    assert_eq!(recent.load(), ["c", "b"]);
    assert!(recent.store().get("greenhouse.history").unwrap().is_some());
    assert_eq!(recent.store().get(DEFAULT_KEY).unwrap(), None);
}

#[test]
fn json_file_store_persists_across_instances() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("state/recent.json");

    RecentSearches::new(JsonFileStore::new(&path)).save("MAN-2024");
    RecentSearches::new(JsonFileStore::new(&path)).save("kōwhai");

    let recent = RecentSearches::new(JsonFileStore::new(&path));
    assert_eq!(recent.load(), ["kōwhai", "MAN-2024"]);

    recent.clear();
    assert!(recent.load().is_empty());
    assert!(path.exists(), "clearing rewrites the file rather than deleting it");
}

#[test]
fn json_file_store_tolerates_missing_and_corrupt_files() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("recent.json");

    let recent = RecentSearches::new(JsonFileStore::new(&path));
    assert!(recent.load().is_empty(), "missing file");

    fs::write(&path, "not json at all").unwrap();
    assert!(recent.load().is_empty(), "corrupt file");
    assert!(recent.store().get(DEFAULT_KEY).is_err(), "the raw store still reports the problem");

    recent.save("puka");
    assert_eq!(recent.load(), ["puka"]);
}

#[test]
fn json_file_store_keeps_other_keys() {
    let tmp = TempDir::new().unwrap();
    let store = JsonFileStore::new(tmp.path().join("kv.json"));
    store.set("theme", "dark").unwrap();
    store.set("layout", "grid").unwrap();
    store.remove("layout").unwrap();

    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(store.get("layout").unwrap(), None);
}
