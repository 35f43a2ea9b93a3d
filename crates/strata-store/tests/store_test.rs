//! Version engine behavior against the in-memory backend.

use std::sync::Arc;

use strata_core::{ConfigDocument, ConfigKey, Format};
use strata_store::{ConfigStore, MemoryProvider, Pagination, RepoProvider, StoreError};

const PROJECT: &str = "payments";

fn setup() -> (Arc<MemoryProvider>, ConfigStore) {
    let provider = Arc::new(MemoryProvider::with_branches([PROJECT]));
    let store = ConfigStore::new(provider.clone());
    (provider, store)
}

fn key(name: &str) -> ConfigKey {
    ConfigKey::new(PROJECT, name, Format::Json)
}

fn doc(json: &str) -> ConfigDocument {
    serde_json::from_str(json).unwrap()
}

#[tokio::test]
async fn create_assigns_version_one() {
    let (provider, store) = setup();
    let outcome = store
        .create(&key("database"), &doc(r#"{"host": "db1"}"#), None)
        .await
        .unwrap();

    assert_eq!(outcome.version, 1);

    let commits = provider
        .list_commits("payments/database.json", PROJECT)
        .await
        .unwrap();
    assert_eq!(
        commits[0].message,
        "Create configuration 'database' [Version 1]"
    );
}

#[tokio::test]
async fn create_twice_is_already_exists() {
    let (_, store) = setup();
    let k = key("database");
    store.create(&k, &doc("{}"), None).await.unwrap();

    let err = store.create(&k, &doc("{}"), None).await.unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(_)));
}

#[tokio::test]
async fn create_in_missing_project_is_not_found() {
    let (_, store) = setup();
    let k = ConfigKey::new("ghost", "app", Format::Json);
    let err = store.create(&k, &doc("{}"), None).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn updates_number_sequentially_with_no_gaps() {
    let (_, store) = setup();
    let k = key("app");
    store.create(&k, &doc(r#"{"v": 1}"#), None).await.unwrap();

    // Caller-supplied messages must not disturb the numbering.
    for (expected, message) in [
        (2, Some("tweak the timeouts".to_string())),
        (3, None),
        (4, Some("rollout [stage two]".to_string())),
    ] {
        let outcome = store
            .update(&k, &doc(&format!(r#"{{"v": {expected}}}"#)), message)
            .await
            .unwrap();
        assert_eq!(outcome.version, expected);
    }
}

#[tokio::test]
async fn update_over_untagged_history_starts_at_one() {
    let (provider, store) = setup();
    // A file that was imported by hand, outside this system.
    provider
        .create_file("payments/app.json", PROJECT, "imported manually", "{}")
        .await
        .unwrap();

    let outcome = store.update(&key("app"), &doc(r#"{"v": 1}"#), None).await.unwrap();
    assert_eq!(outcome.version, 1);
}

#[tokio::test]
async fn update_missing_config_is_not_found() {
    let (_, store) = setup();
    let err = store
        .update(&key("ghost"), &doc("{}"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn versions_are_listed_newest_first() {
    let (_, store) = setup();
    let k = key("app");
    store.create(&k, &doc(r#"{"v": 1}"#), None).await.unwrap();
    store.update(&k, &doc(r#"{"v": 2}"#), None).await.unwrap();

    let page = store
        .list_versions(&k, Pagination { skip: 0, limit: 10 })
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    let numbers: Vec<u64> = page.versions.iter().map(|v| v.version).collect();
    assert_eq!(numbers, [2, 1]);
    assert_eq!(
        page.versions[1].content.get("v").unwrap().as_i64(),
        Some(1)
    );
}

#[tokio::test]
async fn untagged_commits_count_toward_total_but_are_not_versions() {
    let (provider, store) = setup();
    provider
        .create_file("payments/app.json", PROJECT, "imported manually", "{}")
        .await
        .unwrap();
    store.update(&key("app"), &doc(r#"{"v": 1}"#), None).await.unwrap();

    let page = store
        .list_versions(&key("app"), Pagination::DEFAULT)
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.versions.len(), 1);
    assert_eq!(page.versions[0].version, 1);
}

#[tokio::test]
async fn undecodable_entries_are_dropped_not_fatal() {
    let (provider, store) = setup();
    let k = key("app");
    store.create(&k, &doc(r#"{"v": 1}"#), None).await.unwrap();

    // A tagged commit whose content does not parse as JSON.
    let sha = provider
        .get_file("payments/app.json", PROJECT)
        .await
        .unwrap()
        .sha;
    provider
        .update_file(
            "payments/app.json",
            PROJECT,
            "broken write [Version 9]",
            "{definitely not json",
            &sha,
        )
        .await
        .unwrap();

    let page = store.list_versions(&k, Pagination::DEFAULT).await.unwrap();
    assert_eq!(page.total, 2);
    let numbers: Vec<u64> = page.versions.iter().map(|v| v.version).collect();
    assert_eq!(numbers, [1]);
}

#[tokio::test]
async fn next_version_trusts_the_newest_tag_even_after_garbage() {
    let (provider, store) = setup();
    let k = key("app");
    store.create(&k, &doc(r#"{"v": 1}"#), None).await.unwrap();

    let sha = provider
        .get_file("payments/app.json", PROJECT)
        .await
        .unwrap()
        .sha;
    provider
        .update_file(
            "payments/app.json",
            PROJECT,
            "external write [Version 9]",
            r#"{"v": 9}"#,
            &sha,
        )
        .await
        .unwrap();

    // Known risk, preserved: the single newest tag wins, so the sequence
    // jumps to 10 instead of continuing from 2.
    let outcome = store.update(&k, &doc(r#"{"v": 10}"#), None).await.unwrap();
    assert_eq!(outcome.version, 10);
}

#[tokio::test]
async fn pagination_bounds_are_rejected_before_any_backend_call() {
    let (provider, store) = setup();
    let err = store
        .list_versions(&key("app"), Pagination { skip: 0, limit: 0 })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidPagination(_)));

    let err = store
        .list_versions(&key("app"), Pagination { skip: 0, limit: 101 })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidPagination(_)));

    // The config does not even exist; rejection happened first.
    assert_eq!(provider.commit_count(PROJECT), 0);
}

#[tokio::test]
async fn skip_past_the_end_gives_an_empty_page() {
    let (_, store) = setup();
    let k = key("app");
    store.create(&k, &doc("{}"), None).await.unwrap();

    let page = store
        .list_versions(&k, Pagination { skip: 5, limit: 10 })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert!(page.versions.is_empty());
}

#[tokio::test]
async fn recover_restores_exact_bytes_and_bumps_the_version() {
    let (provider, store) = setup();
    let k = key("app");
    store.create(&k, &doc(r#"{"v": 1}"#), None).await.unwrap();
    let original_text = provider
        .get_file("payments/app.json", PROJECT)
        .await
        .unwrap()
        .content;

    store.update(&k, &doc(r#"{"v": 2}"#), None).await.unwrap();
    store.update(&k, &doc(r#"{"v": 3}"#), None).await.unwrap();

    let outcome = store.recover(&k, 1, None).await.unwrap();
    assert_eq!(outcome.original_version, 1);
    assert_eq!(outcome.new_version, 4);

    // The restored content is the historical text, byte for byte.
    let restored = provider
        .get_file("payments/app.json", PROJECT)
        .await
        .unwrap()
        .content;
    assert_eq!(restored, original_text);

    // The original entry is still in history, untouched.
    let page = store
        .list_versions(&k, Pagination { skip: 0, limit: 10 })
        .await
        .unwrap();
    let numbers: Vec<u64> = page.versions.iter().map(|v| v.version).collect();
    assert_eq!(numbers, [4, 3, 2, 1]);
}

#[tokio::test]
async fn recover_missing_version_mutates_nothing() {
    let (provider, store) = setup();
    let k = key("app");
    store.create(&k, &doc("{}"), None).await.unwrap();
    let commits_before = provider.commit_count(PROJECT);

    let err = store.recover(&k, 42, None).await.unwrap_err();
    assert!(matches!(err, StoreError::VersionNotFound(42)));
    assert_eq!(provider.commit_count(PROJECT), commits_before);
}

#[tokio::test]
async fn recover_uses_a_default_restore_message() {
    let (provider, store) = setup();
    let k = key("app");
    store.create(&k, &doc(r#"{"v": 1}"#), None).await.unwrap();
    store.update(&k, &doc(r#"{"v": 2}"#), None).await.unwrap();
    store.recover(&k, 1, None).await.unwrap();

    let commits = provider
        .list_commits("payments/app.json", PROJECT)
        .await
        .unwrap();
    assert_eq!(
        commits[0].message,
        "Restore configuration 'app' to version 1 [Version 3]"
    );
}

#[tokio::test]
async fn stale_precondition_token_conflicts_instead_of_overwriting() {
    let (provider, store) = setup();
    let k = key("app");
    store.create(&k, &doc(r#"{"v": 1}"#), None).await.unwrap();

    // Two writers read the same state; the first one wins.
    let stale = provider
        .get_file("payments/app.json", PROJECT)
        .await
        .unwrap()
        .sha;
    store.update(&k, &doc(r#"{"v": 2}"#), None).await.unwrap();

    let err = provider
        .update_file(
            "payments/app.json",
            PROJECT,
            "late write [Version 2]",
            r#"{"v": 99}"#,
            &stale,
        )
        .await
        .unwrap_err();
    let err: StoreError = err.into();
    assert!(err.is_conflict());

    // The winner's write is intact.
    let current = store.read(&k).await.unwrap();
    assert_eq!(current.get("v").unwrap().as_i64(), Some(2));
}

#[tokio::test]
async fn delete_then_recreate_restarts_numbering_at_one() {
    let (_, store) = setup();
    let k = key("app");
    store.create(&k, &doc(r#"{"v": 1}"#), None).await.unwrap();
    store.update(&k, &doc(r#"{"v": 2}"#), None).await.unwrap();
    store.update(&k, &doc(r#"{"v": 3}"#), None).await.unwrap();

    store.delete(&k, None).await.unwrap();
    assert!(matches!(
        store.read(&k).await.unwrap_err(),
        StoreError::NotFound(_)
    ));

    // Documented quirk: the counter does not survive deletion.
    let outcome = store.create(&k, &doc(r#"{"v": 1}"#), None).await.unwrap();
    assert_eq!(outcome.version, 1);
    let outcome = store.update(&k, &doc(r#"{"v": 2}"#), None).await.unwrap();
    assert_eq!(outcome.version, 2);
}

#[tokio::test]
async fn delete_commit_is_never_tagged() {
    let (provider, store) = setup();
    let k = key("app");
    store.create(&k, &doc("{}"), None).await.unwrap();
    store.delete(&k, None).await.unwrap();

    let commits = provider
        .list_commits("payments/app.json", PROJECT)
        .await
        .unwrap();
    assert_eq!(commits[0].message, "Delete configuration 'app'");
    assert_eq!(strata_core::extract_version(&commits[0].message), None);
}

#[tokio::test]
async fn list_configs_reports_raw_extensions() {
    let (provider, store) = setup();
    store
        .create(&key("database"), &doc("{}"), None)
        .await
        .unwrap();
    store
        .create(
            &ConfigKey::new(PROJECT, "cache", Format::Toml),
            &doc(r#"{"ttl": 60}"#),
            None,
        )
        .await
        .unwrap();
    // A file no codec claims still shows up in the listing.
    provider
        .create_file("payments/notes.txt", PROJECT, "scratch", "hello")
        .await
        .unwrap();

    let mut configs = store
        .list_configs(&strata_core::Project::new(PROJECT))
        .await
        .unwrap();
    configs.sort_by(|a, b| a.name.cmp(&b.name));

    let summary: Vec<(String, String)> = configs
        .into_iter()
        .map(|c| (c.name, c.format))
        .collect();
    assert_eq!(
        summary,
        [
            ("cache".to_string(), "toml".to_string()),
            ("database".to_string(), "json".to_string()),
            ("notes".to_string(), "txt".to_string()),
        ]
    );
}

#[tokio::test]
async fn template_configs_roundtrip_through_the_store() {
    let (provider, store) = setup();
    let k = ConfigKey::new(PROJECT, "nginx", Format::Jinja2);
    let source = "server {{ host }}:{{ port }};\n";

    let mut document = ConfigDocument::new();
    document.insert("template", source);
    store.create(&k, &document, None).await.unwrap();

    // Stored verbatim.
    let stored = provider
        .get_file("payments/nginx.jinja2", PROJECT)
        .await
        .unwrap();
    assert_eq!(stored.content, source);

    // Read back with the variables recomputed.
    let read = store.read(&k).await.unwrap();
    assert_eq!(read.get("template").unwrap().as_str(), Some(source));
    let vars: Vec<&str> = read
        .get("variables")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(vars, ["host", "port"]);
}
