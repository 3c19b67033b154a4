// Integration tests for alias resolution and multi-file aggregation.
use boardfile::error::Error;
use boardfile::store::BoardStore;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

// RAII guard for a unique scratch directory holding board files.
struct BoardDir {
    root: PathBuf,
}

impl BoardDir {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("boardfile_test_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&root).expect("failed to create test dir");
        Self { root }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, content).expect("failed to write board file");
        path
    }
}

impl Drop for BoardDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn store(files: Vec<PathBuf>, aliases: &[(&str, &str)]) -> BoardStore {
    let aliases: HashMap<String, String> = aliases
        .iter()
        .map(|(a, c)| (a.to_string(), c.to_string()))
        .collect();
    BoardStore::new(files, aliases, "UTC").unwrap()
}

#[test]
fn alias_resolves_across_files() {
    let dir = BoardDir::new();
    let work = dir.write("work.md", "# Website\n## Backlog\n* redesign\n");
    let billing = dir.write(
        "billing.md",
        "# Billing System\n## 🏃 Doing\n* invoice batching\n",
    );

    let store = store(vec![work, billing], &[("billing", "Billing System")]);
    let projects = store.get_projects(&["billing".to_string()]).unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name(), "Billing System");
}

#[test]
fn unknown_name_is_not_found_with_inputs_named() {
    let dir = BoardDir::new();
    let file = dir.write("work.md", "# Website\n## Backlog\n* redesign\n");

    let store = store(vec![file], &[]);
    let err = store
        .get_projects(&["nope".to_string(), "also-nope".to_string()])
        .unwrap_err();
    match err {
        Error::NotFound { names } => assert_eq!(names, ["nope", "also-nope"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn matches_in_every_file_are_all_returned() {
    let dir = BoardDir::new();
    let a = dir.write("a.md", "# Twin\n## First\n* one\n");
    let b = dir.write("b.md", "# Twin\n## Second\n* two\n");

    let store = store(vec![a, b], &[]);
    let projects = store.get_projects(&["Twin".to_string()]).unwrap();
    // Two same-named instances, in file order; never merged.
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].phases()[0].name(), "First");
    assert_eq!(projects[1].phases()[0].name(), "Second");
}

#[test]
fn get_all_projects_preserves_file_then_in_file_order() {
    let dir = BoardDir::new();
    let a = dir.write("a.md", "# Zeta\n## P\n* t\n# Alpha\n## P\n* t\n");
    let b = dir.write("b.md", "# Mid\n## P\n* t\n");

    let store = store(vec![a, b], &[]);
    let names: Vec<String> = store
        .get_all_projects()
        .unwrap()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
}

#[test]
fn missing_file_propagates_as_io_error_with_path() {
    let dir = BoardDir::new();
    let gone = dir.root.join("missing.md");

    let store = store(vec![gone.clone()], &[]);
    match store.get_all_projects().unwrap_err() {
        Error::Io { path, .. } => assert_eq!(path, gone),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fatal_error_in_any_file_fails_the_whole_call() {
    let dir = BoardDir::new();
    let good = dir.write("good.md", "# Fine\n## Backlog\n* ok\n");
    let bad = dir.write("bad.md", "## Orphan phase\n");

    let store = store(vec![good, bad], &[]);
    // No partial results: the healthy first file does not rescue the call.
    assert!(matches!(
        store.get_all_projects().unwrap_err(),
        Error::Structure { .. }
    ));
}

#[test]
fn filtered_call_skips_broken_unrequested_projects() {
    let dir = BoardDir::new();
    let file = dir.write(
        "mixed.md",
        "# Broken\n## Phase\n* t\n  * @due (never)\n# Wanted\n## Phase\n* t\n",
    );

    let store = store(vec![file.clone()], &[]);
    let projects = store.get_projects(&["Wanted".to_string()]).unwrap();
    assert_eq!(projects.len(), 1);

    // The same content fails once the broken project is requested too.
    let store = BoardStore::new(vec![file], HashMap::new(), "UTC").unwrap();
    assert!(matches!(
        store
            .get_projects(&["Wanted".to_string(), "Broken".to_string()])
            .unwrap_err(),
        Error::Directive { .. }
    ));
}

#[test]
fn unknown_timezone_fails_at_construction() {
    assert!(matches!(
        BoardStore::new(Vec::new(), HashMap::new(), "Nowhere/Special"),
        Err(Error::UnknownTimezone { .. })
    ));
}

#[test]
fn end_to_end_scheduled_board() {
    let dir = BoardDir::new();
    let file = dir.write(
        "alpha.md",
        "# Alpha\n## 🗓️ Scheduled\n* Ship release\n  * @due (25-02-01)\n  * @tags urgent\n",
    );

    let store = store(vec![file], &[]);
    let projects = store.get_projects(&["Alpha".to_string()]).unwrap();
    assert_eq!(projects.len(), 1);

    let alpha = &projects[0];
    let phase = &alpha.phases()[0];
    assert_eq!(phase.name(), "🗓️ Scheduled");
    assert_eq!(phase.status().to_string(), "scheduled");

    let task = &phase.tasks()[0];
    assert_eq!(task.title(), "Ship release");
    assert_eq!(task.tags(), ["urgent"]);
    assert_eq!(
        task.due(),
        Some(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap())
    );
    assert!(task.active_reminders().is_empty());

    let warnings = alpha.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Ship release"));
}
