//! Whole-workflow tests: select, persist, resolve, apply, observe
//!
//! The engine is replaced by an in-memory fake so these tests run without
//! a container runtime.

use pretty_assertions::assert_eq;
use stack_core::{Catalog, Document, Reconciler, ResourceKind, Resolver, Selection};
use stack_engine::{EngineQuery, LiveState, PollReport, Poller, Result, write_compose_file};
use stack_fs::NormalizedPath;
use stack_test_utils::TestStore;
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

/// Engine fake reporting whatever the test last told it.
#[derive(Default)]
struct FakeEngine {
    containers: Mutex<String>,
    volumes: Mutex<String>,
}

impl FakeEngine {
    fn run(&self, containers: &str) {
        *self.containers.lock().unwrap() = containers.to_string();
    }

    fn create_volume(&self, volumes: &str) {
        *self.volumes.lock().unwrap() = volumes.to_string();
    }
}

impl EngineQuery for FakeEngine {
    fn list(&self, kind: ResourceKind) -> Result<String> {
        Ok(match kind {
            ResourceKind::Container => self.containers.lock().unwrap().clone(),
            ResourceKind::Network => String::new(),
            ResourceKind::Volume => self.volumes.lock().unwrap().clone(),
        })
    }
}

fn store() -> TestStore {
    TestStore::new()
        .base(
            "db",
            "postgres",
            "services:\n  pg:\n    image: postgres:16\n    container_name: pg-main\n",
        )
        .addon(
            "db",
            "postgres",
            "storage",
            "volumes:\n  pgdata:\n    name: pg-data\n",
        )
        .base("web", "nginx", "services:\n  web:\n    image: nginx\n")
}

fn discover(store: &TestStore) -> Catalog {
    Catalog::discover(&NormalizedPath::new(store.fragments_dir())).unwrap()
}

#[test]
fn selection_survives_a_restart() {
    let store = store();
    let state_path = NormalizedPath::new(store.state_file());
    let catalog = discover(&store);

    let mut selection = Selection::new();
    selection.set_enabled("db", "postgres", true);
    selection.set_addon("db", "postgres", "storage", true);
    selection.set_enabled("gone", "option", true);
    selection.prune(&catalog);
    selection.save(&state_path).unwrap();

    let reloaded = Selection::load(&state_path).unwrap();
    assert!(reloaded.is_enabled("db", "postgres"));
    assert!(reloaded.is_addon_active("db", "postgres", "storage"));
    assert!(!reloaded.is_enabled("gone", "option"));
    assert!(!reloaded.is_enabled("web", "nginx"));
}

#[test]
fn compose_file_carries_global_document() {
    let store = store();
    store.write_state(&[("db", "postgres", &["storage"][..]), ("web", "nginx", &[][..])]);
    let catalog = discover(&store);
    let selection = Selection::load(&NormalizedPath::new(store.state_file())).unwrap();

    let global = Resolver::new(&catalog, &selection).global();
    let file = write_compose_file(&global).unwrap();
    let written = Document::parse(&std::fs::read_to_string(file.path()).unwrap()).unwrap();

    assert_eq!(written, global);
    let yaml = global.to_yaml().unwrap();
    assert!(yaml.contains("pg-main"));
    assert!(yaml.contains("pg-data"));
    assert!(yaml.contains("nginx"));
}

#[test]
fn liveness_follows_engine_changes() {
    let store = store();
    store.enable("db", "postgres", &["storage"]);
    let catalog = discover(&store);
    let selection = Selection::load(&NormalizedPath::new(store.state_file())).unwrap();

    let engine = Arc::new(FakeEngine::default());
    let state = Arc::new(LiveState::new());
    let (tx, rx) = mpsc::channel();
    let handle = Poller::spawn(
        Arc::clone(&state),
        Arc::clone(&engine),
        Duration::from_secs(3600),
        move |report: &PollReport| {
            let _ = tx.send(report.is_complete());
        },
    )
    .unwrap();

    let live = |state: &LiveState| -> Vec<(String, bool)> {
        Reconciler::new(Resolver::new(&catalog, &selection), state)
            .liveness()
            .into_iter()
            .map(|(option, live)| (option.reference().to_string(), live))
            .collect()
    };

    assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
    assert_eq!(
        live(&*state),
        vec![("db/postgres".into(), false), ("web/nginx".into(), false)]
    );

    // Only the volume of the active addon exists
    engine.create_volume("pg-data\n");
    assert!(handle.refresh());
    assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
    assert_eq!(
        live(&*state),
        vec![("db/postgres".into(), true), ("web/nginx".into(), false)]
    );

    engine.create_volume("");
    engine.run("web\n");
    assert!(handle.refresh());
    assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
    assert_eq!(
        live(&*state),
        vec![("db/postgres".into(), false), ("web/nginx".into(), true)]
    );

    handle.stop();
}

#[test]
fn broken_option_does_not_block_the_rest() {
    let store = store().fragment("cache", "broken", "base.yaml", "services: [unclosed\n");
    store.write_state(&[("cache", "broken", &[][..]), ("web", "nginx", &[][..])]);
    let catalog = discover(&store);
    let selection = Selection::load(&NormalizedPath::new(store.state_file())).unwrap();

    let resolver = Resolver::new(&catalog, &selection);
    let broken = catalog.option("cache", "broken").unwrap();
    assert!(resolver.resolve(broken).is_err());

    let global = resolver.global();
    assert!(global.to_yaml().unwrap().contains("nginx"));
}
