//! Golden-file tests against the fragment tree in test-fixtures/stacks
//!
//! The fixture store is only read; selections live in temporary state.

use pretty_assertions::assert_eq;
use stack_core::{
    Catalog, Document, ResourceKind, ResourceNames, Resolver, Selection, extract_names,
    image_names,
};
use stack_fs::NormalizedPath;
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

fn catalog() -> Catalog {
    Catalog::discover(&NormalizedPath::new(fixtures().join("stacks"))).unwrap()
}

fn expected(name: &str) -> Document {
    let content = std::fs::read_to_string(fixtures().join("expected").join(name)).unwrap();
    Document::parse(&content).unwrap()
}

/// db/postgres and web/nginx enabled, both with their network addon.
fn networked_selection() -> Selection {
    let mut selection = Selection::new();
    for (category, option) in [("db", "postgres"), ("web", "nginx")] {
        selection.set_enabled(category, option, true);
        selection.set_addon(category, option, "network", true);
    }
    selection
}

#[test]
fn discovers_fixture_store_in_order() {
    let catalog = catalog();

    let options: Vec<String> = catalog.options().map(|o| o.reference().to_string()).collect();
    assert_eq!(
        options,
        vec!["db/postgres", "db/redis", "ml/jupyter", "web/nginx"]
    );

    let postgres = catalog.option("db", "postgres").unwrap();
    let addons: Vec<&str> = postgres.addons().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(addons, vec!["network"]);
    assert!(catalog.option("db", "redis").unwrap().addons().is_empty());
}

#[test]
fn global_document_matches_golden() {
    let catalog = catalog();
    let selection = networked_selection();

    let global = Resolver::new(&catalog, &selection).global();
    assert_eq!(global, expected("global.yaml"));
}

#[test]
fn global_output_is_stable() {
    let catalog = catalog();
    let selection = networked_selection();
    let resolver = Resolver::new(&catalog, &selection);

    assert_eq!(
        resolver.global().to_yaml().unwrap(),
        resolver.global().to_yaml().unwrap()
    );
}

#[test]
fn inactive_addon_leaves_base_untouched() {
    let catalog = catalog();
    let mut selection = Selection::new();
    selection.set_enabled("ml", "jupyter", true);

    let jupyter = catalog.option("ml", "jupyter").unwrap();
    let resolver = Resolver::new(&catalog, &selection);
    let plain = resolver.resolve(jupyter).unwrap();
    assert!(!plain.to_yaml().unwrap().contains("nvidia"));

    selection.set_addon("ml", "jupyter", "gpu", true);
    let resolver = Resolver::new(&catalog, &selection);
    let with_gpu = resolver.resolve(jupyter).unwrap();
    assert!(with_gpu.to_yaml().unwrap().contains("nvidia"));
}

#[test]
fn names_of_global_document() {
    let catalog = catalog();
    let selection = networked_selection();
    let global = Resolver::new(&catalog, &selection).global();

    let names = ResourceNames::of(&global);
    let list = |kind| names.get(kind).iter().cloned().collect::<Vec<_>>();
    assert_eq!(list(ResourceKind::Container), vec!["stack-nginx", "stack-postgres"]);
    assert_eq!(list(ResourceKind::Network), vec!["stack-backend"]);
    assert_eq!(list(ResourceKind::Volume), vec!["stack-pgdata"]);

    let images: Vec<_> = image_names(&global).into_iter().collect();
    assert_eq!(images, vec!["nginx:1.27", "postgres:16"]);
}

#[test]
fn unnamed_service_falls_back_to_key() {
    let catalog = catalog();
    let selection = Selection::new();
    let redis = catalog.option("db", "redis").unwrap();

    let document = Resolver::new(&catalog, &selection).resolve(redis).unwrap();
    let containers: Vec<_> = extract_names(&document, ResourceKind::Container)
        .into_iter()
        .collect();
    assert_eq!(containers, vec!["redis"]);
}
