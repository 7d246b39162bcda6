//! Tests for option and global resolution

use stack_core::{
    Catalog, Category, Document, Error, FragmentLoader, OptionDef, Resolver, Result, Selection,
    parse_fragment,
};
use stack_fs::NormalizedPath;
use stack_test_utils::TestStore;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory fragments that records every location it is asked for.
#[derive(Default)]
struct RecordingLoader {
    fragments: BTreeMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl RecordingLoader {
    fn with(mut self, path: &str, yaml: &str) -> Self {
        self.fragments.insert(path.to_string(), yaml.to_string());
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl FragmentLoader for RecordingLoader {
    fn load(&self, location: &NormalizedPath) -> Result<Document> {
        self.requested.borrow_mut().push(location.as_str().to_string());
        let text = self
            .fragments
            .get(location.as_str())
            .ok_or_else(|| Error::FragmentParse {
                path: location.to_native(),
                message: "no such fragment".into(),
            })?;
        parse_fragment(location, text)
    }
}

fn doc(yaml: &str) -> Document {
    Document::parse(yaml).unwrap()
}

fn web_option() -> OptionDef {
    OptionDef::new("web", "nginx", "/s/web/nginx/base.yaml")
        .with_addon("net", "/s/web/nginx/net.yaml")
        .with_addon("gpu", "/s/web/nginx/gpu.yaml")
}

fn single_category(option: OptionDef) -> Catalog {
    Catalog::from_categories(vec![Category::new(option.category.clone(), "/s").with_option(option)])
}

mod option_resolution {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inactive_addon_is_never_loaded() {
        let option = web_option();
        let catalog = single_category(option.clone());
        // gpu.yaml does not exist at all
        let loader = RecordingLoader::default()
            .with("/s/web/nginx/base.yaml", "services:\n  web:\n    image: nginx\n")
            .with("/s/web/nginx/net.yaml", "networks:\n  front: {}\n");

        let mut selection = Selection::new();
        selection.set_addon("web", "nginx", "net", true);

        let resolver = Resolver::new(&catalog, &selection).with_loader(&loader);
        let resolved = resolver.resolve(&option).unwrap();

        assert_eq!(
            resolved,
            doc("services:\n  web:\n    image: nginx\nnetworks:\n  front: {}\n")
        );
        assert_eq!(
            loader.requested(),
            vec!["/s/web/nginx/base.yaml", "/s/web/nginx/net.yaml"]
        );
    }

    #[test]
    fn addons_apply_in_lexicographic_order() {
        let option = OptionDef::new("c", "o", "/base.yaml")
            .with_addon("b", "/b.yaml")
            .with_addon("a", "/a.yaml");
        let catalog = single_category(option.clone());
        let loader = RecordingLoader::default()
            .with("/base.yaml", "value: base\nlist: [base]\n")
            .with("/a.yaml", "value: a\nlist: [a]\n")
            .with("/b.yaml", "value: b\nlist: [b]\n");

        let mut selection = Selection::new();
        selection.set_addon("c", "o", "b", true);
        selection.set_addon("c", "o", "a", true);

        let resolver = Resolver::new(&catalog, &selection).with_loader(&loader);
        let resolved = resolver.resolve(&option).unwrap();

        assert_eq!(resolved, doc("value: b\nlist: [base, a, b]\n"));
    }

    #[test]
    fn failing_active_addon_is_skipped() {
        let option = web_option();
        let catalog = single_category(option.clone());
        let loader = RecordingLoader::default()
            .with("/s/web/nginx/base.yaml", "services:\n  web:\n    image: nginx\n")
            .with("/s/web/nginx/net.yaml", "networks: [\n");

        let mut selection = Selection::new();
        selection.set_addon("web", "nginx", "net", true);
        selection.set_addon("web", "nginx", "gpu", true);

        let resolver = Resolver::new(&catalog, &selection).with_loader(&loader);
        let resolved = resolver.resolve(&option).unwrap();

        assert_eq!(resolved, doc("services:\n  web:\n    image: nginx\n"));
    }

    #[test]
    fn missing_base_is_an_error_for_that_option() {
        let option = web_option();
        let catalog = single_category(option.clone());
        let loader = RecordingLoader::default().with("/s/web/nginx/net.yaml", "x: 1\n");

        let selection = Selection::new();
        let resolver = Resolver::new(&catalog, &selection).with_loader(&loader);
        let err = resolver.resolve(&option).unwrap_err();

        match err {
            Error::BaseLoad {
                category, option, ..
            } => {
                assert_eq!(category, "web");
                assert_eq!(option, "nginx");
            }
            other => panic!("expected BaseLoad, got {other:?}"),
        }
    }

    #[test]
    fn resolve_with_uses_explicit_set() {
        let option = web_option();
        let catalog = single_category(option.clone());
        let loader = RecordingLoader::default()
            .with("/s/web/nginx/base.yaml", "a: 1\n")
            .with("/s/web/nginx/gpu.yaml", "gpu: true\n")
            .with("/s/web/nginx/net.yaml", "net: true\n");

        // Selection says net; the explicit set says gpu plus an unknown name
        let mut selection = Selection::new();
        selection.set_addon("web", "nginx", "net", true);
        let active: BTreeSet<String> = ["gpu".to_string(), "nope".to_string()].into();

        let resolver = Resolver::new(&catalog, &selection).with_loader(&loader);
        let resolved = resolver.resolve_with(&option, &active).unwrap();

        assert_eq!(resolved, doc("a: 1\ngpu: true\n"));
    }

    #[test]
    fn resolving_twice_is_byte_identical() {
        let option = web_option();
        let catalog = single_category(option.clone());
        let loader = RecordingLoader::default()
            .with(
                "/s/web/nginx/base.yaml",
                "services:\n  web:\n    image: nginx\n    environment: {B: 2, A: 1}\n",
            )
            .with("/s/web/nginx/gpu.yaml", "services:\n  web:\n    runtime: nvidia\n")
            .with("/s/web/nginx/net.yaml", "services:\n  web:\n    networks: [front]\n");

        let mut selection = Selection::new();
        selection.set_addon("web", "nginx", "net", true);
        selection.set_addon("web", "nginx", "gpu", true);

        let resolver = Resolver::new(&catalog, &selection).with_loader(&loader);
        let first = resolver.resolve(&option).unwrap().to_yaml().unwrap();
        let second = resolver.resolve(&option).unwrap().to_yaml().unwrap();
        assert_eq!(first, second);
    }
}

mod global_resolution {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_category_catalog() -> Catalog {
        Catalog::from_categories(vec![
            Category::new("y", "/s/y").with_option(OptionDef::new("y", "b", "/s/y/b/base.yaml")),
            Category::new("x", "/s/x").with_option(OptionDef::new("x", "a", "/s/x/a/base.yaml")),
        ])
    }

    #[test]
    fn failing_option_is_skipped() {
        let catalog = two_category_catalog();
        // x/a has no base fragment
        let loader =
            RecordingLoader::default().with("/s/y/b/base.yaml", "services:\n  b:\n    image: b\n");

        let mut selection = Selection::new();
        selection.set_enabled("x", "a", true);
        selection.set_enabled("y", "b", true);

        let resolver = Resolver::new(&catalog, &selection).with_loader(&loader);
        let b = resolver
            .resolve(catalog.option("y", "b").unwrap())
            .unwrap();

        assert_eq!(resolver.global(), b);
    }

    #[test]
    fn categories_merge_in_name_order() {
        let catalog = two_category_catalog();
        let loader = RecordingLoader::default()
            .with("/s/x/a/base.yaml", "owner: x\nlist: [x]\n")
            .with("/s/y/b/base.yaml", "owner: y\nlist: [y]\n");

        let mut selection = Selection::new();
        selection.set_enabled("y", "b", true);
        selection.set_enabled("x", "a", true);

        let resolver = Resolver::new(&catalog, &selection).with_loader(&loader);
        assert_eq!(resolver.global(), doc("owner: y\nlist: [x, y]\n"));
    }

    #[test]
    fn disabled_options_are_not_loaded() {
        let catalog = two_category_catalog();
        let loader = RecordingLoader::default()
            .with("/s/x/a/base.yaml", "a: 1\n")
            .with("/s/y/b/base.yaml", "b: 1\n");

        let mut selection = Selection::new();
        selection.set_enabled("y", "b", true);

        let resolver = Resolver::new(&catalog, &selection).with_loader(&loader);
        assert_eq!(resolver.global(), doc("b: 1\n"));
        assert_eq!(loader.requested(), vec!["/s/y/b/base.yaml"]);
    }

    #[test]
    fn nothing_enabled_is_empty() {
        let catalog = two_category_catalog();
        let loader = RecordingLoader::default();
        let selection = Selection::new();

        let resolver = Resolver::new(&catalog, &selection).with_loader(&loader);
        assert!(resolver.global().is_empty());
        assert_eq!(resolver.enabled_options().count(), 0);
    }
}

mod on_disk {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolves_a_discovered_store() {
        let store = TestStore::new()
            .base("db", "postgres", "services:\n  pg:\n    image: postgres:16\n")
            .addon(
                "db",
                "postgres",
                "network",
                "services:\n  pg:\n    networks: [backend]\nnetworks:\n  backend: {}\n",
            )
            .base("web", "nginx", "services:\n  web:\n    image: nginx\n");
        store.write_state(&[("db", "postgres", &["network"][..]), ("web", "nginx", &[][..])]);

        let catalog = Catalog::discover(&NormalizedPath::new(store.fragments_dir())).unwrap();
        let selection = Selection::load(&NormalizedPath::new(store.state_file())).unwrap();
        let resolver = Resolver::new(&catalog, &selection);

        assert_eq!(
            resolver.global(),
            doc(
                "services:\n  pg:\n    image: postgres:16\n    networks: [backend]\n  web:\n    image: nginx\nnetworks:\n  backend: {}\n"
            )
        );
    }
}
