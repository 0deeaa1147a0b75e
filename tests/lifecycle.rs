use std::fs;

use docver::{Document, DocverConfig, IndexerState, Site, SiteDocument, VersionIndexer, keys};
use serde_json::{Value, json};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Build {
    _dir: TempDir,
    site: Site,
}

fn build_site() -> Build {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("_site");
    fs::create_dir(&destination).unwrap();

    let site = Site::new(destination)
        .with_documents([
            SiteDocument::new("/docs/1.0/intro", "_docs/1.0/intro.md"),
            SiteDocument::new("/docs/2.0/intro", "_docs/2.0/intro.md"),
            SiteDocument::new("/docs/2.1/intro", "_docs/2.1/intro.md"),
            SiteDocument::new("/docs/2.1/whats-new", "_docs/2.1/whats-new.md"),
            SiteDocument::new("/about", "about.md"),
        ])
        .with_data(keys::ROOT_LABELS, json!({ "/docs/": "Documentation" }));
    Build { _dir: dir, site }
}

#[test]
fn full_run_annotates_versioned_documents() {
    let Build { _dir, mut site } = build_site();
    let mut indexer = VersionIndexer::new(DocverConfig::default()).unwrap();

    let stats = indexer.pre_render(&mut site).unwrap();
    assert_eq!(stats.documents_seen, 5);
    assert_eq!(stats.versioned_documents, 4);
    assert_eq!(stats.canonical_groups, 2);
    assert_eq!(stats.roots, 1);

    // Host finalizes documents in its own order.
    for document in site.documents_mut().iter_mut().rev() {
        indexer.post_convert(document).unwrap();
    }
    indexer.post_write(&site);

    let intro = site.documents()[0].data();
    assert_eq!(intro[keys::COMPILATION_NAME], json!("Documentation"));
    assert_eq!(intro[keys::DOC_VERSION], json!("1.0"));
    assert_eq!(
        intro[keys::DOC_VERSIONS],
        json!([
            { "version": 2.1, "url": "/docs/2.1/intro" },
            { "version": 2.0, "url": "/docs/2.0/intro" },
            { "version": 1.0, "url": "/docs/1.0/intro" },
        ])
    );

    let whats_new = site.documents()[3].data();
    assert_eq!(
        whats_new[keys::DOC_VERSIONS],
        json!([{ "version": 2.1, "url": "/docs/2.1/whats-new" }])
    );

    assert!(site.documents()[4].data().is_empty());
}

#[test]
fn root_navigation_is_published_as_site_data() {
    let Build { _dir, mut site } = build_site();
    let mut indexer = VersionIndexer::new(DocverConfig::default()).unwrap();
    indexer.pre_render(&mut site).unwrap();

    assert_eq!(
        site.data()[keys::VERSIONED_ROOTS],
        json!({
            "/docs/": {
                "version": [
                    { "version": 2.1, "version_string": "2.1" },
                    { "version": 2.0, "version_string": "2.0" },
                    { "version": 1.0, "version_string": "1.0" },
                ],
                "label": "Documentation",
            }
        })
    );
}

#[test]
fn a_second_run_starts_fresh() {
    let Build { _dir, mut site } = build_site();
    let mut indexer = VersionIndexer::new(DocverConfig::default()).unwrap();
    indexer.index_site(&mut site).unwrap();
    assert_eq!(indexer.state(), IndexerState::Finished);

    site.push_document(SiteDocument::new("/docs/3.0/intro", "_docs/3.0/intro.md"));
    let stats = indexer.pre_render(&mut site).unwrap();
    assert_eq!(stats.versioned_documents, 5);
    assert_eq!(indexer.state(), IndexerState::Emitted);

    let newest = indexer
        .index()
        .unwrap()
        .versions_for("/docs/intro")
        .unwrap()[0]
        .clone();
    assert_eq!(newest.url, "/docs/3.0/intro");
}

#[test]
fn dotted_versions_only_when_configured() {
    let Build { _dir, mut site } = build_site();
    site.push_document(SiteDocument::new("/blog/2024/launch", "_posts/launch.md"));

    let config = DocverConfig::from_yaml("version: \"1.0\"\nmin_version_components: 2\n").unwrap();
    let mut indexer = VersionIndexer::new(config).unwrap();
    indexer.index_site(&mut site).unwrap();

    let blog = site
        .documents()
        .iter()
        .find(|d| d.url() == "/blog/2024/launch")
        .unwrap();
    assert!(blog.data().is_empty());
    let roots = site.data()[keys::VERSIONED_ROOTS].as_object().unwrap();
    assert!(!roots.contains_key("/blog/"));
}

#[test]
fn config_labels_override_site_data() {
    let Build { _dir, mut site } = build_site();
    let config = DocverConfig::default().with_root_label("/docs/", "Product Manual");
    let mut indexer = VersionIndexer::new(config).unwrap();
    indexer.index_site(&mut site).unwrap();

    let label: &Value = &site.documents()[0].data()[keys::COMPILATION_NAME];
    assert_eq!(label, &json!("Product Manual"));
}
