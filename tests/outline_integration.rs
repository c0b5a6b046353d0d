//! Integration tests for outlining files through the public API:
//! - reading a document from disk and building its outline
//! - refresh after the file changes on disk
//! - configuration files changing the annotation syntax
//! - JSON export of the forest

mod common;

use comment_outline::{
    commands::{JumpTarget, Op, OpResult, RecordingNavigator},
    config::{ConfigProvider, OutlineConfig, TomlConfigProvider},
    event::Event,
    outline, Forest, OutlineNode, OutlineProvider, TextDocument,
};
use common::{init_logging, write_source, SAMPLE_SOURCE};
use tempfile::TempDir;

fn labels(nodes: &[OutlineNode]) -> Vec<&str> {
    nodes.iter().map(OutlineNode::label).collect()
}

#[test]
fn test_outline_of_file_on_disk() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let path = write_source(&temp_dir, "main.rs", SAMPLE_SOURCE);

    let forest = outline(&TextDocument::from_path(&path).unwrap());

    assert_eq!(labels(forest.roots()), vec!["Startup", "main loop", "Shutdown"]);
    let startup = &forest.roots()[0];
    assert_eq!(startup.line(), 1);
    assert_eq!(
        labels(startup.children()),
        vec!["parse args", "load config", "parse args"]
    );
    assert_eq!(
        startup
            .children()
            .iter()
            .map(OutlineNode::line)
            .collect::<Vec<_>>(),
        vec![1, 4, 13]
    );

    let drain = &forest.roots()[2].children()[0];
    assert_eq!((drain.label(), drain.key()), ("Drain", "Shutdown :: Drain"));
    assert_eq!(
        drain.children()[0].key(),
        "Shutdown :: Drain :: flush queues :: line number 9"
    );
}

#[test]
fn test_refresh_follows_file_changes() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let path = write_source(&temp_dir, "main.rs", SAMPLE_SOURCE);

    let mut provider = OutlineProvider::new(TextDocument::from_path(&path).unwrap());
    let changes = provider.subscribe();

    std::fs::write(&path, "// #-- only :: one\nfn main() {}\n").unwrap();
    provider.source_mut().reload().unwrap();
    provider.refresh();

    assert_eq!(labels(provider.roots()), vec!["only"]);
    assert_eq!(changes.try_recv(), Ok(Event::ForestChanged));

    std::fs::write(&path, "fn main() {}\n").unwrap();
    provider.source_mut().reload().unwrap();
    provider.refresh();

    assert!(provider.roots().is_empty());
    assert_eq!(changes.try_recv(), Ok(Event::ForestChanged));
    assert!(changes.try_recv().is_err());
}

#[test]
fn test_navigation_through_tree_items() {
    let mut provider = OutlineProvider::new(TextDocument::new(SAMPLE_SOURCE));
    let mut navigator = RecordingNavigator::default();

    let shutdown = &provider.roots()[2];
    let flush = &shutdown.children()[0].children()[0];
    let op = provider.tree_item(flush).command;
    assert_eq!(op, Op::JumpToLine(9));

    let result = provider.execute(op, &mut navigator).unwrap();
    assert_eq!(result, OpResult::Jumped(JumpTarget { line: 9, column: 0 }));
    assert_eq!(navigator.jumps, vec![JumpTarget::line_start(9)]);
}

#[test]
fn test_config_file_changes_syntax() {
    let temp_dir = TempDir::new().unwrap();
    let config_provider = TomlConfigProvider::new(temp_dir.path().join("outline.toml"));
    let mut config = OutlineConfig::default();
    config.syntax.marker = "MARK:".to_string();
    config.syntax.separator = ">".to_string();
    config_provider.set_config(&config).unwrap();

    let loaded = OutlineConfig::load(config_provider.path()).unwrap();
    let source = "// MARK: UI > Buttons\n// #-- ignored\n/* MARK: UI > Menus */\n";
    let provider = OutlineProvider::with_config(TextDocument::new(source), &loaded).unwrap();

    assert_eq!(labels(provider.roots()), vec!["UI"]);
    assert_eq!(labels(provider.roots()[0].children()), vec!["Buttons", "Menus"]);
    assert_eq!(
        provider.roots()[0].children()[1].key(),
        "UI > Menus > line number 2"
    );
}

#[test]
fn test_forest_json_export() {
    let forest = outline(&TextDocument::new("// #-- A :: b\n/* #-- c */"));
    let value = serde_json::to_value(&forest).unwrap();

    assert_eq!(
        value,
        serde_json::json!([
            {
                "label": "A",
                "line": 0,
                "key": "A",
                "children": [
                    { "label": "b", "line": 0, "key": "A :: b :: line number 0", "children": [] }
                ]
            },
            { "label": "c", "line": 1, "key": "c", "children": [] }
        ])
    );

    let back: Forest = serde_json::from_value(value).unwrap();
    assert_eq!(back, forest);
}
