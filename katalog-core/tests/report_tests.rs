// Tests for report generation

use katalog_core::document::CategoryDocument;
use katalog_core::report::{extract_url_path, generate_extraction_report};
use katalog_walker::CategoryNode;

// ============================================================================
// URL Path Extraction Tests
// ============================================================================

#[test]
fn test_extract_url_path_root() {
    assert_eq!(extract_url_path("https://shop.test/"), "/");
    assert_eq!(extract_url_path("https://shop.test"), "/");
}

#[test]
fn test_extract_url_path_nested() {
    assert_eq!(
        extract_url_path("https://shop.test/electronics/phones"),
        "/electronics/phones"
    );
}

#[test]
fn test_extract_url_path_drops_query() {
    assert_eq!(
        extract_url_path("https://shop.test/cat?ref=nav_menu"),
        "/cat"
    );
}

#[test]
fn test_extract_url_path_invalid_url() {
    assert_eq!(extract_url_path("not a url"), "not a url");
}

// ============================================================================
// Report Content Tests
// ============================================================================

fn sample_document() -> CategoryDocument {
    let mut root = CategoryNode::new(
        "Electronics".to_string(),
        Some("https://shop.test/electronics".to_string()),
    );
    root.attributes.insert(
        "Brand".to_string(),
        vec!["Acme".to_string(), "Zenith".to_string()],
    );
    let mut child = CategoryNode::new(
        "Phones".to_string(),
        Some("https://shop.test/electronics/phones".to_string()),
    );
    child
        .attributes
        .insert("Storage".to_string(), vec!["64 GB".to_string()]);
    root.children.push(child);

    CategoryDocument::new(vec![root])
}

#[test]
fn test_report_summary_counts() {
    let report = generate_extraction_report(&sample_document());

    assert!(report.contains("Top-level categories: 1"));
    assert!(report.contains("Total nodes: 2"));
    assert!(report.contains("Deepest level: 1"));
    assert!(report.contains("Filter facets: 2 (3 values)"));
}

#[test]
fn test_report_lists_nodes_with_paths() {
    let report = generate_extraction_report(&sample_document());

    assert!(report.contains("Electronics"));
    assert!(report.contains("/electronics/phones"));
    assert!(report.contains("[1 filters]"));
}

#[test]
fn test_report_on_nodes_without_urls() {
    let doc = CategoryDocument::new(vec![CategoryNode::new("Orphan".to_string(), None)]);
    let report = generate_extraction_report(&doc);

    assert!(report.contains("Orphan"));
    assert!(report.contains("Top-level categories: 1"));
}
