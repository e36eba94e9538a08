use crate::document::CategoryDocument;
use katalog_walker::CategoryNode;
use url::Url;

/// Extract the path component from a URL, for compact display.
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Human-readable summary of an extraction, printed after the JSON file is
/// written.
pub fn generate_extraction_report(doc: &CategoryDocument) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!(
        "  Top-level categories: {}\n",
        doc.metadata.total_categories
    ));
    report.push_str(&format!("  Total nodes: {}\n", doc.total_nodes()));
    report.push_str(&format!("  Deepest level: {}\n", doc.max_depth()));

    let facet_count: usize = doc.categories.iter().map(count_facets).sum();
    let value_count: usize = doc
        .categories
        .iter()
        .map(CategoryNode::filter_value_count)
        .sum();
    report.push_str(&format!(
        "  Filter facets: {} ({} values)\n",
        facet_count, value_count
    ));
    report.push_str(&format!("  Extracted at: {}\n", doc.metadata.timestamp));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for root in &doc.categories {
        push_node_lines(&mut report, root, 0);
        report.push('\n');
    }

    report
}

fn count_facets(node: &CategoryNode) -> usize {
    node.attributes.len() + node.children.iter().map(count_facets).sum::<usize>()
}

fn push_node_lines(report: &mut String, node: &CategoryNode, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    let mut line = format!("{}{}", indent, node.name);

    if let Some(ref url) = node.url {
        line.push_str(&format!("  \x1b[90m{}\x1b[0m", extract_url_path(url)));
    }
    if !node.attributes.is_empty() {
        line.push_str(&format!(" [{} filters]", node.attributes.len()));
    }

    report.push_str(&line);
    report.push('\n');

    for child in &node.children {
        push_node_lines(report, child, depth + 1);
    }
}
