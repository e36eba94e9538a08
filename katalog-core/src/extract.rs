use crate::document::CategoryDocument;
use crate::error::{ExtractError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use katalog_walker::{HierarchyWalker, HttpSession, ProgressCallback, SelectorConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{info, warn};

/// Options for one extraction run.
pub struct ExtractOptions {
    pub start_url: String,
    pub config: SelectorConfig,
    pub max_depth: usize,
    pub per_level_cap: usize,
    pub timeout_secs: u64,
    pub show_progress: bool,
}

impl ExtractOptions {
    pub fn new(start_url: String, config: SelectorConfig) -> Self {
        Self {
            start_url,
            config,
            max_depth: 2,
            per_level_cap: 8,
            timeout_secs: 10,
            show_progress: false,
        }
    }
}

/// Run a full extraction against the live site: build the HTTP session, walk
/// the hierarchy, classify the outcome. The session is closed inside the
/// walker on every exit path; an empty root sequence comes back as
/// `NothingExtracted` rather than an empty-but-"successful" document.
pub async fn execute_extraction(options: ExtractOptions) -> Result<CategoryDocument> {
    let ExtractOptions {
        start_url,
        config,
        max_depth,
        per_level_cap,
        timeout_secs,
        show_progress,
    } = options;

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Starting extraction...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let visited_count = Arc::new(AtomicUsize::new(0));
    let progress_callback: ProgressCallback = {
        let pb = progress_bar.clone();
        let count = visited_count.clone();
        Arc::new(move |depth: usize, url: String| {
            let visited = count.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb {
                pb.set_message(format!("[depth {depth}] {url} ({visited} pages)"));
                pb.tick();
            }
        })
    };

    let session = HttpSession::with_timeout(timeout_secs)?;
    let walker = HierarchyWalker::new(session, config)
        .with_max_depth(max_depth)
        .with_per_level_cap(per_level_cap)
        .with_progress_callback(progress_callback);

    let outcome = match walker.walk(&start_url).await {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(ref pb) = progress_bar {
                pb.finish_and_clear();
            }
            return Err(e.into());
        }
    };

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Extraction complete, {} pages visited",
            outcome.pages_visited
        ));
    }

    if outcome.nav_failures > 0 {
        warn!(
            failures = outcome.nav_failures,
            "some candidates were dropped after navigation failures"
        );
    }

    if outcome.categories.is_empty() {
        return Err(ExtractError::NothingExtracted);
    }

    info!(
        roots = outcome.categories.len(),
        pages = outcome.pages_visited,
        "extraction produced a category tree"
    );
    Ok(CategoryDocument::new(outcome.categories))
}
