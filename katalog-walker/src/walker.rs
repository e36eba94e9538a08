use crate::error::{Result, WalkError};
use crate::node::CategoryNode;
use crate::selectors::{SelectorConfig, SelectorTarget, resolve_first};
use crate::session::{DomElement, PageSession};
use std::collections::{BTreeMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Called once per candidate page visit with (depth, url).
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Walks a category -> subcategory -> filter hierarchy of unknown,
/// site-controlled depth and shape, bounded by `max_depth` and a per-level
/// sibling cap, deduplicating links level-locally and degrading across ranked
/// selector variants instead of failing on the first markup drift.
///
/// Traversal is strictly sequential: one page at a time, no concurrent
/// navigation. Each node moves through
/// reveal -> resolve (with bounded retries) -> extract -> recurse
/// exactly once; there is no backtracking.
pub struct HierarchyWalker<S: PageSession> {
    session: S,
    config: SelectorConfig,
    max_depth: usize,
    per_level_cap: usize,
    resolve_retries: usize,
    progress_callback: Option<ProgressCallback>,
    nav_failures: usize,
    pages_visited: usize,
}

/// What a completed run produced. An empty `categories` is a reportable
/// failure mode of its own; callers must not treat it as success.
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    pub categories: Vec<CategoryNode>,
    pub nav_failures: usize,
    pub pages_visited: usize,
}

/// A link that survived screening: non-empty trimmed name, resolvable
/// absolute URL, not a duplicate of an earlier sibling.
#[derive(Debug)]
struct Candidate {
    name: String,
    url: String,
}

impl<S: PageSession> HierarchyWalker<S> {
    pub fn new(session: S, config: SelectorConfig) -> Self {
        Self {
            session,
            config,
            max_depth: 2,
            per_level_cap: 8,
            resolve_retries: 2,
            progress_callback: None,
            nav_failures: 0,
            pages_visited: 0,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_per_level_cap(mut self, cap: usize) -> Self {
        self.per_level_cap = cap;
        self
    }

    pub fn with_resolve_retries(mut self, retries: usize) -> Self {
        self.resolve_retries = retries;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Run the walk to completion. The session is closed before returning,
    /// whether the walk succeeded or died.
    pub async fn walk(mut self, start_url: &str) -> Result<WalkOutcome> {
        let outcome = self.walk_inner(start_url).await;
        self.session.close().await;
        outcome
    }

    async fn walk_inner(&mut self, start_url: &str) -> Result<WalkOutcome> {
        Url::parse(start_url)
            .map_err(|e| WalkError::InvalidUrl(format!("{start_url}: {e}")))?;

        info!(start_url, max_depth = self.max_depth, "starting hierarchy walk");
        let root = self.session.goto(start_url).await?;
        self.pages_visited += 1;

        let categories = self.expand(&root, start_url, 0).await?;
        info!(
            roots = categories.len(),
            pages = self.pages_visited,
            nav_failures = self.nav_failures,
            "walk complete"
        );
        Ok(WalkOutcome {
            categories,
            nav_failures: self.nav_failures,
            pages_visited: self.pages_visited,
        })
    }

    /// Produce all surviving nodes at `depth` from the links found under
    /// `scope`. Boxed because it recurses through `extract_candidate`.
    fn expand<'a>(
        &'a mut self,
        scope: &'a S::Element,
        base_url: &'a str,
        depth: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<CategoryNode>>> + 'a>> {
        Box::pin(async move {
            // Submenus may only render after a hover/click; the reveal has to
            // land before any child selector can match.
            if let Err(e) = self.session.reveal(scope).await {
                if e.is_fatal() {
                    return Err(e);
                }
                warn!(depth, error = %e, "reveal failed, resolving anyway");
            }
            self.session.settle().await;

            let target = if depth == 0 {
                SelectorTarget::TopLinks
            } else {
                SelectorTarget::SubLinks
            };
            let links = self.resolve_links(scope, target).await?;
            if links.is_empty() {
                debug!(depth, "no child links resolved");
                return Ok(Vec::new());
            }

            let candidates = self.screen_candidates(&links, base_url);
            let mut nodes = Vec::with_capacity(candidates.len());
            for candidate in candidates {
                match self.extract_candidate(&candidate, depth).await {
                    Ok(node) => nodes.push(node),
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        if matches!(e, WalkError::NavigationFailed { .. }) {
                            self.nav_failures += 1;
                        }
                        warn!(name = %candidate.name, error = %e, "candidate dropped");
                    }
                }
            }
            Ok(nodes)
        })
    }

    /// Resolve child links through the fallback chain, retrying a bounded
    /// number of times with a settle in between. Covers slow client-side
    /// rendering after a reveal; an exhausted chain after the last retry
    /// means "no children here", not an error.
    async fn resolve_links(
        &mut self,
        scope: &S::Element,
        target: SelectorTarget,
    ) -> Result<Vec<S::Element>> {
        let chain = self.config.chain(target).to_vec();
        let mut attempt = 0;
        loop {
            match resolve_first(scope, target, &chain) {
                Ok(found) => return Ok(found),
                Err(e) if e.is_fatal() => return Err(e),
                Err(WalkError::SelectorExhausted { .. }) if attempt < self.resolve_retries => {
                    attempt += 1;
                    debug!(target = target.name(), attempt, "nothing resolved yet, settling");
                    self.session.settle().await;
                }
                Err(e) => {
                    debug!(target = target.name(), error = %e, "resolution gave up");
                    return Ok(Vec::new());
                }
            }
        }
    }

    /// Drop unreadable links and duplicate sibling URLs, then cap the
    /// survivors. Document order, first seen wins.
    fn screen_candidates(&self, links: &[S::Element], base_url: &str) -> Vec<Candidate> {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for link in links {
            let candidate = match screen_link(link, base_url) {
                Ok(candidate) => candidate,
                Err(e) => {
                    debug!(error = %e, "candidate dropped at screening");
                    continue;
                }
            };
            if !seen.insert(candidate.url.clone()) {
                debug!(url = %candidate.url, "dropping duplicate sibling url");
                continue;
            }
            kept.push(candidate);
        }
        if kept.len() > self.per_level_cap {
            debug!(
                cap = self.per_level_cap,
                dropped = kept.len() - self.per_level_cap,
                "applying per-level cap"
            );
            kept.truncate(self.per_level_cap);
        }
        kept
    }

    /// Navigate to one candidate, read its filters, and recurse while the
    /// depth budget allows. Any failure in here belongs to this candidate
    /// alone; siblings keep going.
    async fn extract_candidate(
        &mut self,
        candidate: &Candidate,
        depth: usize,
    ) -> Result<CategoryNode> {
        if let Some(ref callback) = self.progress_callback {
            callback(depth, candidate.url.clone());
        }

        let page = self.session.goto(&candidate.url).await?;
        self.pages_visited += 1;
        debug!(name = %candidate.name, depth, "extracting candidate");

        let mut node = CategoryNode::new(candidate.name.clone(), Some(candidate.url.clone()));
        node.attributes = self.extract_filters(&page);
        node.children = if depth < self.max_depth {
            self.expand(&page, &candidate.url, depth + 1).await?
        } else {
            Vec::new()
        };
        Ok(node)
    }

    /// Filter facets from a listing page: section container -> label element
    /// -> value items, each through its own fallback chain. A section counts
    /// only when both a label and at least one non-empty value resolve.
    fn extract_filters(&self, page: &S::Element) -> BTreeMap<String, Vec<String>> {
        let mut filters = BTreeMap::new();
        let sections = match resolve_first(
            page,
            SelectorTarget::FilterSection,
            self.config.chain(SelectorTarget::FilterSection),
        ) {
            Ok(sections) => sections,
            Err(e) => {
                debug!(error = %e, "no filter sections on page");
                return filters;
            }
        };

        for section in &sections {
            let label = match resolve_first(
                section,
                SelectorTarget::FilterLabel,
                self.config.chain(SelectorTarget::FilterLabel),
            ) {
                Ok(labels) => labels[0].text(),
                Err(_) => continue,
            };
            if label.is_empty() {
                continue;
            }

            let values: Vec<String> = match resolve_first(
                section,
                SelectorTarget::FilterValue,
                self.config.chain(SelectorTarget::FilterValue),
            ) {
                Ok(items) => items
                    .iter()
                    .map(DomElement::text)
                    .filter(|v| !v.is_empty())
                    .collect(),
                Err(_) => continue,
            };
            if !values.is_empty() {
                filters.insert(label, values);
            }
        }
        filters
    }
}

/// Read one link into a candidate. A link whose name, target or resolved URL
/// cannot be read is a `CandidateFailed`: dropped where it stands, siblings
/// unaffected.
fn screen_link<E: DomElement>(link: &E, base_url: &str) -> Result<Candidate> {
    let name = link.text();
    if name.is_empty() {
        return Err(WalkError::CandidateFailed(
            "link has empty display text".to_string(),
        ));
    }
    let Some(href) = link.attr("href") else {
        return Err(WalkError::CandidateFailed(format!(
            "'{name}' has no link target"
        )));
    };
    let Some(url) = resolve_link(base_url, &href) else {
        return Err(WalkError::CandidateFailed(format!(
            "'{name}' target '{href}' does not resolve"
        )));
    };
    Ok(Candidate { name, url })
}

/// Resolve an href against the page it appeared on. Pseudo-links and bare
/// fragments are not traversable; fragments are stripped so dedup compares
/// real targets.
pub fn resolve_link(base: &str, href: &str) -> Option<String> {
    if href.is_empty()
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with('#')
    {
        return None;
    }

    let base_url = Url::parse(base).ok()?;
    let mut resolved = base_url.join(href).ok()?;
    resolved.set_fragment(None);

    Some(resolved.to_string())
}
