use crate::error::{Result, WalkError};
use crate::session::DomElement;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The logical extraction targets a selector chain can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorTarget {
    /// Top-level category links on the root page.
    TopLinks,
    /// Subcategory links below the first level.
    SubLinks,
    /// Containers holding one filter facet each.
    FilterSection,
    /// The label element inside a filter section.
    FilterLabel,
    /// The value elements inside a filter section.
    FilterValue,
}

impl SelectorTarget {
    pub fn name(self) -> &'static str {
        match self {
            SelectorTarget::TopLinks => "top_links",
            SelectorTarget::SubLinks => "sub_links",
            SelectorTarget::FilterSection => "filter_section",
            SelectorTarget::FilterLabel => "filter_label",
            SelectorTarget::FilterValue => "filter_value",
        }
    }
}

/// Ranked selector chains per extraction target. Site markup is unstable, so
/// each target carries several known-good selector variants tried in order
/// rather than a single selector that fails outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default)]
    pub top_links: Vec<String>,
    #[serde(default)]
    pub sub_links: Vec<String>,
    #[serde(default)]
    pub filter_section: Vec<String>,
    #[serde(default)]
    pub filter_label: Vec<String>,
    #[serde(default)]
    pub filter_value: Vec<String>,
}

impl SelectorConfig {
    pub fn chain(&self, target: SelectorTarget) -> &[String] {
        match target {
            SelectorTarget::TopLinks => &self.top_links,
            SelectorTarget::SubLinks => &self.sub_links,
            SelectorTarget::FilterSection => &self.filter_section,
            SelectorTarget::FilterLabel => &self.filter_label,
            SelectorTarget::FilterValue => &self.filter_value,
        }
    }
}

/// Try each selector in ranked order against `scope`; the first one yielding a
/// non-empty match set wins and later selectors are never evaluated. A
/// malformed selector falls through to the next entry in the chain. Exhausting
/// the chain is `SelectorExhausted`, which callers treat as "nothing here".
pub fn resolve_first<E: DomElement>(
    scope: &E,
    target: SelectorTarget,
    chain: &[String],
) -> Result<Vec<E>> {
    for selector in chain {
        match scope.select(selector) {
            Ok(matches) if !matches.is_empty() => {
                debug!(%selector, count = matches.len(), "selector matched");
                return Ok(matches);
            }
            Ok(_) => {
                debug!(%selector, "selector empty, falling through");
            }
            Err(WalkError::BadSelector { selector, reason }) => {
                warn!(%selector, %reason, "skipping malformed selector");
            }
            Err(e) => return Err(e),
        }
    }
    Err(WalkError::SelectorExhausted {
        target: target.name(),
    })
}
