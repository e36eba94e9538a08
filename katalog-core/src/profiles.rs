//! Built-in selector profiles for the storefronts Katalog started out on.
//! Each chain is ranked: the selector observed to work most recently comes
//! first, older variants stay behind it as fallbacks. Anything here can rot
//! whenever a site ships a redesign; custom profiles load from JSON files
//! with the same shape.

use crate::error::{ExtractError, Result};
use katalog_walker::SelectorConfig;
use std::fs;
use std::path::Path;

pub const BUILTIN_SITES: &[&str] = &["amazon", "digikala", "temu"];

pub fn builtin(site: &str) -> Result<SelectorConfig> {
    match site.to_lowercase().as_str() {
        "amazon" => Ok(amazon()),
        "digikala" => Ok(digikala()),
        "temu" => Ok(temu()),
        other => Err(ExtractError::UnknownProfile(other.to_string())),
    }
}

/// Load a custom profile from a JSON file with the same field layout the
/// built-ins use (`top_links`, `sub_links`, `filter_section`, ...).
pub fn from_file(path: &Path) -> Result<SelectorConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn chain(selectors: &[&str]) -> Vec<String> {
    selectors.iter().map(|s| s.to_string()).collect()
}

fn amazon() -> SelectorConfig {
    SelectorConfig {
        top_links: chain(&[
            "#nav-main #nav-shop a.nav-a",
            "#nav-xshop a.nav-a",
            "#nav-main .nav-left a.nav-a",
            "ul.hmenu-content li a.hmenu-item",
        ]),
        sub_links: chain(&[
            "#nav-flyout-content .nav-subnav a.nav-a",
            "ul.hmenu-submenu li a.hmenu-item",
        ]),
        filter_section: chain(&["#filters .a-section", ".a-section"]),
        filter_label: chain(&["h3", "h2", "h4"]),
        filter_value: chain(&["li span[class*='a-text-']", "li span"]),
    }
}

fn digikala() -> SelectorConfig {
    SelectorConfig {
        top_links: chain(&[
            "a.c-navi-new__main-link",
            "nav [class*=MegaMenuCategory]",
        ]),
        sub_links: chain(&[
            "a.c-product-box__title",
            "a.c-listing__link",
            "ul a",
        ]),
        filter_section: chain(&["[data-testid=\"filter-section\"]", "[data-testid=\"filter\"]"]),
        filter_label: chain(&["h4"]),
        filter_value: chain(&["ul > li", "ul li"]),
    }
}

fn temu() -> SelectorConfig {
    SelectorConfig {
        top_links: chain(&[
            "a.category-item",
            "div[class*='_categoryList'] a",
            "nav a",
        ]),
        sub_links: chain(&["ul li a", "a.category-item"]),
        filter_section: chain(&["div[class*='filterItem']", "[data-testid=\"filter\"]"]),
        filter_label: chain(&["div[class*='filterTitle']", "h4"]),
        filter_value: chain(&["li", "span"]),
    }
}
