use clap::ArgMatches;
use colored::Colorize;
use katalog_core::document::CategoryDocument;
use katalog_core::error::ExtractError;
use katalog_core::profiles;
use katalog_walker::{SelectorConfig, SelectorTarget};
use std::path::PathBuf;
use tracing::info;
use url::Url;

// Helper functions for the scrape handler

/// Resolve the selector configuration from either a built-in site name or a
/// JSON profile file.
pub fn resolve_selector_config(
    site: Option<&String>,
    profile: Option<&PathBuf>,
) -> Result<SelectorConfig, String> {
    if let Some(path) = profile {
        profiles::from_file(path)
            .map_err(|e| format!("Failed to load profile {}: {}", path.display(), e))
    } else if let Some(site) = site {
        profiles::builtin(site).map_err(|e| e.to_string())
    } else {
        Err("Either --site or --profile must be provided".to_string())
    }
}

/// Expand a leading `~` in the output path argument.
pub fn expand_output_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

// Re-export extraction types and functions from katalog-core
pub use katalog_core::extract::{ExtractOptions, execute_extraction};
pub use katalog_core::report::{extract_url_path, generate_extraction_report};

pub async fn handle_scrape(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<Url>("url").unwrap();
    let site = sub_matches.get_one::<String>("site");
    let profile = sub_matches.get_one::<PathBuf>("profile");
    let max_depth = *sub_matches.get_one::<usize>("max-depth").unwrap_or(&2);
    let per_level_cap = *sub_matches.get_one::<usize>("per-level-cap").unwrap_or(&8);
    let timeout_secs = *sub_matches.get_one::<u64>("timeout").unwrap_or(&10);
    let output_arg = sub_matches.get_one::<String>("output").unwrap();
    let output = expand_output_path(output_arg);

    let config = match resolve_selector_config(site, profile) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    // Print extraction configuration
    println!(
        "\n🗂  Extracting categories from {}",
        url.host_str().unwrap_or("unknown")
    );
    println!("Max depth: {}", max_depth);
    println!("Per-level cap: {}", per_level_cap);
    println!("Output: {}\n", output.display());

    // A previous output file is only read back to report what it held; every
    // run rewrites the document wholesale.
    if output.exists()
        && let Ok(previous) = CategoryDocument::load(&output)
    {
        info!(
            categories = previous.metadata.total_categories,
            "previous output will be overwritten"
        );
        println!(
            "Previous run: {} categories ({}) - will be overwritten",
            previous.metadata.total_categories, previous.metadata.timestamp
        );
    }

    let mut options = ExtractOptions::new(url.as_str().to_string(), config);
    options.max_depth = max_depth;
    options.per_level_cap = per_level_cap;
    options.timeout_secs = timeout_secs;
    options.show_progress = true;

    let document = match execute_extraction(options).await {
        Ok(document) => document,
        Err(ExtractError::NothingExtracted) => {
            eprintln!(
                "✗ Nothing extracted: no top-level categories resolved. \
                 The site may have changed its markup; try another profile."
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("✗ Extraction failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = document.save(&output) {
        eprintln!("✗ Failed to write {}: {}", output.display(), e);
        std::process::exit(1);
    }

    println!("\n{} Extraction complete!\n", "✓".green().bold());

    // Generate and display report
    let report = generate_extraction_report(&document);
    print!("{}", report);
    println!("Saved to {}", output.display());
}

pub fn handle_profiles() {
    for site in profiles::BUILTIN_SITES {
        let config = match profiles::builtin(site) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ {}", e);
                continue;
            }
        };

        println!("{}", site.bright_white().bold());
        for target in [
            SelectorTarget::TopLinks,
            SelectorTarget::SubLinks,
            SelectorTarget::FilterSection,
            SelectorTarget::FilterLabel,
            SelectorTarget::FilterValue,
        ] {
            let chain = config.chain(target);
            println!("  {}:", target.name().cyan());
            for selector in chain {
                println!("    {} {}", "•".blue(), selector);
            }
        }
        println!();
    }
}
