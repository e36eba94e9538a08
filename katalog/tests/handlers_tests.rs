use katalog::handlers::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_resolve_selector_config_builtin_site() {
    let site = "digikala".to_string();
    let config = resolve_selector_config(Some(&site), None).unwrap();

    assert!(!config.top_links.is_empty());
    assert!(!config.filter_value.is_empty());
}

#[test]
fn test_resolve_selector_config_unknown_site() {
    let site = "walmart".to_string();
    let result = resolve_selector_config(Some(&site), None);

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("walmart"));
}

#[test]
fn test_resolve_selector_config_no_input() {
    let result = resolve_selector_config(None, None);

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("--site or --profile"));
}

#[test]
fn test_resolve_selector_config_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    write!(
        temp_file,
        r#"{{"top_links": ["nav a"], "sub_links": ["ul a"], "filter_value": ["li"]}}"#
    )?;

    let path = PathBuf::from(temp_file.path());
    let config = resolve_selector_config(None, Some(&path))?;

    assert_eq!(config.top_links, vec!["nav a"]);
    assert_eq!(config.filter_value, vec!["li"]);

    Ok(())
}

#[test]
fn test_resolve_selector_config_file_wins_over_site() {
    // clap marks --site and --profile as conflicting, but the helper still
    // has a defined precedence if both arrive
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, r#"{{"top_links": ["header a"]}}"#).unwrap();

    let site = "amazon".to_string();
    let path = PathBuf::from(temp_file.path());
    let config = resolve_selector_config(Some(&site), Some(&path)).unwrap();

    assert_eq!(config.top_links, vec!["header a"]);
}

#[test]
fn test_resolve_selector_config_bad_profile_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "definitely not json").unwrap();

    let path = PathBuf::from(temp_file.path());
    let result = resolve_selector_config(None, Some(&path));

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Failed to load profile"));
}

#[test]
fn test_expand_output_path_plain() {
    let path = expand_output_path("out/categories.json");
    assert_eq!(path, PathBuf::from("out/categories.json"));
}

#[test]
fn test_expand_output_path_tilde() {
    let path = expand_output_path("~/categories.json");
    assert!(!path.to_string_lossy().starts_with('~'));
    assert!(path.to_string_lossy().ends_with("categories.json"));
}
