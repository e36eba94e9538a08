pub mod document;
pub mod error;
pub mod extract;
pub mod profiles;
pub mod report;

pub use document::{CategoryDocument, Metadata};
pub use error::ExtractError;
pub use extract::{ExtractOptions, execute_extraction};
pub use report::{extract_url_path, generate_extraction_report};

pub fn print_banner() {
    println!(
        r#"
 _         _        _
| | ____ _| |_ __ _| | ___   __ _
| |/ / _` | __/ _` | |/ _ \ / _` |
|   < (_| | || (_| | | (_) | (_| |
|_|\_\__,_|\__\__,_|_|\___/ \__, |
                            |___/  v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
