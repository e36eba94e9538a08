use katalog::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("katalog")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("katalog")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scrape")
                .about(
                    "Extract the category/subcategory/filter hierarchy of a storefront \
                into a JSON document.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("Root URL of the storefront")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-s --"site" <SITE>)
                        .required(false)
                        .help("Built-in selector profile to use")
                        .value_parser(["amazon", "digikala", "temu"])
                        .conflicts_with("profile"),
                )
                .arg(
                    arg!(-p --"profile" <PATH>)
                        .required(false)
                        .help("Path to a JSON selector profile")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("site"),
                )
                .arg(
                    arg!(-d --"max-depth" <LEVELS>)
                        .required(false)
                        .help("How many levels below the top-level categories to descend")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("2"),
                )
                .arg(
                    arg!(-c --"per-level-cap" <COUNT>)
                        .required(false)
                        .help("Maximum siblings kept at any single tree level")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("8"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the JSON document")
                        .default_value("categories.json"),
                ),
        )
        .subcommand(
            command!("profiles").about("List built-in site profiles and their selector chains"),
        )
}
