use commands::command_argument_builder;
use katalog::handlers::{handle_profiles, handle_scrape};
use katalog_core::print_banner;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    match chosen_command.subcommand() {
        Some(("scrape", primary_command)) => handle_scrape(primary_command).await,
        Some(("profiles", _)) => handle_profiles(),
        _ => unreachable!("clap should ensure we don't get here"),
    }
}
