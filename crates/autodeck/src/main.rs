use autodeck::cli::Cli;
use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // RUST_LOG wins over -v/-q when set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .filter_module("egui", log::LevelFilter::Warn)
        .filter_module("eframe", log::LevelFilter::Warn)
        .format_timestamp_millis()
        .init();

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
