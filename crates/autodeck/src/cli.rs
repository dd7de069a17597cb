use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autodeck")]
#[command(author, version, about)]
#[command(long_about = "A self-advancing slide presenter.\n\n\
    Slides advance on a timer with a progress bar; a control panel hides\n\
    itself after a few seconds and comes back on a tap near the top.\n\n\
    Examples:\n  \
    autodeck slides.md                 Present fullscreen with autoplay\n  \
    autodeck slides.md --windowed      Present in a window\n  \
    autodeck slides.md --duration 60   One minute per slide\n  \
    autodeck slides.md --no-autoplay   Start paused")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Markdown file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Seconds per slide
    #[arg(long, global = false, value_parser = clap::value_parser!(u64).range(1..))]
    pub duration: Option<u64>,

    /// Start with autoplay paused
    #[arg(long, global = false)]
    pub no_autoplay: bool,

    /// Keep the control panel pinned on screen
    #[arg(long, global = false)]
    pub no_auto_hide: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.duration, defaults.auto_hide, defaults.theme)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Presenter options given on the command line. They override the config.
pub struct LaunchOptions {
    pub windowed: bool,
    pub slide: Option<usize>,
    pub duration: Option<u64>,
    pub no_autoplay: bool,
    pub no_auto_hide: bool,
}

impl Cli {
    /// Log level implied by `-v`/`-q`, used when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::print_version();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    let options = LaunchOptions {
                        windowed: self.windowed,
                        slide: self.slide,
                        duration: self.duration,
                        no_autoplay: self.no_autoplay,
                        no_auto_hide: self.no_auto_hide,
                    };
                    crate::app::run(file, options)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
