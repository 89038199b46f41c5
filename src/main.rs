//! LazyQR - Terminal-based QR code designer
//!
//! Without a subcommand the interactive designer opens. The other commands
//! render, convert colors and edit configuration without a terminal UI.

use clap::{Parser, Subcommand};
use lazyqr::cli::{CliResult, ColorArgs, ConfigArgs, RenderArgs, TuiArgs};
use lazyqr::logging;

/// LazyQR - Terminal-based QR code designer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive designer (default)
    Tui(TuiArgs),
    /// Render a QR code to a file
    Render(RenderArgs),
    /// Convert a color between hex, RGB and CMYK
    Color(ColorArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn run(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => TuiArgs::default().execute(cli.verbose),
        Some(Commands::Tui(args)) => args.execute(cli.verbose),
        Some(Commands::Render(args)) => {
            logging::init_stderr(cli.verbose);
            args.execute()
        }
        Some(Commands::Color(args)) => {
            logging::init_stderr(cli.verbose);
            args.execute()
        }
        Some(Commands::Config(args)) => {
            logging::init_stderr(cli.verbose);
            args.execute()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        std::process::exit(err.report().code());
    }
}
