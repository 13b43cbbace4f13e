use clap::{Parser, Subcommand};

use crate::global_settings::GlobalSettings;

#[derive(Parser)]
#[clap(version, author, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile every file matching a glob (default `**/*.uwu`) to host
    /// source text, writing `<path> + ".js"` next to each one.
    Compile {
        #[clap(value_parser, value_name = "GLOB")]
        glob: Option<String>,
    },
}

/// Parses argv, runs the requested subcommand, and returns whether every
/// compiled unit succeeded -- `main` maps this to the process exit code.
pub fn exec(settings: &GlobalSettings) -> Result<bool, uwu_driver::DriverError> {
    let cli = Cli::parse();

    let Command::Compile { glob } = cli.command;
    let summary = uwu_driver::compile(glob.as_deref())?;

    let reports = summary.reports();
    let mut stderr = std::io::stderr().lock();
    uwu_driver::render_reports_io(
        &mut stderr,
        &reports,
        settings.colorize == crate::global_settings::ColorChoice::Always,
    );

    Ok(!summary.any_failed())
}
