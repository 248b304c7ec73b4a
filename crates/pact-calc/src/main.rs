use std::io;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::{error, info};

use pact_calc::{DEFAULT_INPUT, checked, logging};

#[derive(Parser, Debug)]
#[command(
    name = "pact-calc",
    version,
    about = "Run the contract-checked calculation pipeline and print the result",
    long_about = "Computes (input + 5) * 2 through contract-checked steps and prints `Result: <value>`. \
                  A violated contract aborts the process unless --checked is given."
)]
struct Cli {
    /// Value passed to `calculate`
    #[arg(long, value_name = "N", default_value_t = DEFAULT_INPUT, allow_negative_numbers = true)]
    input: i32,

    /// Report contract violations as errors (exit status 1) instead of aborting
    #[arg(long)]
    checked: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(logging::level_from_flags(cli.quiet, cli.verbose));
    info!(input = cli.input, checked = cli.checked, "starting pipeline");

    if cli.checked {
        let mut stdout = io::stdout().lock();
        match checked::run(&mut stdout, cli.input) {
            Ok(result) => {
                info!(result, "pipeline finished");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("{err}");
                ExitCode::FAILURE
            }
        }
    } else {
        match pact_calc::run(cli.input) {
            Ok(result) => {
                info!(result, "pipeline finished");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("failed to write result: {err}");
                ExitCode::FAILURE
            }
        }
    }
}
