//! throwscan CLI entry point.

use clap::Parser;
use throwscan::cli::{self, Cli, EXIT_ERROR, EXIT_SUCCESS};
use throwscan::logging;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_ERROR } else { EXIT_SUCCESS };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    logging::init_logging(cli.quiet);

    let exit_code = match cli::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
