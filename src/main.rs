//! `hillcrypt MESSAGE KEY MODE [--inverse] [--decrypt] [-v...]`

use std::process::ExitCode;

use hillcrypt::cli::{self, CliError, EXIT_FAILURE_CODE};
use hillcrypt::logging;
use log::error;

fn main() -> ExitCode {
    let invocation = match cli::parse_args(std::env::args()) {
        Ok(invocation) => invocation,
        Err(CliError::Info(e)) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            logging::init(0);
            error!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    logging::init(invocation.verbose);
    match cli::run(&invocation) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(EXIT_FAILURE_CODE)
        }
    }
}
