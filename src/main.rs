/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use clap::Parser;
use std::io;
use std::process::ExitCode;
use txtrader_client::cli::{Cli, report_error, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = report_error(&e, verbose, &mut io::stderr());
            ExitCode::FAILURE
        }
    }
}
