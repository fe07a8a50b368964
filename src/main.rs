//! nodebb-export - NodeBB topics to Markdown

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = nodebb_export::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
