//! mediadupe - duplicate video finder for media libraries
//!
//! Entry point for the mediadupe CLI application.

use std::io::IsTerminal;

use clap::Parser;
use mediadupe::{
    cli::Cli,
    console::Console,
    error::{ExitCode, StructuredError},
};

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;
    let color = !cli.no_color && std::io::stderr().is_terminal();

    match mediadupe::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::for_error(&err);

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                match serde_json::to_string_pretty(&structured) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err),
                }
            } else {
                let mut console = Console::stderr(color);
                if exit_code == ExitCode::Interrupted {
                    console.line("");
                    console.error(format!(
                        "[{}] Operation interrupted by user.",
                        exit_code.code_prefix()
                    ));
                } else {
                    console.error(format!("[{}] Error: {}", exit_code.code_prefix(), err));
                    for cause in err.chain().skip(1) {
                        console.line(format!("  Caused by: {cause}"));
                    }
                    log::debug!("Error details: {:?}", err);
                }
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
