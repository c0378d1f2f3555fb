use std::process::ExitCode;

use clap::Parser;

use pageweave::cli::{json_envelope, run, Cli};
use pageweave::console::style_text;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = run(&cli);

    if cli.json {
        println!("{}", json_envelope(&result));
        return match result {
            Ok(_) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let line = format!("error: {:#}", err);
            // Styling failures cannot happen for a fixed color name.
            let styled = style_text(&line, "red").unwrap_or(line);
            eprintln!("{}", styled);
            ExitCode::FAILURE
        }
    }
}
