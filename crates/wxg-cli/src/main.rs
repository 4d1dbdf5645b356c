//! `wxg-to-go`: convert wxGlade documents into wxGo source.

mod cli;
mod error;
mod logging;

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::CliError;
use logging::{init_logging, LoggingConfig};

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(args.verbose));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("wxg-to-go: {}", err.normalize());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<(), CliError> {
    if !args.input.is_file() {
        return Err(CliError::InputNotFound(args.input.clone()));
    }

    if args.dump_units {
        let source = fs::read_to_string(&args.input).map_err(wxg_codegen::CodegenError::from)?;
        let units = wxg_codegen::resolve_source(&source)?;
        println!("{}", serde_json::to_string_pretty(&units)?);
        return Ok(());
    }

    let output = args.output.as_deref().ok_or(CliError::MissingOutput)?;
    if output.exists() && !args.force {
        return Err(CliError::OutputExists(output.to_path_buf()));
    }

    log::info!("converting {} -> {}", args.input.display(), output.display());
    wxg_codegen::convert_file(&args.input, output, &args.convert_options(), args.force)?;
    Ok(())
}
