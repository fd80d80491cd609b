extern crate env_logger;
extern crate listing_cleaner;
extern crate serde_json;

pub mod options;

use clap::Parser;
use listing_cleaner::feed::rewrite_feed_with;
use listing_cleaner::utils::log;
use listing_cleaner::Cleaner;
use options::{Cli, Commands};
use std::io::{Read, Write};
use std::path::Path;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn read_input(input: Option<&Path>) -> CliResult<String> {
    Ok(match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    })
}

fn run(cli: Cli) -> CliResult<()> {
    let cleaner = Cleaner::new(&cli.config()?);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Some(Commands::Clean { input }) => {
            let html = read_input(input.as_deref())?;
            writeln!(stdout, "{}", cleaner.clean(&html)?)?;
        }
        None => {
            let html = read_input(None)?;
            writeln!(stdout, "{}", cleaner.clean(&html)?)?;
        }
        Some(Commands::Batch { input }) => {
            let items: Vec<Option<String>> =
                serde_json::from_str(&std::fs::read_to_string(&input)?)?;
            let htmls: Vec<String> = items.into_iter().map(Option::unwrap_or_default).collect();
            let cleaned = cleaner
                .clean_batch(&htmls)
                .into_iter()
                .collect::<Result<Vec<_>, _>>()?;

            log("cleaned batch", format!("{} descriptions", cleaned.len()));
            writeln!(stdout, "{}", serde_json::to_string_pretty(&cleaned)?)?;
        }
        Some(Commands::Feed { input, output }) => {
            let bytes = std::fs::read(&input)?;
            let report = rewrite_feed_with(&bytes, &cleaner)?;

            match output {
                Some(output) => {
                    std::fs::write(&output, &report.bytes)?;
                    log("feed written", output.display().to_string());
                }
                None => stdout.write_all(&report.bytes)?,
            }
        }
    }

    stdout.flush()?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        use env_logger::Env;
        let env = Env::default()
            .filter_or("RUST_LOG", "info")
            .write_style_or("RUST_LOG_STYLE", "always");

        env_logger::init_from_env(env);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
