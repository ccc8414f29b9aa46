use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Generates localized taxi activity reports from JSON payloads.
///
/// Fonts are searched under `assets/fonts`, the directory named by `TAXI_REPORT_FONTS_DIR`, and
/// the usual system font directories.
#[derive(Parser)]
#[command(author, version, about = "Render taxi activity reports to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a payload straight to a PDF file.
    Render {
        /// JSON payload to read, `-` for standard input.
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Destination of the PDF.
        #[arg(short, long, default_value = "taxi_report.pdf")]
        output: PathBuf,

        /// Generation date printed into the footer (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Run the request handler and print the gateway response as JSON.
    Respond {
        /// JSON payload to read, `-` for standard input.
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Generation date printed into the footer (YYYY-MM-DD), defaults to today.
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "taxi_report=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            today,
        } => render(&input, &output, today),
        Commands::Respond { input, today } => respond(&input, today),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn render(input: &Path, output: &Path, today: Option<NaiveDate>) -> Result<(), Box<dyn Error>> {
    let body = read_input(input)?;
    let bytes = taxi_report::generate_report(&body, today.unwrap_or_else(local_today))?;
    fs::write(output, &bytes)?;
    println!("Generated {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

fn respond(input: &Path, today: Option<NaiveDate>) -> Result<(), Box<dyn Error>> {
    let body = read_input(input)?;
    let response = taxi_report::handle_request_on(&body, today.unwrap_or_else(local_today));
    log::info!("responding with status {}", response.status_code);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn read_input(input: &Path) -> io::Result<String> {
    if input.as_os_str() == "-" {
        let mut body = String::new();
        io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        fs::read_to_string(input)
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
