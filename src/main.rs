use anyhow::{Context, Result};
use clap::Parser;
use gramattr::csv_reader;
use gramattr::parser::parse_pipeline;
use gramattr::runtime::{assign_attributes, render_table};
use gramattr::{InputFormat, OutputFormat, Table};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gramattr")]
#[command(about = "Assign colors, markers, dashes and categories to groups of CSV data", long_about = None)]
struct Args {
    /// Attribute DSL string (e.g., 'color(region, palette: ["red", "blue"]) | marker(kind)')
    dsl: String,

    /// Format of the data read from stdin
    #[arg(long, value_enum, default_value_t = InputFormat::Csv)]
    input_format: InputFormat,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_table(format: InputFormat) -> Result<Table> {
    match format {
        InputFormat::Csv => {
            let csv_data = csv_reader::read_csv_from_stdin().context("Failed to read CSV from stdin")?;
            Ok(Table::from_csv(csv_data))
        }
        InputFormat::Json => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read JSON from stdin")?;
            let value: serde_json::Value = serde_json::from_str(&raw).context("Invalid JSON input")?;
            Table::from_json(&value)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Parse the DSL string before touching stdin
    let calls = match parse_pipeline(&args.dsl) {
        Ok((_, calls)) => calls,
        Err(e) => {
            eprintln!("Parse error: {:?}", e);
            std::process::exit(1);
        }
    };

    let table = read_table(args.input_format)?;

    let reports = assign_attributes(&calls, table).context("Failed to assign attributes")?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&reports).context("Failed to serialize output")? + "\n",
        OutputFormat::Table => render_table(&reports),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(output.as_bytes())
        .context("Failed to write output to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
