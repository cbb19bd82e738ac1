//! # pgdiag
//!
//! Render PostgreSQL error objects (as JSON) the way `psql` prints them.
//!
//! ```sh
//! echo '{"severity":"ERROR","code":"42601","message":"syntax error at or near \"FORM\"","position":"10"}' \
//!   | pgdiag --query 'SELECT * FORM t' --verbosity default
//! ```

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::debug;
use serde_json::Value;

use pgdiag::{
    ContextVisibility, DatabaseError, RenderOptions, SqlQuery, Verbosity,
    diagnostics::{DEFAULT_MAX_REPORTS, DiagnosticFields, DiagnosticReport, DiagnosticsAggregator},
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render database error diagnostics like the server's own client.", long_about = None)]
struct Cli {
    /// JSON error object (or array of objects); `-` or nothing reads stdin.
    input: Option<PathBuf>,

    #[arg(long, short = 'q', help = "Query text the error was raised for.")]
    query: Option<String>,

    #[arg(long, help = "Read the query text from a file.", conflicts_with = "query")]
    query_file: Option<PathBuf>,

    #[arg(long, help = "Bound parameter values as a JSON array.")]
    values: Option<String>,

    #[arg(long, help = "Render options as JSON (verbosityLevel, showContextLevel, ...).")]
    options: Option<PathBuf>,

    #[arg(long, short = 'v', help = "terse, default, verbose or sqlstate (default: verbose).")]
    verbosity: Option<Verbosity>,

    #[arg(long, short = 'c', help = "never, errors or always (default: never).")]
    context: Option<ContextVisibility>,

    #[arg(long, help = "Do not echo the query after the message.")]
    hide_query: bool,

    #[arg(long, help = "Do not echo bound values after the message.")]
    hide_values: bool,

    #[arg(long, help = "Only print line:column of the error position (single object input only).")]
    position: bool,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_REPORTS,
        help = "Maximum number of reports printed for an array input."
    )]
    max_reports: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = load_options(cli)?;
    let query = load_query(cli)?;
    let input = read_input(cli.input.as_ref())?;
    let value: Value = serde_json::from_str(&input).context("input is not valid JSON")?;
    debug!("rendering with {:?}", options);

    if let Value::Array(items) = &value {
        if cli.position {
            bail!("--position needs a single error object, not an array");
        }
        let reports = items
            .iter()
            .map(|item| -> Result<DiagnosticReport> {
                Ok(DiagnosticReport::new(DiagnosticFields::from_json(item)?, query.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        let rendered = DiagnosticsAggregator::new(&reports)
            .with_options(options)
            .with_max_reports(Some(cli.max_reports))
            .render();
        print!("{}", rendered);
        return Ok(());
    }

    let fields = DiagnosticFields::from_json(&value)?;
    let error = DatabaseError::new(fields, query, &options);

    if cli.position {
        match error.position() {
            Some(position) => println!("{}:{}", position.line, position.column),
            None => bail!("error has no position inside a known query"),
        }
        return Ok(());
    }

    println!("{}", error);
    Ok(())
}

fn load_options(cli: &Cli) -> Result<RenderOptions> {
    let mut options = match &cli.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read options file {}", path.display()))?;
            RenderOptions::from_json_str(&text)?
        }
        None => RenderOptions::default(),
    };

    if let Some(verbosity) = cli.verbosity {
        options = options.with_verbosity(verbosity);
    }
    if let Some(context) = cli.context {
        options = options.with_context(context);
    }
    if cli.hide_query {
        options = options.hide_query(true);
    }
    if cli.hide_values {
        options = options.hide_query_values(true);
    }
    Ok(options)
}

fn load_query(cli: &Cli) -> Result<SqlQuery> {
    let text = match (&cli.query, &cli.query_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read query file {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let values = match &cli.values {
        Some(raw) => match serde_json::from_str::<Value>(raw).context("--values is not valid JSON")? {
            Value::Array(values) => Some(values),
            other => Some(vec![other]),
        },
        None => None,
    };

    Ok(SqlQuery { text, values })
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
