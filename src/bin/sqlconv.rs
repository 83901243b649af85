//! sqlconv: convert SQL dumps between dialects.
//!
//! Reads a dump from a file or standard input, writes the `CREATE TABLE` and
//! `INSERT` statements it contains in the output dialect to standard output,
//! and reports untranslatable constructs on standard error.
//!
//! ```bash
//! mysqldump shop | sqlconv --input mysql --output sqlite3 | sqlite3 shop.db
//! sqlconv --input mssql --output postgresql --validate dump.sql > dump.pg.sql
//! ```

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use sqlconv::{Converter, Dialect, SqlWriter, preprocess_mssql};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlconv", version)]
#[command(about = "Convert CREATE TABLE and INSERT statements between SQL dialects", long_about = None)]
struct Cli {
    /// Dialect of the input; omit for a best-effort, dialect-agnostic parse
    #[arg(short, long, value_enum, env = "SQLCONV_INPUT")]
    input: Option<InputDialect>,

    /// Dialect to write
    #[arg(short, long, value_enum, default_value = "sqlite3", env = "SQLCONV_OUTPUT")]
    output: OutputDialect,

    /// Warn about inserts that do not match the tables declared before them
    #[arg(long)]
    validate: bool,

    /// Write the declared tables as JSON to this file after a successful run
    #[arg(long, value_name = "PATH")]
    schema_json: Option<PathBuf>,

    /// Input file; standard input when absent or `-`
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputDialect {
    Mysql,
    Postgresql,
    Sqlite3,
    Oracle,
    Mssql,
}

impl From<InputDialect> for Dialect {
    fn from(val: InputDialect) -> Self {
        match val {
            InputDialect::Mysql => Dialect::MySql,
            InputDialect::Postgresql => Dialect::PostgreSql,
            InputDialect::Sqlite3 => Dialect::Sqlite,
            InputDialect::Oracle => Dialect::Oracle,
            InputDialect::Mssql => Dialect::SqlServer,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputDialect {
    Mysql,
    Postgresql,
    Sqlite3,
}

impl From<OutputDialect> for Dialect {
    fn from(val: OutputDialect) -> Self {
        match val {
            OutputDialect::Mysql => Dialect::MySql,
            OutputDialect::Postgresql => Dialect::PostgreSql,
            OutputDialect::Sqlite3 => Dialect::Sqlite,
        }
    }
}

/// `fmt::Write` over an `io::Write`, keeping the first I/O error.
struct IoWriter<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> IoWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    fn finish(mut self) -> io::Result<W> {
        match self.error.take() {
            Some(err) => Err(err),
            None => self.inner.flush().map(|()| self.inner),
        }
    }
}

impl<W: Write> fmt::Write for IoWriter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|err| {
            self.error.get_or_insert(err);
            fmt::Error
        })
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut src = String::new();
            io::stdin()
                .read_to_string(&mut src)
                .context("Failed to read standard input")?;
            Ok(src)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = cli.input.map(Dialect::from);
    let output = Dialect::from(cli.output);

    let mut src = read_input(cli.file.as_deref())?;
    if input == Some(Dialect::SqlServer) {
        src = preprocess_mssql(&src);
    }
    tracing::debug!(bytes = src.len(), ?input, %output, "read input");

    let stdout = io::stdout();
    let mut writer = SqlWriter::new(
        output,
        IoWriter::new(BufWriter::new(stdout.lock())),
        IoWriter::new(io::stderr()),
    );
    let mut converter = Converter::new(input).with_validation(cli.validate);
    let result = converter.run(&src, &mut writer);

    // Statements converted before a failure are still written out.
    let (sql, diagnostics) = writer.into_parts();
    sql.finish().context("Failed to write converted SQL")?;
    diagnostics.finish().context("Failed to write diagnostics")?;
    let stats = result.context("Conversion failed")?;
    tracing::info!(
        tables = stats.tables,
        inserts = stats.inserts,
        skipped = stats.skipped,
        "conversion finished"
    );

    if let Some(path) = &cli.schema_json {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut file = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut file, converter.catalog())
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        file.flush()
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
