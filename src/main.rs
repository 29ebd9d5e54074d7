use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use lis_basedict::input::base::{DictionaryCache, load_base_dictionary};
use lis_basedict::input::delimited::read_csv_table;
use lis_basedict::input::workbook::{list_sheets, read_sheet_table};
use lis_basedict::input::{InputError, load_schema_overrides};
use lis_basedict::logging;
use lis_basedict::model::{ColumnSchema, dictionary_key};
use lis_basedict::pipeline::PipelineError;
use lis_basedict::pipeline::merge::run_merge;
use lis_basedict::pipeline::replace::run_replace;
use lis_basedict::report::json::{render_entry_json, write_dictionary};
use lis_basedict::report::text::{render_dictionary_overview, render_summary_text};
use lis_basedict::report::{DEFAULT_OUTPUT_NAME, OutputTarget, ReportError, RunSummary};

#[derive(Debug, Parser)]
#[command(
    name = "lis-basedict",
    version,
    about = "Update the LIS test-name to assay base dictionary"
)]
struct Cli {
    /// Log filter, e.g. `info` or `lis_basedict=debug`. Defaults to RUST_LOG, then `info`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add or overwrite tests from a CSV of new-test requests.
    Merge {
        /// Current base dictionary (JSON).
        #[arg(long)]
        base: PathBuf,
        /// New tests (CSV, optionally .csv.gz).
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Rebuild the whole dictionary from one workbook sheet.
    Replace {
        /// Dictionary workbook (.xlsx, .xls, .ods).
        #[arg(long)]
        input: PathBuf,
        /// Sheet holding the dictionary.
        #[arg(long)]
        sheet: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the sheet names of a workbook.
    Sheets {
        #[arg(long)]
        input: PathBuf,
    },
    /// Summarize a dictionary or show one test's entry.
    Inspect {
        #[arg(long)]
        base: PathBuf,
        /// LIS test name; matched case-insensitively.
        #[arg(long)]
        test: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
struct OutputArgs {
    /// Output path, or `-` for stdout.
    #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
    out: String,
    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
    /// JSON file overriding the accepted column headers per field.
    #[arg(long)]
    schema: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("test '{0}' is not in the dictionary")]
    UnknownTest(String),
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref());
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Merge {
            base,
            input,
            output,
        } => {
            let schema = resolve_schema(ColumnSchema::incremental_v1(), output.schema.as_deref())?;
            let mut cache = DictionaryCache::new();
            let base_dict = cache.load(&base)?;
            let table = read_csv_table(&input)?;
            let outcome = run_merge(&base_dict, &table, &schema)?;

            write_dictionary(
                &outcome.dictionary,
                &OutputTarget::parse(&output.out),
                output.pretty,
            )?;
            let source = input.display().to_string();
            let summary = RunSummary::from_merge(&source, &base_dict, &outcome);
            eprint!("{}", render_summary_text(&summary));
        }
        Command::Replace {
            input,
            sheet,
            output,
        } => {
            let schema = resolve_schema(ColumnSchema::full_v1(), output.schema.as_deref())?;
            let table = read_sheet_table(&input, &sheet)?;
            let outcome = run_replace(&table, &schema)?;

            write_dictionary(
                &outcome.dictionary,
                &OutputTarget::parse(&output.out),
                output.pretty,
            )?;
            let source = format!("{} [{}]", input.display(), sheet);
            eprint!("{}", render_summary_text(&RunSummary::from_replace(&source, &outcome)));
        }
        Command::Sheets { input } => {
            for name in list_sheets(&input)? {
                println!("{name}");
            }
        }
        Command::Inspect { base, test } => {
            let dictionary = load_base_dictionary(&base)?;
            match test {
                Some(name) => {
                    let key = dictionary_key(&name);
                    let entry = dictionary
                        .lookup(&name)
                        .ok_or_else(|| AppError::UnknownTest(name.clone()))?;
                    println!("{}", render_entry_json(&key, entry)?);
                }
                None => print!("{}", render_dictionary_overview(&dictionary)),
            }
        }
    }
    Ok(())
}

fn resolve_schema(
    preset: ColumnSchema,
    overrides: Option<&Path>,
) -> Result<ColumnSchema, AppError> {
    match overrides {
        Some(path) => {
            let overrides = load_schema_overrides(path)?;
            tracing::info!("using column overrides from {}", path.display());
            preset.with_overrides(overrides).map_err(|field| {
                AppError::Input(InputError::UnsupportedOverride {
                    path: path.to_path_buf(),
                    field,
                })
            })
        }
        None => Ok(preset),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
