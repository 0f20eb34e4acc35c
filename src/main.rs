#![deny(rustdoc::broken_intra_doc_links, rustdoc::bare_urls, rust_2018_idioms)]

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use resource_patcher::patcher;
use resource_patcher::resources::ResourceList;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Plain,
    Json,
}

#[derive(Clone, Parser)]
#[clap(version)]
struct Args {
    /// The tracing filter used for logs
    #[clap(
        long,
        env = "RESOURCE_PATCHER_LOG",
        default_value = "resource_patcher=info,warn"
    )]
    log_level: String,

    /// The logging format
    #[clap(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    /// Read the ResourceList from this file instead of stdin
    input: Option<PathBuf>,

    /// Write the ResourceList to this file instead of stdout
    #[clap(long, short)]
    output: Option<PathBuf>,
}

// stdout carries the ResourceList, so logs go to stderr.
fn init_logging(log_level: &str, log_format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(log_level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match log_format {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|err| anyhow!(err))
}

fn read_input(input: Option<&PathBuf>) -> Result<ResourceList> {
    let reader: Box<dyn Read> = match input {
        Some(path) => {
            Box::new(File::open(path).with_context(|| format!("opening {}", path.display()))?)
        }
        None => Box::new(io::stdin().lock()),
    };
    Ok(ResourceList::from_reader(reader)?)
}

fn write_output(list: &ResourceList, output: Option<&PathBuf>) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    list.to_writer(&mut writer)?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let Args {
        log_level,
        log_format,
        input,
        output,
    } = Args::parse();

    init_logging(&log_level, log_format)?;

    let mut list = read_input(input.as_ref()).context("reading ResourceList")?;
    debug!(items = list.items.len(), "read resource list");

    let exit_code = run(&mut list);
    if exit_code != 0 {
        return Ok(ExitCode::from(exit_code));
    }

    write_output(&list, output.as_ref()).context("writing ResourceList")?;
    info!(results = list.results.len(), "done");
    Ok(ExitCode::SUCCESS)
}

/// Patches the list and picks the process exit code. Error results are reported
/// inside the list and do not fail the run.
fn run(list: &mut ResourceList) -> u8 {
    if !patcher::process(list) {
        error!("function failure");
        return 1;
    }
    if list.has_errors() {
        warn!("one or more results carry errors, see results");
    }
    0
}
