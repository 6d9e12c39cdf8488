use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

use gtiff_metadata::config::Config;
use gtiff_metadata::error::{EXIT_COLLABORATOR, EXIT_USAGE, Error};
use gtiff_metadata::flag::parse_yes_no;
use gtiff_metadata::metadata::{DomainListing, format_listing};
use gtiff_metadata::pipeline::{self, CopyReport, RemapOptions};

#[derive(Parser, Debug)]
#[command(
    name = "gtiff-metadata",
    version,
    about = "Copy a GeoTIFF with GDAL and re-insert its EXIF metadata into the copy"
)]
struct Cli {
    /// Source raster
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Destination raster, created as a copy of INPUT
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Remove the EXIF_ prefix from the tags (Y|y|yes or N|n|no)
    #[arg(value_name = "STRIP")]
    strip: Option<String>,

    /// Keep the tags in the EXIF domain instead of the default domain (Y|y|yes or N|n|no)
    #[arg(value_name = "RETAG")]
    retag: Option<String>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Output the run as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Exit code of the first typed error in the chain.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map(Error::exit_code)
        .unwrap_or(EXIT_COLLABORATOR)
}

fn run(cli: &Cli) -> Result<()> {
    // Handle --init
    if cli.init {
        let config = Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    let input = cli.input.as_ref().ok_or(Error::MissingArguments("INPUT"))?;
    let output = cli.output.as_ref().ok_or(Error::MissingArguments("OUTPUT"))?;
    let strip = cli.strip.as_deref().ok_or(Error::MissingArguments("STRIP"))?;
    let retag = cli.retag.as_deref().ok_or(Error::MissingArguments("RETAG"))?;

    let strip = parse_yes_no(strip)?;
    let retag = parse_yes_no(retag)?;

    let config = Config::load(cli.config.as_deref())?;
    let options = RemapOptions::new(&config, strip, retag);

    let report = pipeline::copy_with_metadata(input, output, &options, &config)?;

    if cli.json {
        print_json(&report)?;
    } else {
        print_transcript(&report, &config, &options);
    }

    let remap = &report.remap;
    log::info!(
        "Done: {} written, {} skipped, {} failed",
        remap.written.len(),
        remap.skipped.len(),
        remap.failed.len()
    );

    if config.output.fail_on_write_error && !remap.failed.is_empty() {
        return Err(Error::WriteFailures(remap.failed.len()).into());
    }

    Ok(())
}

const RULE: &str = "# -------------------------------------------";

fn banner(title: &str) {
    println!("{RULE}");
    println!("#  {title}");
    println!("{RULE}");
}

/// Print the human-readable diagnostic transcript of a run.
fn print_transcript(report: &CopyReport, config: &Config, options: &RemapOptions) {
    let input = report.source.display();
    let output = report.destination.display();

    println!("GDAL VERSION {}\n", report.gdal_version);

    banner("INVESTIGATE SOURCE");
    println!("..open {} file {input}", config.driver);
    println!(".OK open\n");
    if config.output.list_domains {
        print!("{}", format_listing(&input.to_string(), &report.before));
    }

    banner("CREATE COPY");
    println!("..copy {} file {input} to {output}", config.driver);
    println!(".OK open\n");

    println!("..copy {} data from {input} to {output}", options.source_domain);
    match report.target_domain.name() {
        Some(name) => println!("..use the {name} metadata domain"),
        None => println!("..use the default domain"),
    }
    if let Some(pattern) = &options.strip_pattern {
        println!("..remove the prefix {pattern} from the tags");
    }
    for (ix, tag) in report.remap.written.iter().enumerate() {
        println!("  TAG.{:02}: {}={}", ix, tag.key, tag.value);
    }
    for failure in &report.remap.failed {
        println!("  FAILED: {}={} ({})", failure.tag.key, failure.tag.value, failure.reason);
    }

    banner("RESULTS");
    if config.output.list_domains {
        print!("{}", format_listing(&output.to_string(), &report.after));
    }

    banner("CLEAN UP");
    println!("..flush destination");
    println!("..close source");
    println!("..close destination");

    banner("EOF");
}

fn listing_json(domains: &[DomainListing]) -> Vec<serde_json::Value> {
    domains
        .iter()
        .map(|d| {
            serde_json::json!({
                "domain": d.domain.name(),
                "tags": d.tags,
            })
        })
        .collect()
}

/// Print the run as a JSON document.
fn print_json(report: &CopyReport) -> Result<()> {
    let json = serde_json::json!({
        "gdal_version": report.gdal_version,
        "source": report.source.display().to_string(),
        "destination": report.destination.display().to_string(),
        "target_domain": report.target_domain.name(),
        "before": listing_json(&report.before),
        "after": listing_json(&report.after),
        "written": report.remap.written,
        "skipped": report.remap.skipped,
        "failed": report
            .remap
            .failed
            .iter()
            .map(|f| serde_json::json!({
                "key": f.tag.key,
                "value": f.tag.value,
                "error": f.reason,
            }))
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
