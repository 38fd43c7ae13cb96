mod config;
mod error;
mod input;
mod report;
mod synth;

use std::{
    path::{Path, PathBuf},
    process::exit,
};

use clap::{Parser, Subcommand};
use config::{
    DumpConfiguration, OutputFormat, get_default_config_path_for,
    read_configuration_or_default_for,
};
use error::DumpError;
use log::{LevelFilter, debug, error, info, warn};

/// Decode, verify or synthesize EDID blobs
#[derive(Parser)]
#[command(name = "ds-edid-dump")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file to use instead of the per-user default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging, repeat for trace output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Ignore input past this many bytes
    #[arg(long, global = true)]
    max_bytes: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify and decode an EDID file, then print a report
    Parse {
        /// Binary EDID or hex text
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the header and base block checksum
    Verify {
        /// Binary EDID or hex text
        file: PathBuf,
    },

    /// Write a sample base block plus CTA-861 extension
    Synth {
        /// Output path
        out: PathBuf,

        /// Write hex text instead of binary
        #[arg(long)]
        hex: bool,
    },
}

fn load_configuration(path: Option<&Path>) -> DumpConfiguration {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match get_default_config_path_for::<DumpConfiguration>() {
            Ok(path) => path,
            Err(e) => {
                warn!("{}, using default configuration", e);
                return DumpConfiguration::default();
            }
        },
    };
    read_configuration_or_default_for(&path)
}

fn log_level(config: &DumpConfiguration, verbose: u8) -> LevelFilter {
    match verbose {
        0 => config.level_filter(),
        1 => config.level_filter().max(LevelFilter::Debug),
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    // The logger starts at the default level until the configuration is read
    env_logger::builder()
        .filter_level(LevelFilter::Trace)
        .format_timestamp(None)
        .init();
    log::set_max_level(log_level(&DumpConfiguration::default(), cli.verbose));

    let mut config = load_configuration(cli.config.as_deref());
    if let Some(max_bytes) = cli.max_bytes {
        config.max_edid_bytes = max_bytes;
    }
    log::set_max_level(log_level(&config, cli.verbose));
    debug!("Using configuration {:?}", config);

    let result = match cli.command {
        Commands::Parse { file, json } => {
            if json {
                config.output_format = OutputFormat::Json;
            }
            run_parse(&file, &config)
        }
        Commands::Verify { file } => run_verify(&file, &config),
        Commands::Synth { out, hex } => run_synth(&out, hex),
    };

    if let Err(e) = result {
        error!("{}", e);
        exit(1);
    }
}

fn run_parse(file: &Path, config: &DumpConfiguration) -> Result<(), DumpError> {
    let bytes = input::read_edid_file(file, config.max_edid_bytes)?;

    let mut data = ds_edid::EdidData::default();
    let status = ds_edid::parse_into(&bytes, &mut data);
    if !status.is_ok() {
        return Err(DumpError::Edid(status));
    }

    match config.output_format {
        OutputFormat::Text => print!("{}", report::TextReport(&data)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
    }
    Ok(())
}

fn run_verify(file: &Path, config: &DumpConfiguration) -> Result<(), DumpError> {
    let bytes = input::read_edid_file(file, config.max_edid_bytes)?;

    let status = ds_edid::EdidStatus::from(&ds_edid::verify(&bytes));
    println!("{}", status);
    if status.is_ok() {
        Ok(())
    } else {
        Err(DumpError::Edid(status))
    }
}

fn run_synth(out: &Path, hex: bool) -> Result<(), DumpError> {
    let bytes = synth::sample_edid()?;

    let data = if hex {
        input::encode_hex(&bytes).into_bytes()
    } else {
        bytes
    };

    std::fs::write(out, &data).map_err(|source| DumpError::Io {
        path: out.to_path_buf(),
        source,
    })?;
    info!("Wrote {} byte sample EDID to {:?}", data.len(), out);
    Ok(())
}
