use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use zonegen::address::{expand_ipv6, link_local_from_mac, mac_to_eui64};
use zonegen::config::{GeneratorConfig, load_zone};
use zonegen::{Result, ZoneFileWriter};

/// Separator written between zone files by the `all` command
const ZONE_SEPARATOR: &str = "-=-=-=-=-=-";

#[derive(Parser)]
#[command(
    name = "zonegen",
    version,
    about = "Generate BIND zone files from a zone description"
)]
struct Cli {
    /// Serial number for the SOA record (defaults to today's date, YYYYMMDD)
    #[arg(long, global = true, value_name = "SERIAL")]
    serial: Option<String>,

    /// Write to FILE instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the forward zone (A, AAAA, MX, CNAME)
    Forward {
        /// Zone description (TOML)
        zone: PathBuf,
    },
    /// Write the reverse zone for an IPv4 prefix such as 192.168.0.
    Reverse4 { zone: PathBuf, prefix: String },
    /// Write the reverse zone for an IPv6 nibble prefix such as f.e.8.0.0.0.0.0.
    Reverse6 { zone: PathBuf, prefix: String },
    /// Write the forward zone and both reverse zones
    All {
        zone: PathBuf,
        #[arg(long, value_name = "PREFIX")]
        v4_prefix: String,
        #[arg(long, value_name = "PREFIX")]
        v6_prefix: String,
    },
    /// Print the EUI-64 interface identifier for a MAC address
    Eui64 {
        mac: String,
        /// Print the fe80:: link-local address instead
        #[arg(long)]
        link_local: bool,
    },
    /// Print an IPv6 address in fully expanded form
    Expand { address: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Zone text goes to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = GeneratorConfig::from_env()?;
    if cli.serial.is_some() {
        config.serial = cli.serial;
    }
    if let Some(output) = cli.output {
        config.output = Some(output);
    }
    config.validate()?;

    let serial = config.serial.as_deref();

    match cli.command {
        Commands::Forward { zone } => {
            let zone = load_zone(&zone)?;
            emit(config.output.as_deref(), |out| {
                let written = ZoneFileWriter::new(&zone).write_forward_zone(out, serial)?;
                info!("Wrote {} records for zone {}", written, zone.zone_name);
                Ok(())
            })
        }
        Commands::Reverse4 { zone, prefix } => {
            let zone = load_zone(&zone)?;
            emit(config.output.as_deref(), |out| {
                let written =
                    ZoneFileWriter::new(&zone).write_reverse_zone_v4(out, &prefix, serial)?;
                info!("Wrote {} PTR records for prefix {}", written, prefix);
                Ok(())
            })
        }
        Commands::Reverse6 { zone, prefix } => {
            let zone = load_zone(&zone)?;
            emit(config.output.as_deref(), |out| {
                let written =
                    ZoneFileWriter::new(&zone).write_reverse_zone_v6(out, &prefix, serial)?;
                info!("Wrote {} PTR records for prefix {}", written, prefix);
                Ok(())
            })
        }
        Commands::All {
            zone,
            v4_prefix,
            v6_prefix,
        } => {
            let zone = load_zone(&zone)?;
            emit(config.output.as_deref(), |out| {
                let writer = ZoneFileWriter::new(&zone);
                writer.write_forward_zone(out, serial)?;
                writeln!(out, "{}", ZONE_SEPARATOR)?;
                writer.write_reverse_zone_v4(out, &v4_prefix, serial)?;
                writeln!(out, "{}", ZONE_SEPARATOR)?;
                writer.write_reverse_zone_v6(out, &v6_prefix, serial)?;
                info!("Wrote all zone files for {}", zone.zone_name);
                Ok(())
            })
        }
        Commands::Eui64 { mac, link_local } => {
            let value = if link_local {
                link_local_from_mac(&mac)?
            } else {
                mac_to_eui64(&mac)?
            };
            emit(config.output.as_deref(), |out| {
                writeln!(out, "{}", value)?;
                Ok(())
            })
        }
        Commands::Expand { address } => {
            let value = expand_ipv6(&address)?;
            emit(config.output.as_deref(), |out| {
                writeln!(out, "{}", value)?;
                Ok(())
            })
        }
    }
}

/// Run `write` against stdout, or against a temp file that replaces `output` on success
fn emit<F>(output: Option<&Path>, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let Some(path) = output else {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write(&mut out)?;
        out.flush()?;
        return Ok(());
    };

    let temp_path = temp_path_for(path);
    let result = write_and_rename(&temp_path, path, write);

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        info!("Wrote {}", path.display());
    }
    result
}

fn write_and_rename<F>(temp_path: &Path, path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let mut out = BufWriter::new(File::create(temp_path)?);
    write(&mut out)?;
    out.flush()?;
    drop(out);

    fs::rename(temp_path, path)?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "zone".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}
