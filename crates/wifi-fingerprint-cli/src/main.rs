//! Command-line tool for WiFi location fingerprinting.
//!
//! Scans nearby networks at user-labeled locations, stores one fingerprint
//! per location, and compares fingerprints across locations.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use wifi_fingerprint_core::{
    analyzer, ComparisonResult, FingerprintRecord, SignalReading, PREDEFINED_LOCATIONS,
};
use wifi_fingerprint_scan::{ScanEvent, ScanPort, ScanService};
use wifi_fingerprint_store::{JsonFileStore, RecordStore};

#[derive(Parser, Debug)]
#[command(
    name = "wifi-fingerprint",
    about = "Capture and compare WiFi signal fingerprints per location"
)]
struct Cli {
    /// Path to the record store file
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Wireless interface to scan on
    #[arg(long, default_value = "wlan0")]
    interface: String,

    /// Read cached scan results instead of triggering a new scan
    #[arg(long)]
    cached: bool,

    /// Scan timeout in seconds
    #[arg(long, default_value = "15")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan for nearby networks and print the readings
    Scan,
    /// Scan, then build and store a fingerprint for a location
    Capture {
        /// Location label (one of the predefined labels unless --force)
        #[arg(long)]
        location: String,
        /// Allow labels outside the predefined set
        #[arg(long)]
        force: bool,
    },
    /// Print stored fingerprint records
    Show,
    /// Compare stored fingerprints across locations
    Compare,
    /// Delete every stored record
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store = JsonFileStore::new(store_path(cli.store.clone())?);

    match &cli.command {
        Command::Scan => {
            let readings = run_scan(&cli).await?;
            print_readings(&readings);
        }
        Command::Capture { location, force } => {
            if !*force && !PREDEFINED_LOCATIONS.contains(&location.as_str()) {
                bail!(
                    "'{location}' is not a predefined location ({}); pass --force to use it",
                    PREDEFINED_LOCATIONS.join(", ")
                );
            }
            let record = run_capture(&cli, location).await?;
            store.save(&record).context("failed to persist the record")?;
            println!(
                "Captured '{}' from {} networks.",
                record.location,
                record.scan_results.len()
            );
        }
        Command::Show => {
            let records = load_records(&store)?;
            if records.is_empty() {
                println!("No fingerprints stored yet.");
            }
            for record in &records {
                print_record(record);
            }
        }
        Command::Compare => {
            let records = load_records(&store)?;
            if records.len() < 2 {
                println!(
                    "Need at least 2 stored fingerprints to compare ({} stored).",
                    records.len()
                );
                return Ok(());
            }
            print_comparison(&analyzer::compare(&records), records.len());
        }
        Command::Clear { yes } => {
            if !*yes && !confirm("Delete all stored fingerprints?")? {
                println!("Aborted.");
                return Ok(());
            }
            store.clear_all().context("failed to clear the store")?;
            println!("All location data has been cleared.");
        }
    }
    Ok(())
}

/// Resolve the store file path: explicit flag, else the platform data dir.
fn store_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let base = dirs::data_dir().context("no platform data directory; pass --store")?;
    Ok(base.join("wifi-fingerprint").join("locations.json"))
}

#[cfg(target_os = "linux")]
fn make_scanner(cli: &Cli) -> Arc<dyn ScanPort> {
    use wifi_fingerprint_scan::IwScanner;

    let mut scanner = IwScanner::with_interface(&cli.interface);
    if cli.cached {
        scanner = scanner.use_cached();
    }
    Arc::new(scanner)
}

#[cfg(not(target_os = "linux"))]
fn make_scanner(_cli: &Cli) -> Arc<dyn ScanPort> {
    use wifi_fingerprint_scan::{MockScanner, ScanError};

    Arc::new(MockScanner::failing(ScanError::Unsupported(
        "no scan adapter for this platform".to_owned(),
    )))
}

fn make_service(cli: &Cli) -> ScanService {
    ScanService::with_timeout(make_scanner(cli), Duration::from_secs(cli.timeout_secs))
}

/// One scan round-trip: request, then wait for the completion event.
async fn run_scan(cli: &Cli) -> Result<Vec<SignalReading>> {
    let service = make_service(cli);
    let mut events = service.subscribe();
    if !service.request_scan() {
        bail!("a scan is already in progress");
    }
    loop {
        match events.recv().await? {
            ScanEvent::ReadingsUpdated { count } => {
                debug!(networks = count, "scan finished");
                return Ok(service.latest_readings());
            }
            ScanEvent::ScanFailed { reason } => bail!("scan failed: {reason}"),
            ScanEvent::RecordCaptured(_) => {}
        }
    }
}

/// Scan with a queued capture: wait for the captured record.
async fn run_capture(cli: &Cli, location: &str) -> Result<FingerprintRecord> {
    let service = make_service(cli);
    let mut events = service.subscribe();
    service.queue_capture(location);
    if !service.request_scan() {
        bail!("a scan is already in progress");
    }
    loop {
        match events.recv().await? {
            ScanEvent::RecordCaptured(record) => return Ok(record),
            ScanEvent::ScanFailed { reason } => bail!("scan failed: {reason}"),
            ScanEvent::ReadingsUpdated { .. } => {}
        }
    }
}

fn load_records(store: &JsonFileStore) -> Result<Vec<FingerprintRecord>> {
    // Every stored record, including labels captured with --force.
    let map = store
        .load_stored()
        .context("failed to load stored fingerprints")?;
    Ok(map.into_values().collect())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn print_readings(readings: &[SignalReading]) {
    println!("{} networks found:", readings.len());
    for reading in readings {
        println!(
            "  {} ({})  {} dBm  {} MHz",
            reading.ssid, reading.bssid, reading.level_dbm, reading.frequency_mhz
        );
    }
}

fn print_record(record: &FingerprintRecord) {
    println!(
        "{} - captured at epoch {} ms from {} networks",
        record.location,
        record.timestamp_ms,
        record.scan_results.len()
    );
    println!("{}", format_matrix(record.signal_matrix.as_slice()));
}

fn print_comparison(result: &ComparisonResult, record_count: usize) {
    println!("Cross-Location Statistics");
    println!("  Average difference between locations: {} dBm", result.average_difference);
    println!("  Max difference between locations: {} dBm", result.max_difference);

    println!("Access Point Differences Across Locations:");
    if result.access_points.is_empty() {
        println!("  (no raw readings stored)");
        return;
    }
    for stat in &result.access_points {
        println!("  {} ({})", stat.ssid, stat.bssid);
        let locations: Vec<&str> = stat.locations().collect();
        if locations.len() < record_count {
            println!("    Present in: {}", locations.join(", "));
        }
        if locations.len() >= 2 {
            println!("    Signal strength difference: {} dBm", stat.signal_difference);
            for (location, level) in &stat.levels_by_location {
                println!("      {location}: {level} dBm");
            }
        } else if let Some(level) = stat.levels_by_location.values().next() {
            println!("    Signal strength: {level} dBm");
        }
    }
}

/// Formats a signal matrix for display, ten values per line.
fn format_matrix(matrix: &[i32]) -> String {
    if matrix.is_empty() {
        return "No signal data available".to_owned();
    }
    let mut out = String::new();
    for (index, value) in matrix.iter().enumerate() {
        out.push_str(&format!("{value} dBm"));
        if index < matrix.len() - 1 {
            out.push_str(", ");
        }
        if (index + 1) % 10 == 0 {
            out.push('\n');
        }
    }
    out
}
