//! CLI argument definitions for EcoGrid.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `weather` | Fetch current weather for a coordinate |
//! | `energy` | Fetch energy pricing for a region |
//! | `carbon` | Fetch carbon-credit pricing for a market |
//! | `certify` | Verify a renewable energy certificate |
//! | `snapshot` | Fetch the composite market snapshot |
//! | `refresh` | Refresh all cached market domains |
//! | `cache` | Manage the aggregation cache |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! # Weather at the reference location
//! ecogrid weather
//!
//! # Renewable pricing for Europe
//! ecogrid energy --region europe --pretty
//!
//! # Verify a certificate
//! ecogrid certify --id REC-2024-001 --issuer I-REC
//! ```

use clap::{Args, Parser, Subcommand};

/// 🌱 EcoGrid - Renewable-energy market data CLI
///
/// Aggregates weather, energy pricing, carbon credits, and renewable
/// certifications behind one cached, degradation-tolerant interface.
#[derive(Debug, Parser)]
#[command(
    name = "ecogrid",
    author,
    version,
    about = "Renewable-energy market data CLI"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 🌤 Fetch current weather conditions.
    ///
    /// # Examples
    ///
    ///   ecogrid weather
    ///   ecogrid weather --lat 52.52 --lon 13.405
    Weather(WeatherArgs),

    /// ⚡ Fetch energy pricing for a region.
    ///
    /// # Examples
    ///
    ///   ecogrid energy --region europe
    ///   ecogrid energy --region north_america --energy-type conventional
    Energy(EnergyArgs),

    /// 🌍 Fetch carbon-credit pricing for a market.
    ///
    /// # Examples
    ///
    ///   ecogrid carbon
    ///   ecogrid carbon --market compliance
    Carbon(CarbonArgs),

    /// ✅ Verify a renewable energy certificate.
    ///
    /// # Examples
    ///
    ///   ecogrid certify --id REC-2024-001 --issuer I-REC
    Certify(CertifyArgs),

    /// 📊 Fetch the composite market snapshot with blended indicators.
    ///
    /// # Examples
    ///
    ///   ecogrid snapshot --region south_america --pretty
    Snapshot(SnapshotArgs),

    /// 🔄 Fetch all refreshable domains live and repopulate the cache.
    ///
    /// Exit code 3 signals a partial refresh: at least one source failed.
    Refresh(RefreshArgs),

    /// 📦 Cache management commands.
    Cache(CacheArgs),
}

/// Arguments for the `weather` command.
#[derive(Debug, Args)]
pub struct WeatherArgs {
    /// Latitude in decimal degrees. Defaults to the reference location.
    #[arg(long)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees. Defaults to the reference location.
    #[arg(long)]
    pub lon: Option<f64>,
}

/// Arguments for the `energy` command.
#[derive(Debug, Args)]
pub struct EnergyArgs {
    /// Grid region (europe, north_america, south_america, asia_pacific,
    /// oceania).
    #[arg(long, default_value = "south_america")]
    pub region: String,

    /// Market segment (renewable, conventional, mixed).
    #[arg(long, default_value = "renewable")]
    pub energy_type: String,
}

/// Arguments for the `carbon` command.
#[derive(Debug, Args)]
pub struct CarbonArgs {
    /// Credit market (voluntary, compliance, offset).
    #[arg(long, default_value = "voluntary")]
    pub market: String,
}

/// Arguments for the `certify` command.
#[derive(Debug, Args)]
pub struct CertifyArgs {
    /// Certificate identifier (5 to 50 characters).
    #[arg(long)]
    pub id: String,

    /// Issuing registry (e.g., I-REC, GO, REGO).
    #[arg(long)]
    pub issuer: String,
}

/// Arguments for the `snapshot` command.
#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Grid region the snapshot covers.
    #[arg(long, default_value = "south_america")]
    pub region: String,
}

/// Arguments for the `refresh` command.
#[derive(Debug, Args)]
pub struct RefreshArgs {
    /// Grid region the refresh covers.
    #[arg(long, default_value = "south_america")]
    pub region: String,

    /// Market segment the refresh covers.
    #[arg(long, default_value = "renewable")]
    pub energy_type: String,

    /// Credit market the refresh covers.
    #[arg(long, default_value = "voluntary")]
    pub market: String,
}

/// Arguments for the `cache` command.
#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

/// Cache management subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Drop every cache entry.
    Clear,
    /// Show cache entry counts.
    Stats,
}
