use anyhow::Context;
use chrono::{Duration, FixedOffset, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use hemera::hours::{planetary_hours, SolarSunTimes};
use hemera::pruner::spawn_pruner;
use hemera::{
    handle_position_query, sign_ruler, CachePolicy, Dignity, DignityTable, EphemerisProvider,
    GeoLocation, PlanetId, PositionService, SwissEphemerisAdapter, SystemClock, ZodiacSign,
};
use hemera_config::{DignitySettings, HemeraSettings};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file. Defaults to $HEMERA_CONFIG, then configs/hemera.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the seven planet positions as JSON.
    Positions {
        /// Instant to compute (RFC 3339, YYYY-MM-DD or epoch milliseconds). Defaults to now.
        #[arg(long)]
        at: Option<String>,

        /// Keep printing current positions every N seconds until Ctrl-C.
        #[arg(long, conflicts_with = "at")]
        watch: Option<u64>,
    },
    /// Print the 24 planetary hours of a day as JSON.
    Hours {
        /// Local civil date (YYYY-MM-DD). Defaults to today at the given offset.
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        utc_offset_minutes: Option<i32>,
    },
    /// Print each planet's sign, sign ruler and essential dignities.
    Dignities {
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DignityReport {
    planet: PlanetId,
    sign: ZodiacSign,
    degree_in_sign: f64,
    sign_ruler: PlanetId,
    dignities: Vec<Dignity>,
}

fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<HemeraSettings> {
    match path {
        Some(p) => hemera_config::load_settings_from(p),
        None => hemera_config::load_settings(),
    }
}

fn build_service(settings: &HemeraSettings) -> anyhow::Result<PositionService<SwissEphemerisAdapter>> {
    let adapter = SwissEphemerisAdapter::new(settings.ephemeris_path.clone())
        .context("Failed to initialise Swiss Ephemeris")?;
    let policy = CachePolicy {
        now_ttl: Duration::seconds(settings.cache.now_ttl_secs as i64),
        fixed_ttl: Duration::seconds(settings.cache.fixed_ttl_secs as i64),
    };
    Ok(PositionService::new(adapter, Arc::new(SystemClock)).with_policy(policy))
}

fn parse_sign(field: &str, value: &str) -> anyhow::Result<Option<ZodiacSign>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    value
        .parse::<ZodiacSign>()
        .map(Some)
        .map_err(|e| anyhow::anyhow!("dignities.{field}: {e}"))
}

fn dignity_table(settings: &DignitySettings) -> anyhow::Result<DignityTable> {
    let exaltation = parse_sign("mercury_exaltation", &settings.mercury_exaltation)?;
    let fall = parse_sign("mercury_fall", &settings.mercury_fall)?;
    Ok(DignityTable::default().with_mercury_exaltation(exaltation, fall))
}

fn print_positions<P: EphemerisProvider>(
    service: &PositionService<P>,
    raw: Option<&str>,
) -> anyhow::Result<()> {
    let response = handle_position_query(service, raw)?;
    println!("Cache-Control: {}", response.cache_control());
    println!("{}", response.to_json()?);
    Ok(())
}

async fn watch_positions<P: EphemerisProvider>(
    service: &PositionService<P>,
    every_secs: u64,
    prune_secs: u64,
) -> anyhow::Result<()> {
    let pruner = spawn_pruner(
        service.cache().clone(),
        std::time::Duration::from_secs(prune_secs),
    );
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(every_secs.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => print_positions(service, None)?,
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    pruner.abort();
    log::info!("Stopped watching");
    Ok(())
}

/// Fixed offset east of UTC; must be strictly within one day.
fn utc_offset(minutes: i32) -> anyhow::Result<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .with_context(|| format!("Invalid UTC offset: {minutes} minutes"))
}

fn print_hours(
    settings: &HemeraSettings,
    date: Option<NaiveDate>,
    lat: Option<f64>,
    lon: Option<f64>,
    utc_offset_minutes: Option<i32>,
) -> anyhow::Result<()> {
    let location = GeoLocation::new(
        lat.unwrap_or(settings.location.lat),
        lon.unwrap_or(settings.location.lon),
    )?;
    let minutes = utc_offset_minutes.unwrap_or(settings.location.utc_offset_minutes);
    let offset = utc_offset(minutes)?;
    let now = Utc::now();
    let date = date.unwrap_or_else(|| now.with_timezone(&offset).date_naive());

    let hours = planetary_hours(&SolarSunTimes::default(), date, location, offset, now)?;
    println!("{}", serde_json::to_string_pretty(&hours)?);
    Ok(())
}

fn print_dignities(settings: &HemeraSettings, at: Option<&str>) -> anyhow::Result<()> {
    let table = dignity_table(&settings.dignities)?;
    let service = build_service(settings)?;
    let response = handle_position_query(&service, at)?;

    let report: Vec<DignityReport> = response
        .snapshot
        .positions
        .iter()
        .map(|p| DignityReport {
            planet: p.planet,
            sign: p.sign,
            degree_in_sign: p.degree_in_sign,
            sign_ruler: sign_ruler(p.sign),
            dignities: table.dignities(p.planet, p.sign),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = load_settings(args.config.as_ref())?;
    log::debug!("Settings: {:?}", settings);

    match args.command {
        Command::Positions { at, watch } => {
            let service = build_service(&settings)?;
            match watch {
                Some(every) => {
                    watch_positions(&service, every, settings.cache.prune_interval_secs).await?
                }
                None => print_positions(&service, at.as_deref())?,
            }
        }
        Command::Hours {
            date,
            lat,
            lon,
            utc_offset_minutes,
        } => print_hours(&settings, date, lat, lon, utc_offset_minutes)?,
        Command::Dignities { at } => print_dignities(&settings, at.as_deref())?,
    }
    Ok(())
}
