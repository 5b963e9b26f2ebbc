use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "HEMERA_CONFIG";

const SEARCH_PATHS: [&str; 2] = ["configs/hemera.toml", "../../configs/hemera.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct HemeraSettings {
    /// Swiss Ephemeris data directory; `None` selects the built-in Moshier theory.
    pub ephemeris_path: Option<PathBuf>,
    pub cache: CacheSettings,
    pub location: LocationSettings,
    pub dignities: DignitySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub now_ttl_secs: u64,
    pub fixed_ttl_secs: u64,
    pub prune_interval_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            now_ttl_secs: 30,
            fixed_ttl_secs: 7 * 24 * 60 * 60,
            prune_interval_secs: 60,
        }
    }
}

/// Observer used for planetary hours when none is given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    pub lat: f64,
    pub lon: f64,
    pub utc_offset_minutes: i32,
}

impl Default for LocationSettings {
    fn default() -> Self {
        // Greenwich
        Self {
            lat: 51.4769,
            lon: 0.0,
            utc_offset_minutes: 0,
        }
    }
}

/// Mercury's exaltation and fall signs, by name. An empty string removes
/// the dignity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DignitySettings {
    pub mercury_exaltation: String,
    pub mercury_fall: String,
}

impl Default for DignitySettings {
    fn default() -> Self {
        Self {
            mercury_exaltation: "Virgo".to_string(),
            mercury_fall: "Pisces".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    cache: CacheSettings,
    #[serde(default)]
    location: LocationSettings,
    #[serde(default)]
    dignities: DignitySettings,
}

impl Default for HemeraSettings {
    fn default() -> Self {
        RootConfigToml::default().into()
    }
}

impl From<RootConfigToml> for HemeraSettings {
    fn from(root: RootConfigToml) -> Self {
        Self {
            ephemeris_path: root.ephemeris.path,
            cache: root.cache,
            location: root.location,
            dignities: root.dignities,
        }
    }
}

fn validate(settings: &HemeraSettings) -> anyhow::Result<()> {
    let c = &settings.cache;
    if c.now_ttl_secs == 0 || c.fixed_ttl_secs == 0 {
        anyhow::bail!(
            "cache TTLs must be positive (now_ttl_secs={}, fixed_ttl_secs={})",
            c.now_ttl_secs,
            c.fixed_ttl_secs
        );
    }
    if c.prune_interval_secs == 0 {
        anyhow::bail!("cache.prune_interval_secs must be positive");
    }
    let l = &settings.location;
    if !(-90.0..=90.0).contains(&l.lat) || !(-180.0..=180.0).contains(&l.lon) {
        anyhow::bail!("location out of range: lat={}, lon={}", l.lat, l.lon);
    }
    if l.utc_offset_minutes.abs() >= 24 * 60 {
        anyhow::bail!("location.utc_offset_minutes out of range: {}", l.utc_offset_minutes);
    }
    Ok(())
}

pub fn parse_settings(text: &str) -> anyhow::Result<HemeraSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse hemera.toml: {e}"))?;
    let settings = HemeraSettings::from(root);
    validate(&settings)?;
    Ok(settings)
}

/// Load settings from an explicit file. The file must exist.
pub fn load_settings_from(path: &Path) -> anyhow::Result<HemeraSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_settings(&text)
}

/// Load settings from `$HEMERA_CONFIG`, else the first of
/// `configs/hemera.toml` and `../../configs/hemera.toml` that exists.
/// No file at all means defaults.
pub fn load_settings() -> anyhow::Result<HemeraSettings> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return load_settings_from(Path::new(&path));
    }
    for p in &SEARCH_PATHS {
        let path = Path::new(p);
        if path.exists() {
            return load_settings_from(path);
        }
    }
    Ok(HemeraSettings::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, HemeraSettings::default());
        assert_eq!(settings.cache.now_ttl_secs, 30);
        assert_eq!(settings.cache.fixed_ttl_secs, 604_800);
        assert_eq!(settings.dignities.mercury_exaltation, "Virgo");
        assert!(settings.ephemeris_path.is_none());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let settings = parse_settings(
            r#"
            [cache]
            now_ttl_secs = 10

            [dignities]
            mercury_exaltation = "Aquarius"
            mercury_fall = "Leo"
            "#,
        )
        .unwrap();
        assert_eq!(settings.cache.now_ttl_secs, 10);
        assert_eq!(settings.cache.fixed_ttl_secs, 604_800);
        assert_eq!(settings.dignities.mercury_fall, "Leo");
        assert_eq!(settings.location, LocationSettings::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse_settings("[cache]\nnow_ttl_secs = 0").is_err());
        assert!(parse_settings("[location]\nlat = 95.0").is_err());
        assert!(parse_settings("[location]\nutc_offset_minutes = 1440").is_err());
        assert!(parse_settings("[cache\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let ephe = dir.path().join("ephe");
        let path = dir.path().join("hemera.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(
            f,
            "[ephemeris]\npath = {:?}\n\n[location]\nlat = 40.7128\nlon = -74.006\nutc_offset_minutes = -300",
            ephe.display().to_string()
        )
        .unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.ephemeris_path, Some(ephe));
        assert_eq!(settings.location.utc_offset_minutes, -300);
        assert!((settings.location.lon + 74.006).abs() < 1e-9);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings_from(&dir.path().join("absent.toml")).is_err());
    }
}
