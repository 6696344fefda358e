use anyhow::{ensure, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::hpge::HpgeOptions;
use crate::materials::{make_enriched_germanium, natural_germanium};

/// Runtime configuration for the command line tool.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Path to the detector metadata file.
    pub metadata: Option<String>,
    /// Overrides the detector name from the metadata.
    pub name: Option<String>,
    /// Builds the crystal from germanium with this enrichment.
    pub enrichment: Option<f64>,
    /// Builds the crystal from natural germanium.
    #[serde(default)]
    pub natural: bool,
    #[serde(default)]
    pub start_phi_deg: f64,
    #[serde(default = "default_delta_phi")]
    pub delta_phi_deg: f64,
    #[serde(default)]
    pub validate_profile: bool,
    #[serde(default)]
    pub json: bool,
}

fn default_delta_phi() -> f64 {
    360.0
}

impl Settings {
    /// Construction options for these settings. Natural germanium wins over
    /// an enrichment if both are set.
    pub fn hpge_options(&self) -> HpgeOptions {
        let material = if self.natural {
            Some(natural_germanium())
        } else {
            self.enrichment.map(make_enriched_germanium)
        };

        HpgeOptions {
            name: self.name.clone(),
            material,
            start_phi: self.start_phi_deg.to_radians(),
            delta_phi: self.delta_phi_deg.to_radians(),
            validate_profile: self.validate_profile,
        }
    }
}

pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let config: Settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("Error loading configuration")?
        .try_deserialize()
        .context("Error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the default configuration, a `config/local.toml` if present, `HPGES_*`
/// environment variables and finally the command line arguments, each
/// overriding the previous.
pub fn load_config() -> Result<Settings> {
    load_config_with(CliArgs::parse())
}

pub fn load_config_with(args: CliArgs) -> Result<Settings> {
    let root = retrieve_project_root()?;

    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    let settings: Config = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .add_source(File::from(local_config).required(false))
        .add_source(Environment::with_prefix("hpges"))
        .build()
        .context("Error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    if let Some(metadata) = args.metadata {
        config.metadata = Some(metadata);
    }
    if let Some(name) = args.name {
        config.name = Some(name);
    }
    if let Some(enrichment) = args.enrichment {
        config.enrichment = Some(enrichment);
    }
    if args.natural {
        config.natural = true;
    }
    if let Some(phi) = args.start_phi {
        config.start_phi_deg = phi;
    }
    if let Some(phi) = args.delta_phi {
        config.delta_phi_deg = phi;
    }
    if args.validate {
        config.validate_profile = true;
    }
    if args.json {
        config.json = true;
    }

    validate_config(&config)?;

    Ok(config)
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the HPGES_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any
///    of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("HPGES_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("Failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(|dir| dir.to_path_buf())
        .context("Could not find project root directory")
}

fn validate_config(config: &Settings) -> Result<()> {
    ensure!(
        config.delta_phi_deg > 0.0 && config.delta_phi_deg <= 360.0,
        "Sweep angle must be in (0, 360] degrees, got {}",
        config.delta_phi_deg
    );
    if let Some(enrichment) = config.enrichment {
        ensure!(
            (0.0..=1.0).contains(&enrichment),
            "Enrichment must be between 0 and 1, got {}",
            enrichment
        );
    }
    Ok(())
}

#[derive(Parser, Debug, Default)]
#[command(version, about = "Build HPGe detector geometry from metadata")]
pub struct CliArgs {
    /// Path to the detector metadata JSON file.
    #[arg(short, long)]
    pub metadata: Option<String>,

    /// Name of the detector solid and logical volume. Defaults to the name in the metadata.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Use germanium enriched to this Ge-76 fraction instead of the metadata enrichment.
    #[arg(short, long)]
    pub enrichment: Option<f64>,

    /// Use natural germanium as crystal material.
    #[arg(long, conflicts_with = "enrichment")]
    pub natural: bool,

    /// Start angle of the polycone sweep in degrees.
    #[arg(long)]
    pub start_phi: Option<f64>,

    /// Angular extent of the polycone sweep in degrees.
    #[arg(long)]
    pub delta_phi: Option<f64>,

    /// Fail on self-intersecting profiles instead of warning.
    #[arg(long)]
    pub validate: bool,

    /// Print the registry as JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Metadata: {:?}
  - Name: {:?}
  - Enrichment: {:?}
  - Natural: {}
  - Sweep: {:.1} + {:.1} deg
  - Validate Profile: {}
  ",
            self.metadata,
            self.name,
            self.enrichment,
            self.natural,
            self.start_phi_deg,
            self.delta_phi_deg,
            self.validate_profile,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let settings = load_default_config().unwrap();
        assert_eq!(settings.delta_phi_deg, 360.0);
        assert!(!settings.validate_profile);
        assert!(settings.metadata.is_none());
    }

    #[test]
    fn arguments_override_defaults() {
        let args = CliArgs::parse_from([
            "hpges",
            "--metadata",
            "V99000A.json",
            "--natural",
            "--delta-phi",
            "180",
            "--validate",
        ]);
        let settings = load_config_with(args).unwrap();
        assert_eq!(settings.metadata.as_deref(), Some("V99000A.json"));
        assert!(settings.natural);
        assert!(settings.validate_profile);

        let options = settings.hpge_options();
        assert_eq!(options.material.unwrap().name, "NaturalGermanium");
        approx::assert_relative_eq!(options.delta_phi, std::f64::consts::PI);
    }

    #[test]
    fn enrichment_out_of_range() {
        let args = CliArgs {
            enrichment: Some(1.5),
            ..Default::default()
        };
        assert!(load_config_with(args).is_err());
    }

    #[test]
    fn zero_sweep_is_rejected() {
        let args = CliArgs {
            delta_phi: Some(0.0),
            ..Default::default()
        };
        assert!(load_config_with(args).is_err());
    }
}
