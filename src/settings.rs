use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use config::{Config, Environment, File};
use num_complex::Complex64;
use serde::{Deserialize, Deserializer};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::output::Format;
use crate::params::Interface;
use crate::sweep::{Quantity, DEFAULT_NUM_ANGLES};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let settings = load_default_config().unwrap();
        assert_eq!(settings.n_inc, 1.0);
        assert_eq!(settings.n_sub, Complex64::new(1.5, 0.0));
        assert_eq!(settings.num_angles, 100);
        assert_eq!(settings.trials, 1000);
        assert_eq!(settings.quantity, Quantity::ReflectedIrradiance);
        assert_eq!(settings.format, Format::Columns);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn cli_overrides_config() {
        let mut settings = load_default_config().unwrap();
        let args = CliArgs::parse_from([
            "fresnel",
            "--n-inc",
            "1.72",
            "--n-sub",
            "0.29006+2.8628i",
            "--theta",
            "0.5",
            "bench",
            "--trials",
            "20",
            "--seed",
            "9",
        ]);
        apply_overrides(&mut settings, &args);
        assert_eq!(settings.n_inc, 1.72);
        assert_eq!(settings.n_sub, Complex64::new(0.29006, 2.8628));
        assert_eq!(settings.theta, 0.5);
        assert_eq!(settings.trials, 20);
        assert_eq!(settings.seed, Some(9));
        assert!(validate_config(&settings).is_ok());
    }

    #[test]
    fn sweep_overrides() {
        let mut settings = load_default_config().unwrap();
        let args = CliArgs::parse_from([
            "fresnel",
            "sweep",
            "--quantity",
            "transmitted-diattenuation",
            "--num-angles",
            "25",
            "--format",
            "json",
        ]);
        apply_overrides(&mut settings, &args);
        assert_eq!(settings.quantity, Quantity::TransmittedDiattenuation);
        assert_eq!(settings.num_angles, 25);
        assert_eq!(settings.format, Format::Json);
    }

    #[test]
    fn rejects_bad_values() {
        let mut settings = load_default_config().unwrap();
        settings.num_angles = 1;
        assert!(validate_config(&settings).is_err());

        let mut settings = load_default_config().unwrap();
        settings.theta = 2.0;
        assert!(validate_config(&settings).is_err());

        let mut settings = load_default_config().unwrap();
        settings.n_inc = -1.0;
        assert!(validate_config(&settings).is_err());
    }

    #[test]
    fn substrate_index_from_environment() {
        env::set_var("FRESNEL_N_SUB", "2.007+3.781i");
        let settings = load_config(&CliArgs::parse_from(["fresnel", "eval"]));
        env::remove_var("FRESNEL_N_SUB");
        let settings = settings.unwrap();
        assert_eq!(settings.n_sub, Complex64::new(2.007, 3.781));
    }

    #[test]
    fn substrate_index_forms() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "deserialize_index")]
            n_sub: Complex64,
        }
        let parse = |json: &str| serde_json::from_str::<Wrapper>(json).map(|w| w.n_sub);

        assert_eq!(parse(r#"{"n_sub": [1.5, 0.2]}"#).unwrap(), Complex64::new(1.5, 0.2));
        assert_eq!(parse(r#"{"n_sub": 1.33}"#).unwrap(), Complex64::new(1.33, 0.0));
        assert_eq!(parse(r#"{"n_sub": "2+3i"}"#).unwrap(), Complex64::new(2.0, 3.0));
        assert_eq!(parse(r#"{"n_sub": "1.5"}"#).unwrap(), Complex64::new(1.5, 0.0));
        assert!(parse(r#"{"n_sub": "glass"}"#).is_err());
    }
}

/// Runtime configuration for the application.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub n_inc: f64,
    #[serde(deserialize_with = "deserialize_index")]
    pub n_sub: Complex64,
    pub theta: f64,
    pub quantity: Quantity,
    #[serde(default = "default_num_angles")]
    pub num_angles: usize,
    pub trials: usize,
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    pub seed: Option<u64>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    pub directory: PathBuf,
    pub format: Format,
}

/// Forms accepted for the substrate index: `[re, im]` in a config file, or a
/// plain number or complex string such as `2.007+3.781i` from the environment.
#[derive(Deserialize)]
#[serde(untagged)]
enum IndexRepr {
    Pair(f64, f64),
    Real(f64),
    Text(String),
}

fn deserialize_index<'de, D>(deserializer: D) -> Result<Complex64, D::Error>
where
    D: Deserializer<'de>,
{
    match IndexRepr::deserialize(deserializer)? {
        IndexRepr::Pair(re, im) => Ok(Complex64::new(re, im)),
        IndexRepr::Real(re) => Ok(Complex64::new(re, 0.0)),
        IndexRepr::Text(text) => Complex64::from_str(text.trim()).map_err(|err| {
            serde::de::Error::custom(format!("invalid refractive index {:?}: {}", text, err))
        }),
    }
}

fn default_num_angles() -> usize {
    DEFAULT_NUM_ANGLES
}

fn default_rounds() -> usize {
    1
}

fn default_parallel() -> bool {
    true
}

impl Settings {
    pub fn interface(&self) -> Interface {
        Interface::new(self.n_inc, self.n_sub)
    }
}

/// Loads `config/default.toml` only, with no environment or CLI layers.
pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("Error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the layered configuration: config file, then `FRESNEL_*` environment
/// variables, then command-line overrides from `args`.
pub fn load_config(args: &CliArgs) -> Result<Settings> {
    let root = retrieve_project_root()?;

    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    // Check if local config exists, if not use default
    let config_file = if local_config.exists() {
        log::info!("Using local configuration: {:?}", local_config);
        local_config
    } else {
        log::info!("Using default configuration: {:?}", default_config_file);
        default_config_file
    };

    let settings = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(Environment::with_prefix("fresnel"))
        .build()
        .context("Error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    apply_overrides(&mut config, args);

    validate_config(&config)?;

    log::debug!("{:#?}", config);

    Ok(config)
}

/// Copies every value given on the command line into `config`.
pub fn apply_overrides(config: &mut Settings, args: &CliArgs) {
    if let Some(n_inc) = args.interface.n_inc {
        config.n_inc = n_inc;
    }
    if let Some(n_sub) = args.interface.n_sub {
        config.n_sub = n_sub;
    }
    if let Some(theta) = args.interface.theta {
        config.theta = theta;
    }

    match &args.command {
        Command::Eval | Command::Test { .. } => {}
        Command::Sweep {
            quantity,
            num_angles,
            format,
            directory,
        } => {
            if let Some(quantity) = quantity {
                config.quantity = *quantity;
            }
            if let Some(num_angles) = num_angles {
                config.num_angles = *num_angles;
            }
            if let Some(format) = format {
                config.format = *format;
            }
            if let Some(directory) = directory {
                config.directory = directory.clone();
            }
        }
        Command::Bench {
            trials,
            rounds,
            seed,
            sequential,
        } => {
            if let Some(trials) = trials {
                config.trials = *trials;
            }
            if let Some(rounds) = rounds {
                config.rounds = *rounds;
            }
            if seed.is_some() {
                config.seed = *seed;
            }
            if *sequential {
                config.parallel = false;
            }
        }
    }
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the FRESNEL_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // When running through cargo (e.g. cargo run, cargo test)
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("FRESNEL_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    // Walk upward from the executable looking for a "config" subdirectory
    let exe_path = env::current_exe().context("Failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| anyhow!("Could not find project root directory"))
}

fn validate_config(config: &Settings) -> Result<()> {
    config.interface().check(config.theta)?;
    if config.num_angles < 2 {
        return Err(anyhow!("Number of sweep angles must be at least 2"));
    }
    if config.trials == 0 || config.rounds == 0 {
        return Err(anyhow!("Number of trials and rounds must be greater than 0"));
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "Fresnel reflection, transmission and polarization calculator")]
pub struct CliArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub interface: InterfaceArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct InterfaceArgs {
    /// Real refractive index of the incident medium.
    #[arg(long, global = true)]
    pub n_inc: Option<f64>,

    /// Refractive index of the substrate, e.g. `1.5` or `2.007+3.781i`.
    #[arg(long, global = true)]
    pub n_sub: Option<Complex64>,

    /// Incidence angle in radians, in [0, pi/2).
    #[arg(short, long, global = true)]
    pub theta: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print amplitudes, irradiances and polarization metrics at one angle.
    Eval,
    /// Sample one quantity over [0, pi/2] and write it to the output directory.
    Sweep {
        /// Quantity to sample, e.g. `reflected-retardance`.
        #[arg(short, long)]
        quantity: Option<Quantity>,

        /// Number of sample angles.
        #[arg(short, long)]
        num_angles: Option<usize>,

        /// Output file format.
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Output directory.
        #[arg(short, long)]
        directory: Option<PathBuf>,
    },
    /// Run the self-validation battery.
    Test {
        /// Exit with a non-zero status if any scenario fails.
        #[arg(long)]
        strict: bool,
    },
    /// Time batch transmittance evaluation over random inputs.
    Bench {
        /// Number of random triples per round.
        #[arg(short = 'n', long)]
        trials: Option<usize>,

        /// Number of timed rounds.
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Random seed for reproducible inputs.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Evaluate on the calling thread only.
        #[arg(long)]
        sequential: bool,
    },
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Incident Refractive Index: {:.6}
  - Substrate Refractive Index: {:.6} + {:.6}i
  - Incidence Angle: {:.6} rad
  - Sweep: {} over {} angles
  - Timing: {} rounds of {} trials
  ",
            self.n_inc,
            self.n_sub.re,
            self.n_sub.im,
            self.theta,
            self.quantity,
            self.num_angles,
            self.rounds,
            self.trials,
        )
    }
}
