use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::sweep::Curve;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Interface;
    use crate::sweep::{sweep, Quantity};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fresnel-output-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_columns() {
        let dir = scratch_dir("columns");
        let curve = sweep(&Interface::new(1.0, 1.5), Quantity::ReflectedIrradiance, 3);
        let path = write_curve(&curve, Format::Columns, &dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "reflected-irradiance.dat");

        let text = fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(rows.len(), 3);
        let first: Vec<f64> = rows[0]
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(first.len(), 2);
        assert!((first[1] - 0.04).abs() < 1e-9);
        assert!(text.starts_with("# reflected-irradiance"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn writes_json() {
        let dir = scratch_dir("json");
        let curve = sweep(&Interface::new(1.0, 1.5), Quantity::TransmittedRetardance, 4);
        let path = write_curve(&curve, Format::Json, &dir).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["quantity"], "transmitted-retardance");
        assert_eq!(value["angles"].as_array().unwrap().len(), 4);
        let _ = fs::remove_dir_all(&dir);
    }
}

/// File format for written curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Two whitespace-separated columns, angle and value, with a `#` header.
    Columns,
    /// The whole curve as a JSON object.
    Json,
}

impl Format {
    fn extension(&self) -> &'static str {
        match self {
            Format::Columns => "dat",
            Format::Json => "json",
        }
    }
}

/// Writes `curve` to `<directory>/<quantity>.<ext>` and returns the path.
pub fn write_curve(curve: &Curve, format: Format, directory: &Path) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("failed to create output directory {:?}", directory))?;
    let path = directory.join(format!("{}.{}", curve.quantity, format.extension()));
    let file = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    match format {
        Format::Columns => write_columns(curve, &mut writer)?,
        Format::Json => serde_json::to_writer_pretty(&mut writer, curve)?,
    }
    writer.flush()?;

    log::info!("wrote {} ({} angles) to {:?}", curve.quantity, curve.angles.len(), path);
    Ok(path)
}

fn write_columns(curve: &Curve, writer: &mut impl Write) -> Result<()> {
    writeln!(writer, "# {}", curve.quantity)?;
    writeln!(writer, "# {}", curve.interface)?;
    writeln!(writer, "# generated {}", chrono::Local::now().to_rfc3339())?;
    writeln!(writer, "# theta_inc [rad]  value")?;
    for (theta, value) in curve.angles.iter().zip(curve.values.iter()) {
        writeln!(writer, "{} {}", theta, value)?;
    }
    Ok(())
}
