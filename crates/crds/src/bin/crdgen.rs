//! CRD Generator
//!
//! Builds the scheme with every Virtono kind registered and writes the
//! CustomResourceDefinition manifests, either to stdout as a multi-document
//! YAML stream or, when `CRD_OUTPUT_DIR` is set, one file per CRD.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generator configuration, read from the environment
#[derive(Debug)]
struct Config {
    /// Directory to write `<crd-name>.yaml` files to; stdout when unset
    output_dir: Option<PathBuf>,
}

impl Config {
    fn from_env() -> Self {
        Self {
            output_dir: env::var_os("CRD_OUTPUT_DIR").map(PathBuf::from),
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean YAML stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    info!(
        "Output: {}",
        config
            .output_dir
            .as_deref()
            .map_or_else(|| "stdout".to_string(), |d| d.display().to_string())
    );

    let scheme = virtono_crds::build_scheme().context("failed to register resource kinds")?;

    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    for crd in scheme.crds() {
        let name = crd.metadata.name.as_deref().unwrap_or_default();
        let yaml = serde_yaml::to_string(crd).with_context(|| format!("failed to render {name}"))?;

        match &config.output_dir {
            Some(dir) => {
                let path = dir.join(format!("{name}.yaml"));
                fs::write(&path, yaml)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("Wrote {}", path.display());
            }
            None => print!("---\n{yaml}"),
        }
    }

    info!("Generated {} CRD(s)", scheme.len());
    Ok(())
}
