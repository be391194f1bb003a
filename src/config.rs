use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {

    #[error("Could not read or write configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error)

}

/// Settings shared by the lab scripts. Every field is optional in the JSON
/// representation, falling back to the defaults below:
///
/// ```json
/// { "seed" : 42, "out_dir" : "figures", "width" : 800, "height" : 600, "grid_points" : 100 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {

    /// Seed of the random number generator. Runs are not reproducible when absent.
    pub seed : Option<u64>,

    /// Directory where figures are written.
    pub out_dir : PathBuf,

    pub width : u32,

    pub height : u32,

    /// Resolution of tabulation grids (points per axis).
    pub grid_points : usize

}

impl Default for LabConfig {

    fn default() -> Self {
        Self { seed : None, out_dir : PathBuf::from("."), width : 800, height : 600, grid_points : 100 }
    }

}

impl LabConfig {

    pub fn load_from_path<P>(path : P) -> Result<Self, ConfigError>
    where
        P : AsRef<Path>
    {
        let f = File::open(path)?;
        Self::load(f)
    }

    pub fn load<R>(mut reader : R) -> Result<Self, ConfigError>
    where
        R : Read
    {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(serde_json::from_str(&content[..])?)
    }

    pub fn save_to_path<P>(&self, path : P) -> Result<(), ConfigError>
    where
        P : AsRef<Path>
    {
        let mut file = OpenOptions::new().write(true).create(true).truncate(true).open(path)?;
        let content = serde_json::to_string_pretty(self)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Random number generator seeded from the configuration, or from
    /// system entropy when no seed is informed.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        }
    }

    /// Path of a figure inside the output directory.
    pub fn figure_path(&self, name : &str) -> PathBuf {
        self.out_dir.join(name)
    }

}
