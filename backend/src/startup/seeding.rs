//! Reading the seed file at startup.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::SeedData;

/// Errors returned while reading the seed file.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Seed file could not be read.
    #[error("failed to read seed file at {path}: {source}")]
    Read {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Seed file is not a valid seed document.
    #[error("failed to parse seed file at {path}: {source}")]
    Parse {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse the seed file at `path`.
///
/// Only the file's parent directory is opened, through `cap-std`.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use yatube_api::startup::load_seed_file;
///
/// # fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let seed = load_seed_file(Path::new("fixtures/seed.json"))?;
/// println!("{} users to seed", seed.users.len());
/// # Ok(())
/// # }
/// ```
pub fn load_seed_file(path: &Path) -> Result<SeedData, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    let seed = SeedData::from_json(&contents).map_err(|source| StartupSeedingError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        users = seed.users.len(),
        groups = seed.groups.len(),
        "seed file loaded"
    );
    Ok(seed)
}
