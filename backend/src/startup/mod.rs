//! Startup wiring: settings and the optional seed file.

mod seeding;
mod settings;

pub use seeding::{StartupSeedingError, load_seed_file};
pub use settings::AppSettings;
