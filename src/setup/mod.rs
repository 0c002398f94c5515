pub mod seed_data;

pub use seed_data::{default_seed, load_seed_file, parse_seed, SeedData, SetupError, DEFAULT_SEED};
