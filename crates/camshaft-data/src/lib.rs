pub mod loader;
pub mod schema;

pub use loader::{ConfigError, SimSetup, load_setup, resolve_setup};
