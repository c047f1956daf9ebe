//! Client configuration and session state
//!
//! A single TOML file (`~/.config/rosti/rosti.toml` on Linux) holds the API
//! endpoint, the token and the company remembered from an earlier session.
//! Commands load it once at the start and save it explicitly; nothing else
//! keeps selection state around.

pub mod parser;
pub mod schema;
pub mod store;

pub use parser::{parse_rosti_toml, parse_rosti_toml_str, to_toml};
pub use schema::{DEFAULT_API_URL, RostiConfig};
pub use store::ConfigStore;
