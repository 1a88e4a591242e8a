pub mod brief;
pub mod config;

pub use brief::*;
pub use config::{Config, ProviderConfig};
