pub mod config;
pub mod error;
pub mod types;

pub use config::StanceConfig;
pub use error::{Result, StanceError};
pub use types::{Location, Message, Nation, UnitType};
