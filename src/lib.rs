pub mod config;
pub mod driver;
pub mod error;
pub mod fields;
pub mod integrate;
pub mod util;

pub use error::{Error, Result};
