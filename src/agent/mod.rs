mod config;
pub use config::*;

mod executor;
pub use executor::*;

mod input;
pub use input::*;

pub mod prompt;
