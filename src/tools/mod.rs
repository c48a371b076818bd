mod context;
pub use context::*;

mod error;
pub use error::*;

pub mod fields;
pub use fields::*;

mod output;
pub use output::*;

mod registry;
pub use registry::*;

mod selection;
pub use selection::*;

mod tool;
pub use tool::*;
