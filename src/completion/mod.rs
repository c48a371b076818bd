#[allow(clippy::module_inception)]
mod completion;
pub use completion::*;

mod error;
pub use error::*;

mod options;
pub use options::*;

mod response;
pub use response::*;

pub mod openai;
pub use openai::*;
