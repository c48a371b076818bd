pub mod agent;
pub mod completion;
pub mod schemas;
pub mod tools;

pub(crate) mod utils;
