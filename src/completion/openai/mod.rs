mod request;
mod stream;

mod client;
pub use client::*;
