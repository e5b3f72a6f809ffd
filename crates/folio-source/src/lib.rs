pub mod adapters;
pub mod file;
pub mod http;

pub use adapters::*;
pub use file::*;
pub use http::*;
