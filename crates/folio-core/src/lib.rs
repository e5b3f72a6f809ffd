pub mod actions;
pub mod category;
pub mod config;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod pagination;
pub mod persistence;
pub mod reducer;
pub mod state;
pub mod store;

pub use actions::*;
pub use category::*;
pub use controller::*;
pub use error::*;
pub use navigation::*;
pub use pagination::*;
pub use reducer::*;
pub use state::*;
pub use store::*;

pub use persistence::*;
