pub mod answers;
pub mod catalog;
pub mod config;
pub mod deliver;
pub mod error;
pub mod export;
pub mod io;
pub mod paths;
pub mod query;
pub mod recommend;
pub mod target;
pub mod types;
pub mod wizard;

pub use error::{NavigatorError, Result};
