pub mod answers;
pub mod config;
pub mod export;
pub mod questions;
pub mod recommend;
pub mod wizard;
