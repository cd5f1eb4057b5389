pub mod config;
pub mod consts;
pub mod cycleway;
pub mod error;
pub mod export;
pub mod features;
pub mod scorer;
pub mod summary;
// cmd and reports are binary modules (declared in main.rs).
