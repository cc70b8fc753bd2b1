pub mod cli;
pub mod config;
pub mod dataset;
pub mod fallback;
pub mod impacts;
pub mod regions;
pub mod server;
pub mod sources;
pub mod wildlife;
