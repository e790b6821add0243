// Prospect Dashboard - Core Library
// Exposes all modules for use in the server binary and tests

pub mod components;
pub mod config;
pub mod entities;
pub mod error;
pub mod loader;
pub mod pages;
pub mod quality;
pub mod schema;
pub mod server;
pub mod views;

// Re-export commonly used types
pub use entities::{
    normalize_id, Building, BuildingSource, Channel, ChannelConfig, Company, ExclusionConfig,
    ExclusionRule, NaicsFitScore, ResearchScore, ScoredCompany,
};
pub use error::{LoadError, LoadResult};
pub use loader::{Availability, DataLoader, StartupReport, TableData, TableName, TableStatus};
pub use quality::{GateIssue, GateOutcome, Severity};
pub use views::{build_ranked, find_ranked, RankedCompany};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
