//! Core module - inventory, production engine, and supporting infrastructure

pub mod config;
pub mod coordinator;
pub mod inventory;
pub mod loader;
pub mod outcome;
pub mod report;

pub use config::{Config, ConfigError};
pub use coordinator::{manufacture, ProductionRun};
pub use inventory::{Inventory, InventoryLine};
pub use loader::{DataLoader, LoadError};
pub use outcome::{Outcome, OutcomeSource, RandomOutcomes, ScriptedOutcomes};
pub use report::{FailureCounts, ProductSummary, ProductionReport};
