//! CLI command implementations

pub mod utils;

pub mod bom;
pub mod completions;
pub mod inventory;
pub mod run;
pub mod template;
