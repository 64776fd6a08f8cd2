//! Entity type definitions
//!
//! **Bill of materials:**
//! - [`BasicComponent`] - Raw materials, paints, and hardware held in stock
//! - [`Product`] - Composite built from components and other products
//! - [`Component`] - Either of the above, as stored in the inventory
//!
//! **Production:**
//! - [`ManufacturingProcess`] - State machine for a single unit attempt

pub mod component;
pub mod process;
pub mod product;

pub use component::{BasicComponent, Component};
pub use process::{FailureType, ManufacturingProcess, ManufacturingState};
pub use product::{Product, Requirement};
