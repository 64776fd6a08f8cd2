//! mfgsim: manufacturing simulator
//!
//! Builds products from basic components against a shared stock pool, one
//! unit at a time, and reports what was made and why attempts failed.

pub mod cli;
pub mod core;
pub mod entities;
