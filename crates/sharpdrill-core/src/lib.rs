//! Adaptive sampling, scoring and record keeping for sharpdrill.
//!
//! This crate holds the vocabulary material model, the per-item record store,
//! the weighted sampler that favours poorly known items, the question engine
//! and the drill orchestrator. All terminal interaction goes through the
//! [`console::Console`] trait.

pub mod casual;
pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod grading;
pub mod mock;
pub mod model;
pub mod question;
pub mod records;
pub mod registry;
pub mod sampler;
pub mod session;
