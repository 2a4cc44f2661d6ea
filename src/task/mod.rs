//! Task lifecycle management for `TaskSense`.
//!
//! This module owns the task record, its classification-aware lifecycle
//! rules, and the persistence contract used to store tasks and their change
//! history. Creating a task always classifies it; updating the title or
//! description re-classifies it unless the caller asks for a manual
//! override. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
