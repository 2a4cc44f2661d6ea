//! `TaskSense`: keyword-driven task classification and tracking.
//!
//! This crate accepts task records, classifies them into a category and
//! priority using deterministic keyword and pattern matching, persists them
//! through a pluggable task store, and exposes CRUD and statistics operations
//! over HTTP.
//!
//! # Architecture
//!
//! `TaskSense` follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`classification`]: Keyword scoring and entity extraction
//! - [`task`]: Task lifecycle, persistence ports, and adapters
//! - [`http`]: REST boundary built on axum
//! - [`config`]: Layered application configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod classification;
pub mod config;
pub mod http;
pub mod task;
pub mod telemetry;
