//! Unit tests for the task domain, in-memory adapter, and lifecycle service.
