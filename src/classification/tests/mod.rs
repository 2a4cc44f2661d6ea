//! Unit tests for keyword classification and entity extraction.
