//! Unit tests for action dispatch.
