//! Property-based tests for model and access types.
