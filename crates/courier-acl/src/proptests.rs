//! Property-based tests for the access policy engine.
