//! Property-based tests for list accumulation and debouncing

mod debounce;
