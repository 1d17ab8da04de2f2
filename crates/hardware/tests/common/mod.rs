//! Shared helpers for hierarchy tests.


pub use harness::*;
