//! Test doubles for the trait seams.
//!
//! These live in the library (not behind `cfg(test)`) so integration
//! tests and benchmarks can drive the sync components without a network.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
