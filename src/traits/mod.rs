//! Trait seams for dependency injection.
//!
//! The backend client and both sync components talk to the network only
//! through [`HttpClient`], so tests can swap in the scripted mock from
//! [`crate::adapters::mock`].

pub mod http;

pub use http::{Headers, HttpClient, HttpError, Response};
