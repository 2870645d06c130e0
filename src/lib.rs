//! fleetdash - a terminal dashboard for fleet IoT devices
//!
//! Polls a device inventory/twin backend, classifies raw telemetry into
//! display categories and renders device lists, cards and detail views.
//! An optional HTTP proxy exposes the same reads with fixed error bodies.

pub mod adapters;
pub mod app;
pub mod classify;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod models;
pub mod proxy;
pub mod sync;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod view_mode;
pub mod view_model;
