//! LazyQR Library
//!
//! This library provides the core of the LazyQR application: color model
//! conversions, the QR configuration form, styled QR rendering and the
//! terminal designer built on top of them.

// Module declarations
pub mod branding;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod render;
pub mod services;
pub mod tui;
