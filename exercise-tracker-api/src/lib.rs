//! # Exercise Tracker API Server Library
//!
//! This library provides the core functionality for the exercise tracker
//! API server.
//!
//! ## Modules
//!
//! - `app`: Application state, store wiring and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: JSON-or-form request body extractor
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
