//! # Exercise Tracker Shared Library
//!
//! This crate contains the data model and record stores used by the
//! exercise tracker API server.
//!
//! ## Module Organization
//!
//! - `models`: Users, exercises and log views
//! - `calendar`: Calendar date parsing and rendering
//! - `coerce`: Lenient integer coercion for request values
//! - `store`: The `RecordStore` trait with in-memory and PostgreSQL backends
//! - `db`: Connection pooling and migrations for the PostgreSQL backend

pub mod calendar;
pub mod coerce;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the exercise tracker shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
