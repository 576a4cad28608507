//! # Sales Assist Resets Library
//!
//! This library provides the core functionality for the dealership resets
//! service: the due-date evaluator, the reset executor and sweep, and the
//! HTTP API around them.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod reset;
pub mod server;
pub mod telemetry;
pub use migration;
