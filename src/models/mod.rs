//! Configuration models for the HTTP application.

pub mod config;
