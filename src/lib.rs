//! podarchive: a self-hosted podcast archive.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
