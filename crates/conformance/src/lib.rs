//! Conformance harness for the repository wiki REST API.
//!
//! Logs in as a fixture user, issues an API token, drives the wiki endpoints
//! and compares decoded responses against the literal fixture values. The
//! same scenarios run against a live instance (the `wiki-conformance`
//! binary) or an in-process service (this crate's integration tests).

pub mod client;
pub mod config;
pub mod environment;
pub mod expected;
pub mod runner;
pub mod scenarios;
