//! snapup - snapcraft part pin auditor library
//!
//! This library provides the core functionality for auditing the tags and
//! branches pinned by snapcraft parts:
//! - Manifest loading (snapcraft.yaml)
//! - Version parsing and comparison of tag/branch names
//! - Freshness classification of pins
//! - GitHub and GitLab tag/branch retrieval

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod freshness;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod version;
