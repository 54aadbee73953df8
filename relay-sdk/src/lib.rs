//! Shared types for Entity Relay.
//!
//! The payload, envelope and header types describe what lands on the broker;
//! the change notification types describe what the HTTP intake accepts. The
//! routing configuration is shared between the config loader and the engine.

pub mod config;
pub mod objects;
