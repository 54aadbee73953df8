#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod config;
pub mod engine;
pub mod entities;
pub mod envelope;
pub mod events;
pub mod mapping;
pub mod processors;
pub mod publisher;
pub mod utils;

pub use engine::RelayEngine;
