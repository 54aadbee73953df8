//! Configuration types shared by the engine and the config loader.

mod routing;

pub use routing::RoutingEntry;
