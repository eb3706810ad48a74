//! Bridge discovery.

pub mod service;

pub use service::DiscoveryService;
