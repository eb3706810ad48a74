//! Protocol layer for the Hue REST API.
//!
//! This module builds request bodies and parses bridge responses.

pub mod requests;
pub mod response;
