//! Transport layer for the geo-nearby server
//!
//! Available transports:
//! - `http` - HTTP/JSON API served with axum

pub mod http;
