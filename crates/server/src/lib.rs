//! geo-nearby server
//!
//! HTTP front end for a [`geo_nearby::NearbyService`].
//!
//! # Endpoints
//!
//! - `GET /nearby?lat=<lat>&lon=<lon>` - ids of points within 10km, nearest
//!   first, as `{"hotelIds": [...]}`; `400` with a plain-text message on
//!   malformed coordinates
//!
//! # Example
//!
//! ```ignore
//! use geo_nearby_server::run_server;
//!
//! run_server(listener, service, shutdown).await?;
//! ```

pub mod dataset;
pub mod handler;
pub mod transport;

pub use transport::http::{router, run_server};
