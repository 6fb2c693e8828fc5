//! HTTP client for the Aegis One security platform API.
//!
//! [`ApiClient`] resolves a base URL from a service region (or an explicit
//! host override for pre-production environments), attaches bearer
//! authentication to every request, and exposes one thin method per remote
//! endpoint, grouped by product domain.

mod client;
mod error;
mod query;

pub mod alerts;
pub mod cloudposture;
pub mod container;
pub mod credits;
pub mod email;
pub mod endpoint;
pub mod exposure;
pub mod iam;

pub use client::{ApiClient, ClientOptions, FILTER_HEADER, RequestOption, VALID_REGIONS};
pub use error::{Error, Result};
pub use query::QueryParameters;
