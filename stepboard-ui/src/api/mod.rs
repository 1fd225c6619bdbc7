//! Endpoint access for the browser client

mod client;

pub use client::FetchEndpoint;

/// Gateway to the deployed challenge endpoint
pub fn endpoint() -> FetchEndpoint {
    FetchEndpoint::default()
}
