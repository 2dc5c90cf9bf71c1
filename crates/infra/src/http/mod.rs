//! HTTP transport used by the ADT connection

pub mod client;

pub use client::{HttpClient, HttpClientBuilder, RetryPolicy};
