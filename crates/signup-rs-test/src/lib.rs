//! # signup-rs-test
//!
//! Testing utilities for signup-rs.
//!
//! - [`client`] - [`TestClient`] drives a router in-process
//! - [`transport`] - [`RouterTransport`] connects a `FormController` to a router
//! - [`live_server`] - [`LiveServer`] serves on a random port for real HTTP clients
//! - [`sink`] - [`RecordingSink`] captures accepted submissions

pub mod client;
pub mod live_server;
pub mod sink;
pub mod transport;

pub use client::{TestClient, TestResponse};
pub use live_server::LiveServer;
pub use sink::RecordingSink;
pub use transport::RouterTransport;
