//! Mock Snipe-IT API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Snipe-IT
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server filters and paginates real fixture
//! data, so whole reports can be exercised against it.
//!
//! # Example
//!
//! ```ignore
//! use snipe_report::mock_server::MockServer;
//! use snipe_report::{Cohort, Inventory, SnipeClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = SnipeClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let inventory = Inventory::from_transport(client);
//!     let staff = inventory.laptops(Cohort::Staff).await.unwrap();
//!     assert_eq!(staff.len(), 3);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{Fixtures, StatusLabel};
pub use server::MockServer;
pub use state::{page_body, MockState, DEFAULT_PAGE_SIZE};
