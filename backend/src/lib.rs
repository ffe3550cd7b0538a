//! HR console backend library.
//!
//! Domain records, in-memory stores and the HTTP adapter for an HR
//! management console. The `hr-console` binary wires these together.

pub mod doc;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
