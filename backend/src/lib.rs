//! Account authentication service: bcrypt credentials, RS256 session tokens
//! and the registration, login and profile flows behind an HTTP adapter.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
