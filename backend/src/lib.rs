//! Yatube API library: a token-authenticated blog over actix-web.
//!
//! - [`domain`]: entities, the authorization policy, ports and services
//! - [`inbound`]: HTTP handlers translating requests into port calls
//! - [`outbound`]: the in-memory and PostgreSQL stores
//! - [`server`]: app and server construction
//! - [`startup`]: settings and seed-file loading used by the binary

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod startup;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
