//! The five read-only queries served by the API.

pub mod error;
pub mod routes;
pub mod service;

pub use error::QueryError;
pub use routes::{list_routes, API_PREFIX};
pub use service::{PrecipitationByDate, QueryService};
