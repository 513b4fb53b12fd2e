pub mod router;
pub mod routes;

/// Versioned base path every person route is nested under.
pub const API_PREFIX: &str = "/api/v1";
