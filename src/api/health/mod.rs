/*
* Health API endpoints and routes module.
* Liveness plus database connectivity checks.
*/

pub mod handler;
pub mod routes;

pub use routes::health_routes;
