pub mod postgres_service;

pub use postgres_service::{connect_options, DatabaseService};
