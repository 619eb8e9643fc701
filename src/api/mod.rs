//! HTTP interface to the survey core

pub mod models;
pub mod handlers;
pub mod routes;

pub use routes::create_router;
