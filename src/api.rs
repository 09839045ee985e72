pub mod auth;
pub mod cache;
pub mod graphql;
pub mod queries;
