//! Response bodies for the non-GraphQL endpoints.

pub mod health;
