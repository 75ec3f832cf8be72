//! Request handlers.
//!
//! Handlers delegate to the repositories in `showroom_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod products;
