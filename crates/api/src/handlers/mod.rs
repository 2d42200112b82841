//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource group.
//! Handlers delegate to the repositories in `annotext_db` and the domain
//! helpers in `annotext_core`, mapping errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod annotation;
pub mod auth;
pub mod dashboard;
pub mod export;
pub mod project;
pub mod user;
