//! # Arkhon Core
//!
//! The domain layer of the Arkhon account service.
//! This crate contains entities, input validation, ports and use-cases with
//! zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod usecase;

pub use error::{DomainError, RepoError, ValidationError};
