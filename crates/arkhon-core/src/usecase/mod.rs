//! Use-cases - orchestration of ports for each account operation.

mod permission;
mod user;

#[cfg(test)]
mod fakes;

pub use permission::PermissionUseCase;
pub use user::{Session, UserUseCase};
