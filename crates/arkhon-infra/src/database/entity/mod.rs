//! SeaORM entities mirroring the schema created by the `migration` app.

pub mod permission;
pub mod user;
