//! Application identity from Cargo.toml.

/// Application name (from Cargo.toml `package.name`).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Vendor / organization, used in ProjectDirs.
pub const VENDOR: &str = "polymorphl";
