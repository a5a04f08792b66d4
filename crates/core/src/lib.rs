//! Domain layer for the roomkit content service.
//!
//! Holds the version-chain model and its manager, input validation, and the
//! shared error type. Nothing in here touches the database or HTTP directly;
//! persistence is reached through [`version_chain::VersionStore`].

pub mod error;
pub mod main_content;
pub mod types;
pub mod version_chain;
