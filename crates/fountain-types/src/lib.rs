//! Fountain Types - Domain types for temporary-wallet deposit monitoring
//!
//! This crate holds the types shared by the monitor, the SDK adapter and the
//! CLI, with zero dependencies on other fountain crates:
//!
//! - Identity types ([`OperationId`])
//! - Deposit status snapshots ([`WalletStatus`], [`DepositStatus`], [`DepositRecord`])
//! - The error type shared by every status provider ([`FountainError`])
//!
//! # Lifecycle
//!
//! ```text
//! PENDING → PARTIAL → COMPLETE
//!     └────────┴────→ EXPIRED
//! ```
//!
//! COMPLETE and EXPIRED are terminal: no further progress is expected once an
//! operation reports either of them.

pub mod identity;
pub mod status;
pub mod error;

pub use identity::*;
pub use status::*;
pub use error::*;

/// Version of the Fountain types schema
pub const TYPES_VERSION: &str = "0.1.0";
