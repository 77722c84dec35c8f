//! Fountain Monitor - Deposit polling for temporary wallets
//!
//! A mint operation on Fountain hands out a temporary wallet that the company
//! funds. [`DepositMonitor`] polls that wallet's status through a
//! [`StatusProvider`] until the deposit completes, the operation expires, or
//! the attempt budget runs out.
//!
//! # Quick Start
//!
//! ```ignore
//! use fountain_monitor::{DepositMonitor, MonitorConfig};
//! use fountain_sdk::FountainClient;
//! use tokio_util::sync::CancellationToken;
//!
//! let client = FountainClient::connect("http://localhost:3000")?.with_token(jwt);
//! let monitor = DepositMonitor::new(client);
//! let result = monitor
//!     .poll(&operation_id, &MonitorConfig::default(), &CancellationToken::new())
//!     .await?;
//!
//! if result.succeeded {
//!     println!("Deposit complete after {} checks", result.attempts_used);
//! }
//! ```
//!
//! # Semantics
//!
//! - At most `max_attempts` queries are made.
//! - COMPLETE and EXPIRED stop the loop immediately, without a further wait.
//! - A provider failure is returned at once; only "not yet complete" is retried.
//! - Exhausting the budget is not an error: `succeeded` is false and
//!   `final_status` carries the last observation.

pub mod config;
pub mod error;
pub mod monitor;
pub mod observer;
pub mod provider;

pub use config::MonitorConfig;
pub use error::{MonitorError, MonitorResult};
pub use monitor::{DepositMonitor, PollOutcome, PollResult};
pub use observer::{NoopObserver, PollObserver};
pub use provider::StatusProvider;

pub use fountain_types::{DepositStatus, OperationId, WalletStatus};
pub use tokio_util::sync::CancellationToken;
