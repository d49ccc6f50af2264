//! # Payment gateway client
//!
//! This library builds checksum-signed requests for a third-party payment processor and reconciles them against an
//! order's gateway transaction history. The centrepiece is the void (cancellation) pipeline:
//!
//! 1. The [`ledger`] module loads and validates the order's stored transaction history, normalizing the loosely-typed
//!    blob into [`TransactionRecord`]s, and selects the single transaction a void applies to — an exact invoice match
//!    when the caller names one, the most recent voidable charge otherwise.
//! 2. The [`void`] module derives the amount, auth code and rollback tag from the order and the selected target (or
//!    accepts a complete parameter set from the auto-void callback path), assembles the payload, and merges in the
//!    shared signed fields from [`base_request`].
//! 3. The [`checksum`] module signs the payload over a fixed, ordered field subset; the processor recomputes the same
//!    digest server-side and rejects mismatches.
//! 4. [`GatewayApi`] dispatches the signed payload and parses the processor's reply.
//!
//! Building and signing are pure, synchronous computations; only dispatch touches the network. The client never
//! mutates order state or the ledger, and it performs no retries — a failed void surfaces immediately as an error and
//! retry policy stays with the caller.

pub mod api;
pub mod base_request;
pub mod checksum;
pub mod config;
pub mod data_objects;
pub mod error;
pub mod ledger;
mod merge;
pub mod notify;
pub mod void;

pub use api::GatewayApi;
pub use config::GatewayConfig;
pub use data_objects::{
    GatewayResponse,
    OrderView,
    PrevOrderStatus,
    TransactionRecord,
    TransactionStatus,
    TransactionType,
    VoidCandidate,
};
pub use error::{GatewayApiError, VoidError};
pub use ledger::TransactionLedger;
pub use merge::merge_params;
pub use void::{VoidRequestBuilder, VoidRequestParams};
