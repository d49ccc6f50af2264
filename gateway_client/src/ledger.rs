//! # Transaction ledger
//!
//! Every gateway call that succeeds against an order leaves a record in the order's stored transaction history. That
//! history is the sole source of truth for deciding *which* transaction a void applies to, so it gets validated and
//! normalized here, at the boundary, rather than at each point of use. Inconsistent casing in status/type strings and
//! missing optional fields are absorbed during loading; downstream code only ever sees typed records.
//!
//! The ledger is append-only and arrives oldest-first. This module never reorders or deduplicates it.

use log::{debug, error};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    data_objects::{TransactionRecord, VoidCandidate},
    error::VoidError,
};

/// The raw shape of one entry in the stored history. Status and type are free-form strings at this level; they are
/// normalized to enums when the entry is promoted to a [`TransactionRecord`].
#[derive(Debug, Clone, Deserialize)]
struct RawTransaction {
    #[serde(default)]
    transaction_id: Option<String>,
    #[serde(default)]
    transaction_type: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    auth_code: Option<String>,
    #[serde(default)]
    invoice_id: Option<String>,
    #[serde(default)]
    is_subscription: bool,
}

/// An order's accumulated gateway transaction history, oldest entry first.
#[derive(Debug, Clone)]
pub struct TransactionLedger {
    records: Vec<TransactionRecord>,
}

impl TransactionLedger {
    /// Loads and validates the stored transaction history. Fails with [`VoidError::MissingLedger`] when the blob is
    /// not a non-empty array, or when any entry lacks a gateway transaction id.
    pub fn from_json(history: &Value) -> Result<Self, VoidError> {
        let entries = history.as_array().ok_or_else(|| {
            let e = VoidError::MissingLedger("stored transaction history is not a list".to_string());
            error!("{e}. Got: {history}");
            e
        })?;
        if entries.is_empty() {
            let e = VoidError::MissingLedger("stored transaction history is empty".to_string());
            error!("{e}");
            return Err(e);
        }
        let records = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let raw: RawTransaction = serde_json::from_value(entry.clone()).map_err(|e| {
                    let e = VoidError::MissingLedger(format!("entry {i} is not a transaction record. {e}"));
                    error!("{e}");
                    e
                })?;
                let transaction_id = raw.transaction_id.filter(|id| !id.is_empty()).ok_or_else(|| {
                    let e = VoidError::MissingLedger(format!("entry {i} has no gateway transaction id"));
                    error!("{e}");
                    e
                })?;
                Ok(TransactionRecord {
                    transaction_id,
                    transaction_type: raw.transaction_type.as_deref().unwrap_or_default().into(),
                    status: raw.status.as_deref().unwrap_or_default().into(),
                    auth_code: raw.auth_code.filter(|c| !c.is_empty()),
                    invoice_id: raw.invoice_id.filter(|id| !id.is_empty()),
                    is_subscription: raw.is_subscription,
                })
            })
            .collect::<Result<Vec<TransactionRecord>, VoidError>>()?;
        Ok(Self { records })
    }

    /// Builds a ledger from already-typed records. Used by callers that keep their history in typed form.
    pub fn from_records(records: Vec<TransactionRecord>) -> Result<Self, VoidError> {
        if records.is_empty() {
            let e = VoidError::MissingLedger("transaction history is empty".to_string());
            error!("{e}");
            return Err(e);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&TransactionRecord> {
        self.records.last()
    }

    /// Selects the single transaction a void applies to.
    ///
    /// The ledger is scanned newest-first. A record is voidable iff it was approved, its type is one of
    /// auth/settle/sale, and it is not a subscription charge. When the caller supplies an invoice id, the newest
    /// voidable record carrying that invoice id wins immediately; a settle raised against a specific invoice must be
    /// voided precisely. Without an invoice match the most recent voidable record overall is used; absent that
    /// context, the latest eligible charge is the safest default.
    pub fn select_void_target(&self, invoice_id: Option<&str>) -> Result<VoidCandidate, VoidError> {
        let wanted_invoice = invoice_id.filter(|id| !id.is_empty());
        let mut last_voidable = None;
        for tx in self.records.iter().rev() {
            if !tx.is_voidable() {
                continue;
            }
            if last_voidable.is_none() {
                last_voidable = Some(tx);
            }
            if let (Some(want), Some(have)) = (wanted_invoice, tx.invoice_id.as_deref()) {
                if want == have {
                    debug!("Transaction to void: {} (matched invoice {want})", tx.transaction_id);
                    return Ok(VoidCandidate { record: tx.clone(), matched_invoice: true });
                }
            }
        }
        match last_voidable {
            Some(tx) => {
                debug!("Transaction to void: {} (most recent voidable)", tx.transaction_id);
                Ok(VoidCandidate { record: tx.clone(), matched_invoice: false })
            },
            None => {
                let e = VoidError::NoVoidableTransaction;
                error!("{e}. {} transactions were scanned.", self.records.len());
                Err(e)
            },
        }
    }
}
