use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

//--------------------------------------     OrderView       ----------------------------------------------------------
/// Read-only snapshot of the storefront order a request is being built against. The client never mutates order state;
/// callers pull these fields from their commerce platform and hand them over.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderView {
    /// The human-facing order number, used as `clientUniqueId` and `merchantUniqueId` on the wire.
    pub increment_id: String,
    /// ISO-4217 code of the order's base currency.
    pub base_currency_code: String,
    /// The order grand total in the base currency. Arrives as a float from the storefront and is snapped to two
    /// decimals by the request builder.
    pub base_grand_total: f64,
    pub store_id: u32,
}

//--------------------------------------  TransactionType    ----------------------------------------------------------
/// The gateway-side type of a historical transaction. The stored history spells these with inconsistent casing, so
/// parsing is case-insensitive and happens once, when the ledger is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionType {
    Auth,
    Settle,
    Sale,
    Void,
    Credit,
    Other(String),
}

impl From<&str> for TransactionType {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "auth" => Self::Auth,
            "settle" => Self::Settle,
            "sale" => Self::Sale,
            "void" => Self::Void,
            "credit" => Self::Credit,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Auth => write!(f, "Auth"),
            TransactionType::Settle => write!(f, "Settle"),
            TransactionType::Sale => write!(f, "Sale"),
            TransactionType::Void => write!(f, "Void"),
            TransactionType::Credit => write!(f, "Credit"),
            TransactionType::Other(s) => write!(f, "{s}"),
        }
    }
}

impl TransactionType {
    /// Only an authorization hold, a capture, or a single-step charge can be cancelled at the gateway.
    pub fn is_voidable_type(&self) -> bool {
        matches!(self, TransactionType::Auth | TransactionType::Settle | TransactionType::Sale)
    }
}

//-------------------------------------- TransactionStatus   ----------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Approved,
    Declined,
    Pending,
    Error,
    Other(String),
}

impl From<&str> for TransactionStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "declined" => Self::Declined,
            "pending" => Self::Pending,
            "error" => Self::Error,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Approved => write!(f, "Approved"),
            TransactionStatus::Declined => write!(f, "Declined"),
            TransactionStatus::Pending => write!(f, "Pending"),
            TransactionStatus::Error => write!(f, "Error"),
            TransactionStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

//-------------------------------------- TransactionRecord   ----------------------------------------------------------
/// One historical gateway transaction attached to an order. Records are immutable once written; the response-handling
/// path appends them and this client only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// The gateway-assigned transaction id. Always present; ledger loading rejects entries without one.
    pub transaction_id: String,
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub auth_code: Option<String>,
    /// Present only on settle-type transactions that were raised against a specific invoice.
    pub invoice_id: Option<String>,
    pub is_subscription: bool,
}

impl TransactionRecord {
    /// A record is eligible for a void iff it was approved, its type admits cancellation, and it is not part of a
    /// recurring payment plan.
    pub fn is_voidable(&self) -> bool {
        self.status == TransactionStatus::Approved && self.transaction_type.is_voidable_type() && !self.is_subscription
    }
}

//--------------------------------------   PrevOrderStatus   ----------------------------------------------------------
/// The order-payment state to restore if the void itself fails or is reversed. Carried to the gateway in
/// `customData.prev_status`; no state transition is performed on this side, the tag is merely emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrevOrderStatus {
    Auth,
    Settled,
}

impl From<&TransactionType> for PrevOrderStatus {
    fn from(tx_type: &TransactionType) -> Self {
        match tx_type {
            TransactionType::Settle | TransactionType::Sale => Self::Settled,
            _ => Self::Auth,
        }
    }
}

impl Display for PrevOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrevOrderStatus::Auth => write!(f, "Auth"),
            PrevOrderStatus::Settled => write!(f, "Settled"),
        }
    }
}

//--------------------------------------    VoidCandidate    ----------------------------------------------------------
/// The single transaction chosen as the target of a void, and how it was chosen.
#[derive(Debug, Clone)]
pub struct VoidCandidate {
    pub record: TransactionRecord,
    /// True when the record was selected because its invoice id matched the caller's; false when it is the
    /// most-recent-voidable fallback.
    pub matched_invoice: bool,
}

//--------------------------------------   GatewayResponse   ----------------------------------------------------------
/// The processor's reply to an API call. Only the fields this client acts on are typed; everything else is kept in
/// `extra` so callers can inspect the raw reply.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "transactionStatus")]
    pub transaction_status: Option<String>,
    #[serde(default, rename = "transactionId")]
    pub transaction_id: Option<String>,
    #[serde(default, rename = "gwErrorCode")]
    pub gw_error_code: Option<i64>,
    #[serde(default, rename = "gwErrorReason")]
    pub gw_error_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Value,
}

impl GatewayResponse {
    pub fn is_approved(&self) -> bool {
        let api_ok = self.status.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("success"));
        let tx_ok = self.transaction_status.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("approved"));
        api_ok && tx_ok
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn transaction_types_parse_case_insensitively() {
        assert_eq!(TransactionType::from("AUTH"), TransactionType::Auth);
        assert_eq!(TransactionType::from("settle"), TransactionType::Settle);
        assert_eq!(TransactionType::from("Sale"), TransactionType::Sale);
        assert_eq!(TransactionType::from("chargeback"), TransactionType::Other("chargeback".into()));
    }

    #[test]
    fn voidable_types() {
        assert!(TransactionType::Auth.is_voidable_type());
        assert!(TransactionType::Settle.is_voidable_type());
        assert!(TransactionType::Sale.is_voidable_type());
        assert!(!TransactionType::Void.is_voidable_type());
        assert!(!TransactionType::Credit.is_voidable_type());
    }

    #[test]
    fn prev_status_is_settled_only_for_settle_and_sale() {
        assert_eq!(PrevOrderStatus::from(&TransactionType::Settle), PrevOrderStatus::Settled);
        assert_eq!(PrevOrderStatus::from(&TransactionType::Sale), PrevOrderStatus::Settled);
        assert_eq!(PrevOrderStatus::from(&TransactionType::Auth), PrevOrderStatus::Auth);
        assert_eq!(PrevOrderStatus::from(&TransactionType::Credit), PrevOrderStatus::Auth);
    }

    #[test]
    fn gateway_response_approval() {
        let approved: GatewayResponse =
            serde_json::from_str(r#"{"status":"SUCCESS","transactionStatus":"APPROVED","transactionId":"100017"}"#)
                .unwrap();
        assert!(approved.is_approved());
        assert_eq!(approved.transaction_id.as_deref(), Some("100017"));

        let declined: GatewayResponse = serde_json::from_str(
            r#"{"status":"SUCCESS","transactionStatus":"DECLINED","gwErrorCode":-1,"gwErrorReason":"Insufficient funds"}"#,
        )
        .unwrap();
        assert!(!declined.is_approved());
        assert_eq!(declined.gw_error_code, Some(-1));
    }
}
