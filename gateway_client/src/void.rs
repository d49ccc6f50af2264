//! # Void request builder
//!
//! A void cancels a previously authorized or settled payment. The builder reconciles the caller's intent against the
//! order's transaction history, derives the monetary amount and the rollback tag, assembles the outbound parameter
//! set, and signs it. There are two entry modes:
//!
//! * **Derived** (the normal case): the payload is computed from the order snapshot and the ledger. Only approved
//!   auth/settle/sale transactions can be voided, and a settle raised against a specific invoice is targeted
//!   precisely when the caller names that invoice.
//! * **Auto-void**: an automated callback path supplies the complete parameter set itself. The builder then only
//!   injects the notification URL and the shared signed fields; no order or amount derivation happens, so the
//!   order-related failure modes cannot occur on this path.
//!
//! Building is a pure computation over an immutable ledger snapshot. Nothing here coordinates concurrent void
//! attempts against the same order; callers must serialize those themselves (or lean on the gateway's
//! `relatedTransactionId` idempotency check).

use log::*;
use pgw_common::Money;
use serde_json::{json, Value};

use crate::{
    base_request::BaseRequest,
    checksum::sign_request,
    config::GatewayConfig,
    data_objects::{OrderView, PrevOrderStatus},
    error::{GatewayApiError, VoidError},
    ledger::TransactionLedger,
    merge::merge_params,
    notify::notification_url,
};

/// A fully assembled, checksum-signed void payload, ready for dispatch. Owned by the caller; the builder keeps
/// nothing.
#[derive(Debug, Clone)]
pub struct VoidRequestParams(Value);

impl VoidRequestParams {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn checksum(&self) -> Option<&str> {
        self.0.get("checksum").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct VoidRequestBuilder<'a> {
    config: &'a GatewayConfig,
    override_params: Option<Value>,
    invoice_id: Option<String>,
    base: Option<BaseRequest>,
}

impl<'a> VoidRequestBuilder<'a> {
    pub fn new(config: &'a GatewayConfig) -> Self {
        Self { config, override_params: None, invoice_id: None, base: None }
    }

    /// Switches the builder to auto-void mode. The given map becomes the payload; an empty or non-object value is
    /// ignored and the builder stays in derived mode.
    pub fn with_override_params(mut self, params: Value) -> Self {
        self.override_params = Some(params);
        self
    }

    /// The invoice id from the inbound trigger, when the void targets a specific settle.
    pub fn with_invoice_id(mut self, invoice_id: Option<String>) -> Self {
        self.invoice_id = invoice_id;
        self
    }

    /// Pins the shared signed fields (request id, timestamp) instead of generating fresh ones. Exists so tests can
    /// produce reproducible payloads and checksums.
    pub fn with_base_request(mut self, base: BaseRequest) -> Self {
        self.base = Some(base);
        self
    }

    /// Builds the signed void payload. `history` is the order's stored transaction history as recorded by the
    /// response-handling path (ignored in auto-void mode, as is `order`).
    pub fn build(&self, order: Option<&OrderView>, history: &Value) -> Result<VoidRequestParams, GatewayApiError> {
        let base = match &self.base {
            Some(b) => b.clone(),
            None => BaseRequest::new(self.config),
        };
        match self.override_params.as_ref().filter(|p| p.as_object().is_some_and(|o| !o.is_empty())) {
            Some(overrides) => self.build_auto_void(base, overrides.clone()),
            None => self.build_derived(base, order, history),
        }
    }

    fn build_auto_void(&self, base: BaseRequest, mut params: Value) -> Result<VoidRequestParams, GatewayApiError> {
        debug!("Building auto-void request from caller-supplied parameters");
        if self.config.notify_url_enabled {
            let dmn = notification_url(self.config, None, &[])?;
            merge_params(&mut params, json!({ "urlDetails": { "notificationUrl": dmn } }));
        }
        Ok(self.finalize(base, params))
    }

    fn build_derived(
        &self,
        base: BaseRequest,
        order: Option<&OrderView>,
        history: &Value,
    ) -> Result<VoidRequestParams, GatewayApiError> {
        let order = order.ok_or_else(|| {
            let e = VoidError::MissingOrder;
            error!("{e}");
            e
        })?;
        let ledger = TransactionLedger::from_json(history)?;
        let candidate = ledger.select_void_target(self.invoice_id.as_deref())?;
        let amount = Money::from_f64_rounded(order.base_grand_total);
        if !amount.is_positive() {
            let e = VoidError::InvalidAmount(format!("order {} has a total of {amount}", order.increment_id));
            error!("{e}. Void target was {}.", candidate.record.transaction_id);
            return Err(e.into());
        }
        let auth_code = candidate.record.auth_code.clone().unwrap_or_default();
        let prev_status = PrevOrderStatus::from(&candidate.record.transaction_type);
        let mut params = json!({
            "clientUniqueId": order.increment_id,
            "currency": order.base_currency_code,
            "amount": amount.to_string(),
            "relatedTransactionId": candidate.record.transaction_id,
            "authCode": auth_code,
            "comment": "",
            "merchantUniqueId": order.increment_id,
            "customData": { "prev_status": prev_status.to_string() },
        });
        if self.config.notify_url_enabled {
            let mut extra: Vec<(&str, &str)> = Vec::new();
            if let Some(invoice_id) = self.invoice_id.as_deref().filter(|s| !s.is_empty()) {
                extra.push(("invoice_id", invoice_id));
            }
            let dmn = notification_url(self.config, Some((&order.increment_id, order.store_id)), &extra)?;
            params["urlDetails"] = json!({ "notificationUrl": dmn });
        }
        Ok(self.finalize(base, params))
    }

    /// Merges the shared signed fields under the request-specific parameters (request values win on conflict) and
    /// signs the result.
    fn finalize(&self, base: BaseRequest, params: Value) -> VoidRequestParams {
        let mut merged = base.as_params();
        merge_params(&mut merged, params);
        let checksum = sign_request(&merged, &self.config.merchant_secret_key);
        merged["checksum"] = Value::String(checksum);
        VoidRequestParams(merged)
    }
}
