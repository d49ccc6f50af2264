use url::Url;

use crate::{config::GatewayConfig, error::GatewayApiError};

/// Builds the merchant-side notification (DMN) callback URL for an outbound request.
///
/// When `order` is supplied, the order number and store id are appended as query pairs so the asynchronous
/// notification can be re-associated with the right order; `extra` carries any further context (typically the
/// invoice id of the settle being voided). The auto-void path passes no order context and gets the bare callback
/// endpoint.
pub fn notification_url(
    config: &GatewayConfig,
    order: Option<(&str, u32)>,
    extra: &[(&str, &str)],
) -> Result<String, GatewayApiError> {
    let mut url = Url::parse(&config.callback_base_url)
        .map_err(|e| GatewayApiError::Initialization(format!("Invalid callback base URL. {e}")))?;
    let mut pairs: Vec<(&str, String)> = Vec::with_capacity(extra.len() + 2);
    if let Some((increment_id, store_id)) = order {
        pairs.push(("order_id", increment_id.to_string()));
        pairs.push(("store_id", store_id.to_string()));
    }
    pairs.extend(extra.iter().map(|(k, v)| (*k, v.to_string())));
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url.to_string())
}
