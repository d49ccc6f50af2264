use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    config::GatewayConfig,
    data_objects::{GatewayResponse, OrderView},
    error::GatewayApiError,
    void::VoidRequestBuilder,
};

/// The dispatcher: sends signed payloads to the processor's JSON API and parses the replies. Request *construction*
/// lives in the builder modules; this type only owns transport.
#[derive(Clone)]
pub struct GatewayApi {
    config: GatewayConfig,
    client: Arc<Client>,
}

impl GatewayApi {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn url(&self, method: &str) -> String {
        format!("{}/{method}.do", self.config.api_base_url.trim_end_matches('/'))
    }

    /// POSTs a payload to the named API method. Non-2xx replies surface as [`GatewayApiError::QueryError`] with the
    /// processor's message attached.
    pub async fn post_request<T: DeserializeOwned>(&self, method: &str, params: &Value) -> Result<T, GatewayApiError> {
        let url = self.url(method);
        trace!("Sending gateway request: {url}");
        let response =
            self.client.post(url).json(params).send().await.map_err(|e| GatewayApiError::RequestError(e.to_string()))?;
        if response.status().is_success() {
            trace!("Gateway request successful. {}", response.status());
            response.json::<T>().await.map_err(|e| GatewayApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| GatewayApiError::ResponseError(e.to_string()))?;
            Err(GatewayApiError::QueryError { status, message })
        }
    }

    /// Builds and dispatches a void for the given order. `history` is the order's stored gateway transaction history;
    /// `invoice_id` narrows the void to the settle raised against that invoice.
    ///
    /// Void attempts against the same order are not coordinated here: the history is read once, up front, so
    /// concurrent callers can race each other into re-voiding a transaction. Serialize per order, or rely on the
    /// gateway rejecting a duplicate `relatedTransactionId`.
    pub async fn void_transaction(
        &self,
        order: &OrderView,
        history: &Value,
        invoice_id: Option<String>,
    ) -> Result<GatewayResponse, GatewayApiError> {
        let params =
            VoidRequestBuilder::new(&self.config).with_invoice_id(invoice_id).build(Some(order), history)?;
        debug!("Voiding transaction {} for order {}", params.as_value()["relatedTransactionId"], order.increment_id);
        let response = self.post_request::<GatewayResponse>("voidTransaction", params.as_value()).await?;
        info!("Void request for order {} returned {:?}", order.increment_id, response.status);
        Ok(response)
    }

    /// Dispatches an auto-void: the callback path supplies the complete parameter set and only the shared signed
    /// fields and the notification URL are added before sending.
    pub async fn auto_void(&self, params: Value) -> Result<GatewayResponse, GatewayApiError> {
        let params = VoidRequestBuilder::new(&self.config).with_override_params(params).build(None, &Value::Null)?;
        debug!("Dispatching auto-void");
        let response = self.post_request::<GatewayResponse>("voidTransaction", params.as_value()).await?;
        info!("Auto-void returned {:?}", response.status);
        Ok(response)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn method_urls() {
        let config =
            GatewayConfig { api_base_url: "https://ppp-test.example-gateway.com/ppp/api/v1/".into(), ..Default::default() };
        let api = GatewayApi::new(config).unwrap();
        assert_eq!(api.url("voidTransaction"), "https://ppp-test.example-gateway.com/ppp/api/v1/voidTransaction.do");
    }
}
