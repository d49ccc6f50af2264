use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use serde_json::{json, Value};

use crate::config::GatewayConfig;

/// The shared fields the processor requires on every outbound request: merchant identity, a per-attempt request id,
/// and the request timestamp. `clientRequestId` and `timeStamp` both participate in the checksum, so they are fixed
/// at construction and reused verbatim when the payload is signed.
#[derive(Debug, Clone)]
pub struct BaseRequest {
    merchant_id: String,
    merchant_site_id: String,
    client_request_id: String,
    time_stamp: String,
}

impl BaseRequest {
    pub fn new(config: &GatewayConfig) -> Self {
        let time_stamp = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let salt: String = rand::thread_rng().sample_iter(&Alphanumeric).take(8).map(char::from).collect();
        let client_request_id = format!("{time_stamp}_{salt}");
        Self::with_parts(config, time_stamp, client_request_id)
    }

    /// Deterministic constructor. Production code uses [`BaseRequest::new`]; tests pin the timestamp and request id
    /// so payloads and checksums are reproducible.
    pub fn with_parts(config: &GatewayConfig, time_stamp: String, client_request_id: String) -> Self {
        Self {
            merchant_id: config.merchant_id.clone(),
            merchant_site_id: config.merchant_site_id.clone(),
            client_request_id,
            time_stamp,
        }
    }

    pub fn client_request_id(&self) -> &str {
        &self.client_request_id
    }

    pub fn time_stamp(&self) -> &str {
        &self.time_stamp
    }

    /// The shared fields as a JSON object, ready to be merged into a request payload.
    pub fn as_params(&self) -> Value {
        json!({
            "merchantId": self.merchant_id,
            "merchantSiteId": self.merchant_site_id,
            "clientRequestId": self.client_request_id,
            "timeStamp": self.time_stamp,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig { merchant_id: "m-1".into(), merchant_site_id: "s-2".into(), ..Default::default() }
    }

    #[test]
    fn base_params_carry_the_shared_fields() {
        let base = BaseRequest::with_parts(&config(), "20260830120000".into(), "20260830120000_abcd1234".into());
        let params = base.as_params();
        assert_eq!(params["merchantId"], "m-1");
        assert_eq!(params["merchantSiteId"], "s-2");
        assert_eq!(params["clientRequestId"], "20260830120000_abcd1234");
        assert_eq!(params["timeStamp"], "20260830120000");
    }

    #[test]
    fn fresh_requests_get_unique_ids() {
        let a = BaseRequest::new(&config());
        let b = BaseRequest::new(&config());
        assert_ne!(a.client_request_id(), b.client_request_id());
        assert_eq!(a.time_stamp().len(), 14);
        assert!(a.client_request_id().starts_with(a.time_stamp()));
    }
}
