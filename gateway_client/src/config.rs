use log::*;
use pgw_common::{env_flag, Secret};

const DEFAULT_API_BASE_URL: &str = "https://ppp-test.example-gateway.com/ppp/api/v1";
const DEFAULT_CALLBACK_BASE_URL: &str = "http://localhost:8360/gateway/dmn";

/// Everything the client needs to build, sign and send requests. Credentials are issued by the processor per
/// merchant site; the callback base is the merchant-side endpoint that receives asynchronous payment notifications.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    pub merchant_id: String,
    pub merchant_site_id: String,
    /// The signing secret for the request checksum. Never logged.
    pub merchant_secret_key: Secret<String>,
    pub api_base_url: String,
    pub callback_base_url: String,
    /// When false, outbound requests omit `urlDetails.notificationUrl` and the processor will not send notifications
    /// for them.
    pub notify_url_enabled: bool,
}

impl GatewayConfig {
    pub fn from_env_or_default() -> Self {
        let merchant_id = std::env::var("PGW_MERCHANT_ID").unwrap_or_else(|_| {
            error!("PGW_MERCHANT_ID is not set. The gateway will reject unsigned requests.");
            String::default()
        });
        let merchant_site_id = std::env::var("PGW_MERCHANT_SITE_ID").unwrap_or_else(|_| {
            error!("PGW_MERCHANT_SITE_ID is not set. The gateway will reject unsigned requests.");
            String::default()
        });
        let merchant_secret_key = Secret::new(std::env::var("PGW_MERCHANT_SECRET_KEY").unwrap_or_else(|_| {
            error!("PGW_MERCHANT_SECRET_KEY is not set. Request checksums will not validate.");
            String::default()
        }));
        let api_base_url = std::env::var("PGW_API_BASE_URL").unwrap_or_else(|_| {
            warn!("PGW_API_BASE_URL not set, using the sandbox endpoint {DEFAULT_API_BASE_URL}");
            DEFAULT_API_BASE_URL.to_string()
        });
        let callback_base_url = std::env::var("PGW_CALLBACK_BASE_URL").unwrap_or_else(|_| {
            warn!("PGW_CALLBACK_BASE_URL not set, using {DEFAULT_CALLBACK_BASE_URL} as default");
            DEFAULT_CALLBACK_BASE_URL.to_string()
        });
        let notify_url_enabled = !env_flag("PGW_DISABLE_NOTIFY_URL", false);
        Self { merchant_id, merchant_site_id, merchant_secret_key, api_base_url, callback_base_url, notify_url_enabled }
    }
}
