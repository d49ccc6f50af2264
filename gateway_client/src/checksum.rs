//! # Request checksum
//!
//! Every outbound request carries a `checksum` the processor recomputes server-side; a mismatch gets the request
//! rejected outright. The digest is the lowercase hex SHA-256 of a fixed, ordered subset of the request fields with
//! the merchant secret appended. Field order is part of the contract: it must match [`CHECKSUM_FIELDS`] exactly, and
//! fields outside that list never contribute to the digest, even when present in the payload.

use pgw_common::Secret;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// The signed fields, in signing order. Missing fields contribute the empty string.
pub const CHECKSUM_FIELDS: [&str; 11] = [
    "merchantId",
    "merchantSiteId",
    "clientRequestId",
    "clientUniqueId",
    "amount",
    "currency",
    "relatedTransactionId",
    "authCode",
    "comment",
    "urlDetails",
    "timeStamp",
];

/// Computes the request checksum. Pure function of the listed fields and the secret.
pub fn sign_request(params: &Value, secret: &Secret<String>) -> String {
    let mut hasher = Sha256::new();
    for field in CHECKSUM_FIELDS {
        hasher.update(checksum_value(params.get(field)).as_bytes());
    }
    hasher.update(secret.reveal().as_bytes());
    hex::encode(hasher.finalize())
}

/// The string a field contributes to the digest. Strings go in verbatim, numbers and booleans in their JSON form,
/// and composite values (`urlDetails`) as the concatenation of their values in key order.
fn checksum_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(map)) => map.values().map(|v| checksum_value(Some(v))).collect(),
        Some(Value::Array(items)) => items.iter().map(|v| checksum_value(Some(v))).collect(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn secret() -> Secret<String> {
        Secret::new("k3y".to_string())
    }

    fn params() -> Value {
        json!({
            "merchantId": "m-1",
            "merchantSiteId": "s-2",
            "clientRequestId": "20260830120000_abcd1234",
            "clientUniqueId": "100000021",
            "amount": "12.34",
            "currency": "EUR",
            "relatedTransactionId": "2110000000004",
            "authCode": "077132",
            "comment": "",
            "urlDetails": { "notificationUrl": "https://shop.example.com/gateway/dmn?order_id=100000021" },
            "timeStamp": "20260830120000",
        })
    }

    #[test]
    fn checksum_is_deterministic_hex_sha256() {
        let a = sign_request(&params(), &secret());
        let b = sign_request(&params(), &secret());
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn fields_outside_the_list_do_not_affect_the_checksum() {
        let base = sign_request(&params(), &secret());
        let mut extra = params();
        extra["merchantUniqueId"] = json!("100000021");
        extra["customData"] = json!({ "prev_status": "Settled" });
        assert_eq!(sign_request(&extra, &secret()), base);
    }

    #[test]
    fn every_listed_field_affects_the_checksum() {
        let base = sign_request(&params(), &secret());
        for field in CHECKSUM_FIELDS {
            let mut changed = params();
            changed[field] = json!("tampered");
            assert_ne!(sign_request(&changed, &secret()), base, "changing {field} must change the checksum");
        }
    }

    #[test]
    fn missing_fields_hash_as_empty_strings() {
        let mut without_comment = params();
        without_comment.as_object_mut().unwrap().remove("comment");
        // "comment" is the empty string in the base fixture, so removing it entirely must not change the digest.
        assert_eq!(sign_request(&without_comment, &secret()), sign_request(&params(), &secret()));
    }

    #[test]
    fn secret_affects_the_checksum() {
        let a = sign_request(&params(), &secret());
        let b = sign_request(&params(), &Secret::new("other".to_string()));
        assert_ne!(a, b);
    }

    #[test]
    fn field_order_is_part_of_the_digest() {
        // Swapping the *values* of two adjacent signed fields changes the concatenation and therefore the digest,
        // even though the same set of strings is hashed.
        let mut swapped = params();
        swapped["currency"] = json!("12.34");
        swapped["amount"] = json!("EUR");
        assert_ne!(sign_request(&swapped, &secret()), sign_request(&params(), &secret()));
    }
}
