use serde_json::{map::Entry, Value};

/// Recursively merges `overlay` into `base`.
///
/// The policy, spelled out so nobody has to guess at deep-merge semantics:
/// * object into object: merge key by key, recursing into shared keys;
/// * array into array: the overlay's elements are appended to the base's;
/// * everything else: the overlay value replaces the base value;
/// * keys present on only one side are kept as-is.
pub fn merge_params(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.entry(key) {
                    Entry::Occupied(mut slot) => merge_params(slot.get_mut(), value),
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    },
                }
            }
        },
        (Value::Array(base_items), Value::Array(overlay_items)) => {
            base_items.extend(overlay_items);
        },
        (slot, overlay) => *slot = overlay,
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalar_conflicts_take_the_overlay_value() {
        let mut base = json!({ "amount": "10.00", "currency": "EUR" });
        merge_params(&mut base, json!({ "amount": "12.34" }));
        assert_eq!(base, json!({ "amount": "12.34", "currency": "EUR" }));
    }

    #[test]
    fn arrays_concatenate() {
        let mut base = json!({ "items": [1, 2] });
        merge_params(&mut base, json!({ "items": [3] }));
        assert_eq!(base, json!({ "items": [1, 2, 3] }));
    }

    #[test]
    fn nested_objects_merge_recursively() {
        let mut base = json!({ "urlDetails": { "notificationUrl": "https://a/dmn" }, "customData": { "a": 1 } });
        merge_params(&mut base, json!({ "customData": { "prev_status": "Auth" } }));
        assert_eq!(
            base,
            json!({
                "urlDetails": { "notificationUrl": "https://a/dmn" },
                "customData": { "a": 1, "prev_status": "Auth" }
            })
        );
    }

    #[test]
    fn disjoint_keys_are_all_kept() {
        let mut base = json!({ "merchantId": "m1" });
        merge_params(&mut base, json!({ "timeStamp": "20260830120000" }));
        assert_eq!(base, json!({ "merchantId": "m1", "timeStamp": "20260830120000" }));
    }

    #[test]
    fn type_conflicts_take_the_overlay_value() {
        let mut base = json!({ "customData": "legacy" });
        merge_params(&mut base, json!({ "customData": { "prev_status": "Settled" } }));
        assert_eq!(base, json!({ "customData": { "prev_status": "Settled" } }));
    }
}
