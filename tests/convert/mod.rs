use error_record::convert::*;
use error_record::OrderedMultiMap;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Holder {
    #[serde(
        default,
        with = "error_record::convert::pairs",
        skip_serializing_if = "Option::is_none"
    )]
    map: Option<OrderedMultiMap>,
}

prop_compose! {
    fn multi_map_strategy()
        (entries in proptest::collection::vec(("[a-c]{1,2}", ".{0,8}"), 0..12)) -> OrderedMultiMap {
            entries.into_iter().collect()
        }
}

proptest! {
    #[test]
    fn pairs_round_trip_preserves_order_and_duplicates(map in multi_map_strategy()) {
        let pairs = to_pairs(Some(&map));
        prop_assert_eq!(pairs.len(), map.len());
        prop_assert_eq!(from_pairs(pairs), map);
    }

    #[test]
    fn serde_adapter_round_trips(map in multi_map_strategy()) {
        let holder = Holder { map: Some(map) };
        let json = serde_json::to_string(&holder).unwrap();
        let back: Holder = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, holder);
    }

    #[test]
    fn last_value_map_agrees_with_get(map in multi_map_strategy()) {
        let flat = last_value_map(Some(&map)).unwrap();
        for (name, value) in &flat {
            prop_assert_eq!(map.get(name), Some(*value));
        }
    }
}

#[test]
fn pairs_keep_wire_order() {
    let map: OrderedMultiMap = [("b", "1"), ("a", "2"), ("b", "3")].into_iter().collect();
    let json = serde_json::to_value(to_pairs(Some(&map))).unwrap();

    assert_eq!(
        json,
        json!([
            {"name": "b", "value": "1"},
            {"name": "a", "value": "2"},
            {"name": "b", "value": "3"},
        ])
    );
}

#[test]
fn absent_map_is_skipped_and_restored_as_absent() {
    let holder = Holder { map: None };
    let json = serde_json::to_string(&holder).unwrap();
    assert_eq!(json, "{}");

    let back: Holder = serde_json::from_str(&json).unwrap();
    assert_eq!(back.map, None);
}

#[test]
fn null_reads_as_absent() {
    let back: Holder = serde_json::from_str(r#"{"map": null}"#).unwrap();
    assert_eq!(back.map, None);
}

#[test]
fn empty_array_reads_as_empty_map() {
    let back: Holder = serde_json::from_str(r#"{"map": []}"#).unwrap();
    assert_eq!(back.map, Some(OrderedMultiMap::new()));
}

#[test]
fn pair_missing_value_is_rejected() {
    let result = serde_json::from_str::<Holder>(r#"{"map": [{"name": "a"}]}"#);
    assert!(result.is_err());
}

#[test]
fn name_value_pair_from_tuple() {
    let pair = NameValuePair::from(("k".to_string(), "v".to_string()));
    assert_eq!(pair, NameValuePair::new("k", "v"));
}
