use error_record::OrderedMultiMap;

#[test]
fn add_never_overwrites() {
    let mut map = OrderedMultiMap::new();
    map.add("a", "1");
    map.add("a", "2");
    map.add("b", "3");

    assert_eq!(map.len(), 3);
    assert_eq!(map.get_all("a").collect::<Vec<_>>(), ["1", "2"]);
    assert!(map.contains_key("b"));
    assert!(!map.contains_key("A"));
}

#[test]
fn owned_iteration_yields_entries_in_order() {
    let map: OrderedMultiMap = [("x", "1"), ("y", "2"), ("x", "3")].into_iter().collect();
    let owned: Vec<(String, String)> = map.into_iter().collect();
    assert_eq!(owned[0], ("x".to_string(), "1".to_string()));
    assert_eq!(owned[2], ("x".to_string(), "3".to_string()));
}

#[test]
fn equality_is_order_sensitive() {
    let ab: OrderedMultiMap = [("a", "1"), ("b", "2")].into_iter().collect();
    let ba: OrderedMultiMap = [("b", "2"), ("a", "1")].into_iter().collect();
    assert_ne!(ab, ba);
}

#[test]
fn empty_map() {
    let map = OrderedMultiMap::with_capacity(4);
    assert!(map.is_empty());
    assert_eq!(map.get("anything"), None);
    assert_eq!(map.iter().len(), 0);
}
