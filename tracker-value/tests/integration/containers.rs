//! Container behavior and node sharing.

use std::sync::Arc;

use tracker_testhelpers::setup;
use tracker_value::{
    FieldMap, MacAddr, SharedValue, TrackedValue, TrackedVector, ValueKind,
};

fn leaf(id: i32, v: u32) -> SharedValue {
    let mut value = TrackedValue::from(v);
    value.set_id(id);
    SharedValue::new(value)
}

#[test]
fn map_size_tracks_inserts_and_removes() {
    setup();
    let mut root = TrackedValue::new(ValueKind::Map);
    let map = root.as_field_map_mut().unwrap();
    map.insert_node(leaf(1, 10));
    map.insert_node(leaf(2, 20));
    map.insert_node(leaf(2, 21));
    assert_eq!(root.len(), Ok(3));

    let map = root.as_field_map_mut().unwrap();
    assert_eq!(map.remove(2), 2);
    assert_eq!(root.len(), Ok(1));
}

#[test]
fn keyed_map_size_is_unique_keys() {
    setup();
    let mut root = TrackedValue::new(ValueKind::MacMap);
    let devices = root.as_mac_map_mut().unwrap();
    let a = MacAddr::from_u64(0xa);
    devices.insert(a, leaf(-1, 1));
    devices.insert(MacAddr::from_u64(0xb), leaf(-1, 2));
    devices.insert(a, leaf(-1, 3));
    assert_eq!(root.len(), Ok(2));
    let got = root.index_mac(a).unwrap().unwrap();
    assert_eq!(got.read().get::<u32>(), Ok(3));
    assert!(root.index_mac(MacAddr::BROADCAST).unwrap().is_none());
}

#[test]
fn a_node_can_live_in_two_containers() {
    setup();
    let shared = leaf(4, 1);
    let mut vec = TrackedVector::new();
    vec.push(shared.clone());
    let mut map = FieldMap::new();
    map.insert_node(shared.clone());

    vec[0].write().increment().unwrap();
    assert_eq!(map.find(4).unwrap().read().get::<u32>(), Ok(2));
    assert_eq!(shared.holders(), 3);

    drop(vec);
    assert_eq!(shared.holders(), 2);
}

#[test]
fn clone_type_gives_an_empty_collection_of_the_same_kind() {
    setup();
    let mut names = TrackedValue::with_id(ValueKind::StringMap, 11);
    names
        .as_string_map_mut()
        .unwrap()
        .insert("home", leaf(-1, 1));
    names.set_pre_serialize_hook(Arc::new(|_: &mut TrackedValue| {}));

    let fresh = names.clone_type();
    assert_eq!(fresh.kind(), ValueKind::StringMap);
    assert_eq!(fresh.id(), 11);
    assert_eq!(fresh.is_empty(), Ok(true));
    assert!(fresh.has_pre_serialize_hook());
    assert_eq!(names.len(), Ok(1), "source is untouched");
}

#[test]
fn children_follow_iteration_order() {
    setup();
    let mut root = TrackedValue::new(ValueKind::IntMap);
    let m = root.as_int_map_mut().unwrap();
    m.insert(30, leaf(-1, 3));
    m.insert(10, leaf(-1, 1));
    m.insert(20, leaf(-1, 2));
    let values: Vec<u32> = root
        .children()
        .unwrap()
        .iter()
        .map(|c| c.read().get::<u32>().unwrap())
        .collect();
    assert_eq!(values, [1, 2, 3]);
}

#[test]
fn deep_equality_ignores_identity() {
    setup();
    let build = || {
        let mut v = TrackedValue::new(ValueKind::Vector);
        v.as_vector_mut().unwrap().push(leaf(1, 5));
        v
    };
    assert_eq!(build(), build());
    let mut other = build();
    other.as_vector_mut().unwrap()[0].write().increment().unwrap();
    assert_ne!(build(), other);
}
