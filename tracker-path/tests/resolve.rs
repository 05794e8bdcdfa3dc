//! Single and multi path resolution against a device tree.

mod common;

use tracker_path::{FieldPath, get_multi_path, get_multi_path_str, get_path, get_path_str};
use tracker_testhelpers::setup;
use tracker_value::{MacAddr, SharedValue, ValueKind};

#[test]
fn single_path_by_name() {
    setup();
    let fx = common::device();
    let found = get_path_str(&fx.root, "dot11.device/dot11.device.manuf", fx.registry.as_ref())
        .unwrap();
    assert!(found.ptr_eq(&fx.manuf));
    assert_eq!(found.read().as_str(), Ok("Acme"));
}

#[test]
fn missing_paths_are_absent_not_errors() {
    setup();
    let fx = common::device();
    let reg = fx.registry.as_ref();
    assert!(get_path_str(&fx.root, "dot11.device/no.such.field", reg).is_none());
    assert!(get_path_str(&fx.root, "device.base.macaddr/dot11.device", reg).is_none());
    assert!(get_multi_path_str(&fx.root, "no.such.field", reg).is_empty());
}

#[test]
fn resolving_twice_gives_the_same_ids_and_node() {
    setup();
    let fx = common::device();
    let reg = fx.registry.as_ref();
    let a = FieldPath::parse("dot11.device/dot11.device.manuf", reg);
    let b = FieldPath::parse("dot11.device/dot11.device.manuf", reg);
    assert_eq!(a.ids(), b.ids());
    let first = get_path(&fx.root, &a).unwrap();
    let second = get_path(&fx.root, &b).unwrap();
    assert!(first.ptr_eq(&second));
}

#[test]
fn fan_out_yields_one_result_per_entry_in_key_order() {
    setup();
    let fx = common::device();
    let found = get_multi_path_str(
        &fx.root,
        "dot11.device/dot11.device.advertised.ssid.map/dot11.advertised.ssid",
        fx.registry.as_ref(),
    );
    assert_eq!(found.len(), 3);
    for (got, want) in found.iter().zip(&fx.ssids) {
        assert!(got.ptr_eq(want));
    }
    let names: Vec<String> = found
        .iter()
        .map(|n| n.read().as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, ["alpha", "beta", "gamma"]);
}

#[test]
fn path_ending_on_a_collection_yields_its_entries() {
    setup();
    let fx = common::device();
    let found = get_multi_path_str(
        &fx.root,
        "dot11.device/dot11.device.advertised.ssid.map",
        fx.registry.as_ref(),
    );
    assert_eq!(found.len(), 3);
    assert!(found.iter().all(|n| n.kind() == ValueKind::Map));
    let ssids: Vec<String> = found
        .iter()
        .map(|entry| {
            let ssid = get_path_str(entry, "dot11.advertised.ssid", fx.registry.as_ref()).unwrap();
            ssid.read().as_str().unwrap().to_owned()
        })
        .collect();
    assert_eq!(ssids, ["alpha", "beta", "gamma"]);
}

#[test]
fn nested_fan_out_is_outer_then_inner() {
    setup();
    let fx = common::device();
    let reg = fx.registry.as_ref();

    // mac-map of vectors of records, each record holding one "n" field.
    let outer = SharedValue::with_id(
        ValueKind::MacMap,
        common::id(reg, "outer", ValueKind::MacMap),
    );
    for (mac, values) in [(2u64, [3u32, 4]), (1, [1, 2])] {
        let inner = SharedValue::of_kind(ValueKind::Vector);
        for v in values {
            let leaf = common::field(reg, "n", v);
            inner
                .write()
                .as_vector_mut()
                .unwrap()
                .push(common::record(reg, "item", vec![leaf]));
        }
        outer
            .write()
            .as_mac_map_mut()
            .unwrap()
            .insert(MacAddr::from_u64(mac), inner);
    }
    let root = common::record(reg, "holder", vec![outer]);

    let found = get_multi_path(&root, &FieldPath::parse("outer/n", reg));
    let got: Vec<u32> = found.iter().map(|n| n.read().get::<u32>().unwrap()).collect();
    assert_eq!(got, [1, 2, 3, 4]);
}
