//! A small device tree shared by the integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use tracker_registry::{EntryTracker, FieldRegistry, SharedRegistry};
use tracker_value::{FieldId, MacAddr, SharedValue, TrackedValue, ValueKind};

pub struct Fixture {
    pub registry: SharedRegistry,
    pub root: SharedValue,
    pub manuf: SharedValue,
    pub ssids: Vec<SharedValue>,
}

pub fn id(registry: &dyn FieldRegistry, name: &str, kind: ValueKind) -> FieldId {
    registry.resolve_or_create(name, kind, "").unwrap()
}

pub fn field(registry: &dyn FieldRegistry, name: &str, value: impl Into<TrackedValue>) -> SharedValue {
    let mut value = value.into();
    value.set_id(id(registry, name, value.kind()));
    SharedValue::new(value)
}

pub fn record(registry: &dyn FieldRegistry, name: &str, children: Vec<SharedValue>) -> SharedValue {
    let node = SharedValue::with_id(ValueKind::Map, id(registry, name, ValueKind::Map));
    {
        let mut guard = node.write();
        let map = guard.as_field_map_mut().unwrap();
        for child in children {
            map.insert_node(child);
        }
    }
    node
}

/// ```text
/// device.base (map)
/// ├── device.base.macaddr
/// └── dot11.device (map)
///     ├── dot11.device.manuf          "Acme"
///     └── dot11.device.advertised.ssid.map (intmap)
///         ├── 30 -> dot11.advertised (map) { dot11.advertised.ssid "gamma" }
///         ├── 10 -> dot11.advertised (map) { dot11.advertised.ssid "alpha" }
///         └── 20 -> dot11.advertised (map) { dot11.advertised.ssid "beta" }
/// ```
pub fn device() -> Fixture {
    let registry: SharedRegistry = Arc::new(EntryTracker::new());
    let reg = registry.as_ref();

    let manuf = field(reg, "dot11.device.manuf", "Acme");
    let ssid_map = SharedValue::with_id(
        ValueKind::IntMap,
        id(reg, "dot11.device.advertised.ssid.map", ValueKind::IntMap),
    );
    let mut ssids = Vec::new();
    for (key, name) in [(30, "gamma"), (10, "alpha"), (20, "beta")] {
        let ssid = field(reg, "dot11.advertised.ssid", name);
        let entry = record(reg, "dot11.advertised", vec![ssid.clone()]);
        ssid_map.write().as_int_map_mut().unwrap().insert(key, entry);
        ssids.push(ssid);
    }
    // key order: alpha, beta, gamma
    ssids.sort_by_key(|s| s.read().as_str().unwrap().to_owned());

    let dot11 = record(reg, "dot11.device", vec![manuf.clone(), ssid_map]);
    let mac = field(reg, "device.base.macaddr", MacAddr::from_u64(0x00_11_22_33_44_55));
    let root = record(reg, "device.base", vec![mac, dot11]);

    Fixture {
        registry,
        root,
        manuf,
        ssids,
    }
}
