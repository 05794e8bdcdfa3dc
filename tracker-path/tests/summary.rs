//! Summaries, rename maps and pre-serialize refresh.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracker_path::{FieldPath, SummarySpec, pre_serialize_path, summarize, summarize_all};
use tracker_testhelpers::setup;
use tracker_value::{SharedValue, TrackedValue, ValueKind};

#[test]
fn renamed_field_is_shared_and_bound() {
    setup();
    let fx = common::device();
    let reg = fx.registry.as_ref();
    let specs = [SummarySpec::parse(
        "dot11.device/dot11.device.manuf",
        Some("manufacturer"),
        reg,
    )];

    let summary = summarize(&fx.root, &specs);
    let root = summary.root.read();
    let fields = root.as_field_map().unwrap();
    assert_eq!(fields.len(), 1);

    let (_, node) = fields.iter().next().unwrap();
    assert!(node.ptr_eq(&fx.manuf), "summaries share nodes, never copy");
    assert_eq!(summary.renames.rename_of(node), Some("manufacturer"));

    let binding = summary.renames.get(node).unwrap();
    assert!(binding.parent.ptr_eq(&fx.root));
}

#[test]
fn absent_field_is_skipped_silently() {
    setup();
    let fx = common::device();
    let reg = fx.registry.as_ref();
    fx.root
        .write()
        .as_field_map_mut()
        .unwrap()
        .remove(reg.id_of("dot11.device").unwrap());

    let specs = [
        SummarySpec::parse("dot11.device/dot11.device.manuf", Some("manufacturer"), reg),
        SummarySpec::parse("device.base.macaddr", None, reg),
    ];
    let summary = summarize(&fx.root, &specs);
    assert_eq!(summary.root.read().len(), Ok(1));
    assert_eq!(summary.renames.len(), 1);
    assert!(summary.renames.iter().all(|(_, b)| b.spec.rename().is_none()));
}

#[test]
fn no_specs_returns_the_whole_source() {
    setup();
    let fx = common::device();
    let summary = summarize(&fx.root, &[]);
    assert!(summary.root.ptr_eq(&fx.root));
    assert!(summary.renames.is_empty());
}

#[test]
fn summarize_all_merges_renames() {
    setup();
    let a = common::device();
    let reg = a.registry.as_ref();
    let mut b_manuf = TrackedValue::from("Other");
    b_manuf.set_id(reg.id_of("dot11.device.manuf").unwrap());
    let b_manuf: SharedValue = b_manuf.into();
    let b = common::record(
        reg,
        "device.base",
        vec![common::record(reg, "dot11.device", vec![b_manuf.clone()])],
    );

    let specs = [SummarySpec::parse(
        "dot11.device/dot11.device.manuf",
        Some("manufacturer"),
        reg,
    )];
    let summary = summarize_all(&[a.root.clone(), b], &specs);
    assert_eq!(summary.root.kind(), ValueKind::Vector);
    assert_eq!(summary.root.read().len(), Ok(2));
    assert_eq!(summary.renames.len(), 2);
    assert_eq!(summary.renames.rename_of(&a.manuf), Some("manufacturer"));
    assert_eq!(summary.renames.rename_of(&b_manuf), Some("manufacturer"));
}

#[test]
fn pre_serialize_reaches_every_fanned_out_node() {
    setup();
    let fx = common::device();
    let reg = fx.registry.as_ref();
    let calls = Arc::new(AtomicUsize::new(0));
    for ssid in &fx.ssids {
        let calls = Arc::clone(&calls);
        ssid.write().set_pre_serialize_hook(Arc::new(move |v: &mut TrackedValue| {
            calls.fetch_add(1, Ordering::SeqCst);
            let upper = v.as_str().unwrap_or_default().to_uppercase();
            let _ = v.set_str(&upper);
        }));
    }

    let path = FieldPath::parse(
        "dot11.device/dot11.device.advertised.ssid.map/dot11.advertised.ssid",
        reg,
    );
    pre_serialize_path(&fx.root, &path);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(fx.ssids[0].read().as_str(), Ok("ALPHA"));
}

#[test]
fn prepare_runs_hooks_for_bound_paths() {
    setup();
    let fx = common::device();
    let reg = fx.registry.as_ref();
    fx.manuf
        .write()
        .set_pre_serialize_hook(Arc::new(|v: &mut TrackedValue| {
            let _ = v.set_str("Refreshed");
        }));

    let summary = summarize(
        &fx.root,
        &[SummarySpec::parse("dot11.device/dot11.device.manuf", None, reg)],
    );
    assert_eq!(fx.manuf.read().as_str(), Ok("Acme"));
    summary.prepare();
    assert_eq!(fx.manuf.read().as_str(), Ok("Refreshed"));
}
