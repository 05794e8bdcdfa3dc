//! A typed record, summarized and written out as JSON.

use std::sync::Arc;

use tracker::{
    EntryTracker, FieldDef, FieldRegistry, LazySlot, Record, RecordBase, RecordError,
    SerializeTree, SharedRegistry, Slot, SummarySpec, ValueKind, summarize,
};
use tracker_testhelpers::setup;

struct Radio {
    base: RecordBase,
    channel: Slot,
}

impl Record for Radio {
    fn fields() -> &'static [FieldDef<Self>] {
        const FIELDS: &[FieldDef<Radio>] = &[FieldDef::scalar(
            "radio.channel",
            ValueKind::UInt32,
            "current channel",
            |r| &mut r.channel,
        )];
        FIELDS
    }

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }

    fn blank(base: RecordBase) -> Self {
        Radio {
            base,
            channel: Slot::new(),
        }
    }
}

struct Station {
    base: RecordBase,
    name: Slot,
    packets: Slot,
    radio: LazySlot<Radio>,
}

impl Station {
    fn radio(&mut self) -> Result<&mut Radio, RecordError> {
        self.radio.get_or_init(&self.base, "station.radio")
    }
}

impl Record for Station {
    fn fields() -> &'static [FieldDef<Self>] {
        const FIELDS: &[FieldDef<Station>] = &[
            FieldDef::scalar("station.name", ValueKind::String, "name", |r| &mut r.name),
            FieldDef::scalar("station.packets", ValueKind::UInt64, "packets", |r| {
                &mut r.packets
            }),
            FieldDef::complex::<Radio>("station.radio", "radio state"),
        ];
        FIELDS
    }

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }

    fn blank(base: RecordBase) -> Self {
        Station {
            base,
            name: Slot::new(),
            packets: Slot::new(),
            radio: LazySlot::new(),
        }
    }
}

#[test]
fn record_to_summary_to_json() {
    setup();
    let registry: SharedRegistry = Arc::new(EntryTracker::new());
    let id = registry
        .resolve_or_create("station", ValueKind::Map, "a station")
        .unwrap();

    let mut station = Station::new(&registry, id).unwrap();
    station.name.set(String::from("ap-1")).unwrap();
    station.packets.add(41u64).unwrap();
    station.packets.increment().unwrap();
    station.radio().unwrap().channel.set(6u32).unwrap();

    let specs = [
        SummarySpec::parse("station.name", None, registry.as_ref()),
        SummarySpec::parse("station.radio/radio.channel", Some("channel"), registry.as_ref()),
        SummarySpec::parse("station.missing", None, registry.as_ref()),
    ];
    let summary = summarize(station.node(), &specs);
    let tree = SerializeTree::new(&summary.root, registry.as_ref()).with_renames(&summary.renames);

    assert_eq!(
        serde_json::to_value(tree).unwrap(),
        serde_json::json!({ "station.name": "ap-1", "channel": 6 })
    );

    let full = SerializeTree::new(station.node(), registry.as_ref());
    assert_eq!(
        serde_json::to_value(full).unwrap(),
        serde_json::json!({
            "station.name": "ap-1",
            "station.packets": 42,
            "station.radio": { "radio.channel": 6 },
        })
    );
}
