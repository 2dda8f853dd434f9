//! Resolving hardware to tablets against a loaded database.

mod common;

use common::{DataDir, FakeEnumerator, FakeNode, INTUOS4};
use tabletdb::{Bus, Fallback, LookupError};

const EVENT: &str = "/dev/input/event7";

#[test]
fn usb_path() {
    let db = common::standard().load();
    let enumerator = FakeEnumerator::with(EVENT, FakeNode::usb_tablet("056a", "00b9"));
    let device = db.resolve_path(&enumerator, EVENT, Fallback::None).unwrap();
    assert_eq!(device.product(), Some("Intuos4 6x9"));
    assert_eq!(device.bus(), Bus::Usb);
}

#[test]
fn bluetooth_path_through_parent() {
    let db = common::standard().load();
    let parent = FakeNode::with(&[("PRODUCT", "5/56a/81/100")]);
    let node = FakeNode {
        parent: Some(Box::new(parent)),
        ..FakeNode::with(&[("ID_INPUT_TABLET", "1")])
    };
    let enumerator = FakeEnumerator::with(EVENT, node);
    let device = db.resolve_path(&enumerator, EVENT, Fallback::None).unwrap();
    assert_eq!(device.vendor_id(), 0x56a);
    assert_eq!(device.product_id(), 0x81);
    assert_eq!(device.bus(), Bus::Bluetooth);
    assert_eq!(device.product(), Some("Graphire Wireless 8x6"));
}

#[test]
fn fallback_to_generic() {
    let db = common::standard().load();
    let enumerator = FakeEnumerator::with(EVENT, FakeNode::usb_tablet("056a", "ffff"));

    assert!(matches!(
        db.resolve_path(&enumerator, EVENT, Fallback::None),
        Err(LookupError::UnknownModel(_))
    ));
    let device = db
        .resolve_path(&enumerator, EVENT, Fallback::Generic)
        .unwrap();
    assert!(device.is_generic());
    assert_eq!(device.match_str().as_deref(), Some("generic"));
    assert_eq!(device.vendor_id(), 0);

    // An exact match is preferred.
    let enumerator = FakeEnumerator::with(EVENT, FakeNode::usb_tablet("056a", "00b9"));
    let device = db
        .resolve_path(&enumerator, EVENT, Fallback::Generic)
        .unwrap();
    assert_eq!(device.product(), Some("Intuos4 6x9"));
}

#[test]
fn fallback_without_generic_record() {
    let db = DataDir::new(&[("intuos4.tablet", INTUOS4)]).load();
    let enumerator = FakeEnumerator::with(EVENT, FakeNode::usb_tablet("056a", "ffff"));
    assert!(matches!(
        db.resolve_path(&enumerator, EVENT, Fallback::Generic),
        Err(LookupError::UnknownModel(_))
    ));
}

#[test]
fn path_errors() {
    let db = common::standard().load();
    let enumerator = FakeEnumerator::with(EVENT, FakeNode::usb_tablet("056a", "00b9"));

    assert_eq!(
        db.resolve_path(&enumerator, "", Fallback::Generic),
        Err(LookupError::InvalidArgument("path is empty"))
    );
    assert!(matches!(
        db.resolve_path(&enumerator, "/dev/input/event8", Fallback::Generic),
        Err(LookupError::InvalidPath { .. })
    ));

    let mouse = FakeEnumerator::with(EVENT, FakeNode::with(&[("ID_BUS", "usb")]));
    assert!(matches!(
        db.resolve_path(&mouse, EVENT, Fallback::Generic),
        Err(LookupError::InvalidPath { .. })
    ));

    // Fallback doesn't paper over hardware that can't be identified at all.
    let serial = FakeEnumerator::with(
        EVENT,
        FakeNode::with(&[("ID_INPUT_TABLET", "1"), ("ID_BUS", "serial")]),
    );
    assert_eq!(
        db.resolve_path(&serial, EVENT, Fallback::Generic),
        Err(LookupError::UnsupportedBus("serial".to_owned()))
    );
}

#[test]
fn by_usb_id() {
    let db = common::standard().load();
    let device = db.resolve_usb_id(0x56a, 0xb9).unwrap();
    assert_eq!(device.product(), Some("Intuos4 6x9"));
    // Bluetooth tablets aren't found as USB ones.
    assert!(matches!(
        db.resolve_usb_id(0x56a, 0x81),
        Err(LookupError::UnknownModel(_))
    ));
}

#[test]
fn by_id() {
    let db = common::standard().load();
    let device = db
        .resolve_id(Bus::Bluetooth, 0x56a, 0x81, Fallback::None)
        .unwrap();
    assert_eq!(device.product(), Some("Graphire Wireless 8x6"));

    let device = db
        .resolve_id(Bus::Serial, 0x56a, 0x90, Fallback::Generic)
        .unwrap();
    assert!(device.is_generic());

    assert_eq!(
        db.resolve_id(Bus::Unknown, 0x56a, 0x81, Fallback::Generic),
        Err(LookupError::InvalidArgument("bus is unknown"))
    );
}

#[test]
fn by_name() {
    let db = common::standard().load();
    let device = db.resolve_name("Intuos4 6x9").unwrap();
    assert_eq!(device.vendor_id(), 0x56a);
    assert_eq!(device.product_id(), 0xb9);

    assert!(matches!(
        db.resolve_name("intuos4 6x9"),
        Err(LookupError::UnknownModel(_))
    ));
    assert_eq!(
        db.resolve_name(""),
        Err(LookupError::InvalidArgument("name is empty"))
    );
}

#[test]
fn resolved_copies_outlive_database() {
    let data = common::standard();
    let db = data.load();
    let device = db.resolve_usb_id(0x56a, 0xb9).unwrap();
    let stylus = db.stylus(device.supported_styli()[0]).cloned().unwrap();
    drop(db);

    assert_eq!(device.product(), Some("Intuos4 6x9"));
    assert_eq!(device.supported_styli(), [0x802, 0x80a, 0x812]);
    assert_eq!(stylus.name(), Some("Grip Pen"));
}
