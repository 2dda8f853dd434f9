//! Shared fixtures: data directories on disk and a fake device manager.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tabletdb::enumerate::{Enumerator, Node};
use tempfile::TempDir;

pub const INTUOS4: &str = "\
[Device]
Vendor=Wacom
Product=Intuos4 6x9
Width=9
Height=6
Class=Intuos4
DeviceMatch=usb:0x056a:0x00b9
Styli=0x802;0x80a;0x812;

[Features]
Stylus=true
Touch=false
Ring=true
Buttons=9
";

pub const GRAPHIRE_BT: &str = "\
[Device]
Vendor=Wacom
Product=Graphire Wireless 8x6
Width=8
Height=6
Class=Graphire
DeviceMatch=bluetooth:0x056a:0x0081
Styli=0x806;

[Features]
Stylus=true
Buttons=2
";

pub const GENERIC: &str = "\
[Device]
Product=Generic
DeviceMatch=generic
Styli=0xfffff;

[Features]
Stylus=true
";

pub const STYLI: &str = "\
[0x802]
Name=Grip Pen
Buttons=2
HasEraser=true
Type=General

[0x80a]
Name=Grip Pen Eraser
Buttons=2
HasEraser=true
IsEraser=true
Type=General

[0x812]
Name=Inking Pen

[0x0]
Name=Not a stylus
";

/// A data directory with the given files, plus a stylus file.
pub struct DataDir {
    pub dir: TempDir,
}

impl DataDir {
    pub fn new(files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            std::fs::write(dir.path().join(name), contents).unwrap();
        }
        Self { dir }
    }
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
    pub fn stylus_file(&self) -> PathBuf {
        self.dir.path().join("libwacom.stylus")
    }
    pub fn load(&self) -> tabletdb::Database {
        tabletdb::Database::load(self.path(), self.stylus_file())
    }
}

/// A standard set of tablets and styli.
pub fn standard() -> DataDir {
    DataDir::new(&[
        ("intuos4-6x9.tablet", INTUOS4),
        ("graphire-wireless-8x6.tablet", GRAPHIRE_BT),
        ("generic.tablet", GENERIC),
        ("libwacom.stylus", STYLI),
    ])
}

#[derive(Clone, Default)]
pub struct FakeNode {
    pub properties: HashMap<String, String>,
    pub parent: Option<Box<FakeNode>>,
}

impl FakeNode {
    pub fn with(properties: &[(&str, &str)]) -> Self {
        Self {
            properties: properties
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect(),
            parent: None,
        }
    }
    pub fn usb_tablet(vendor: &str, model: &str) -> Self {
        Self::with(&[
            ("ID_INPUT_TABLET", "1"),
            ("ID_BUS", "usb"),
            ("ID_VENDOR_ID", vendor),
            ("ID_MODEL_ID", model),
        ])
    }
}

impl Node for FakeNode {
    fn property(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }
    fn parent(&self) -> Option<Self> {
        self.parent.as_deref().cloned()
    }
}

/// Device nodes by path.
#[derive(Default)]
pub struct FakeEnumerator {
    pub nodes: HashMap<PathBuf, FakeNode>,
}

impl FakeEnumerator {
    pub fn with(path: &str, node: FakeNode) -> Self {
        Self {
            nodes: HashMap::from([(PathBuf::from(path), node)]),
        }
    }
}

impl Enumerator for FakeEnumerator {
    type Node = FakeNode;
    fn device_for_path(&self, path: &Path) -> Option<FakeNode> {
        self.nodes.get(path).cloned()
    }
}

/// Log output shared between a test and the subscriber writing it.
#[derive(Clone, Default)]
pub struct Logs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for Logs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` with warnings captured, returning its result and everything logged meanwhile.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = Logs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
    (value, output)
}
