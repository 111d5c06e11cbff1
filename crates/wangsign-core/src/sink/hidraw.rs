use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{PacketSink, SinkError, UsbId};

/// A hidraw node whose USB id matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HidrawDevice {
    /// Character device, e.g. `/dev/hidraw3`.
    pub node: PathBuf,
    pub id: UsbId,
    /// `HID_NAME` from sysfs, when present.
    pub name: Option<String>,
}

/// Lists hidraw devices matching `id`, ordered by device number.
///
/// `sysfs_root` is normally `/sys`; entries are read from
/// `<root>/class/hidraw/*/device/uevent`. A missing class directory yields an
/// empty list.
pub fn find_hidraw_devices(sysfs_root: &Path, id: UsbId) -> Result<Vec<HidrawDevice>, SinkError> {
    let class_dir = sysfs_root.join("class").join("hidraw");
    let entries = match fs::read_dir(&class_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut devices = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let uevent = entry.path().join("device").join("uevent");
        let contents = match fs::read_to_string(&uevent) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err.into()),
        };
        match parse_uevent(&contents) {
            Some((found, hid_name)) if found == id => {
                debug!(device = %name, "matched hidraw device");
                devices.push((
                    device_number(&name),
                    HidrawDevice {
                        node: Path::new("/dev").join(&name),
                        id: found,
                        name: hid_name,
                    },
                ));
            }
            _ => {}
        }
    }

    devices.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.node.cmp(&b.1.node)));
    Ok(devices.into_iter().map(|(_, device)| device).collect())
}

/// Extracts the USB id and name from a HID `uevent` file.
///
/// `HID_ID` has the form `bus:vendor:product` with 32-bit hex fields.
pub fn parse_uevent(contents: &str) -> Option<(UsbId, Option<String>)> {
    let mut id = None;
    let mut name = None;
    for line in contents.lines() {
        if let Some(value) = line.strip_prefix("HID_ID=") {
            let mut parts = value.trim().split(':');
            let _bus = parts.next()?;
            let vendor = u32::from_str_radix(parts.next()?, 16).ok()?;
            let product = u32::from_str_radix(parts.next()?, 16).ok()?;
            id = Some(UsbId {
                vendor: u16::try_from(vendor).ok()?,
                product: u16::try_from(product).ok()?,
            });
        } else if let Some(value) = line.strip_prefix("HID_NAME=") {
            let value = value.trim();
            if !value.is_empty() {
                name = Some(value.to_string());
            }
        }
    }
    id.map(|id| (id, name))
}

fn device_number(name: &str) -> u32 {
    name.trim_start_matches("hidraw").parse().unwrap_or(u32::MAX)
}

/// Writes packets to a hidraw character device.
#[derive(Debug)]
pub struct HidrawSink {
    file: File,
    path: PathBuf,
}

impl HidrawSink {
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new().write(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Opens the `index`-th device matching `id`.
    pub fn locate(sysfs_root: &Path, id: UsbId, index: usize) -> Result<Self, SinkError> {
        let devices = find_hidraw_devices(sysfs_root, id)?;
        if devices.is_empty() {
            return Err(SinkError::NoDevice { id });
        }
        let device = devices.get(index).ok_or(SinkError::DeviceIndex {
            index,
            found: devices.len(),
        })?;
        debug!(node = %device.node.display(), name = ?device.name, "opening badge");
        Self::open(&device.node)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PacketSink for HidrawSink {
    fn send(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        let written = self.file.write(bytes)?;
        if written != bytes.len() {
            return Err(SinkError::ShortWrite {
                written,
                expected: bytes.len(),
            });
        }
        self.file.flush()?;
        debug!(path = %self.path.display(), bytes = written, "packet written");
        Ok(())
    }
}
