use std::fs;
use std::path::{Path, PathBuf};

use wangsign_core::{DisplayMode, Header, MAGIC, SAMPLE_PACKET, SlotAttributes, padded_len};

const GAPPED_TIMESTAMP: [u8; 6] = [24, 2, 29, 13, 37, 5];

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_fixture(&root.join("sample"), SAMPLE_PACKET.to_vec())?;
    write_fixture(&root.join("gapped"), gapped_packet())?;
    Ok(())
}

fn write_fixture(dir: &Path, bytes: Vec<u8>) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
    let path = dir.join("input.bin");
    fs::write(&path, bytes).map_err(|err| format!("failed to write {}: {}", path.display(), err))
}

/// Slots 1 and 4 occupied, everything else absent.
fn gapped_packet() -> Vec<u8> {
    let mut header = Header {
        magic: *MAGIC,
        timestamp: GAPPED_TIMESTAMP,
        ..Header::default()
    };
    header.set_slot(SlotAttributes {
        slot: 1,
        speed: 7,
        mode: DisplayMode::Curtain.as_nibble(),
        blink: true,
        border: false,
        cells: 2,
    });
    header.set_slot(SlotAttributes {
        slot: 4,
        speed: 15,
        mode: DisplayMode::Laser.as_nibble(),
        blink: false,
        border: true,
        cells: 1,
    });

    let mut frame = [0x81u8; 11];
    frame[0] = 0xFF;
    frame[10] = 0xFF;
    let bar = [0x18u8; 11];
    let checker: [u8; 11] = std::array::from_fn(|row| if row % 2 == 0 { 0xAA } else { 0x55 });

    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(&frame);
    bytes.extend_from_slice(&bar);
    bytes.extend_from_slice(&checker);
    bytes.resize(padded_len(bytes.len()), 0);
    bytes
}
