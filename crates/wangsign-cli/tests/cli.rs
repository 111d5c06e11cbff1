use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{GrayImage, Luma};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;
use wangsign_core::{DisplayMode, decode_packet};

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("wangsign"))
}

fn repo_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn sample_packet() -> PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join("sample")
        .join("input.bin")
}

/// Writes a PNG `width` x `height` with the first column lit.
fn write_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let mut image = GrayImage::new(width, height);
    for y in 0..height {
        image.put_pixel(0, y, Luma([255]));
    }
    let path = dir.join(name);
    image.save(&path).expect("save png");
    path
}

#[test]
fn help_lists_commands() {
    for command in ["send", "inspect", "demo"] {
        cmd().arg(command).arg("--help").assert().success();
    }
}

#[test]
fn send_dry_run_saves_packet() {
    let temp = TempDir::new().expect("tempdir");
    let image = write_image(temp.path(), "hello.png", 20, 11);
    let packet = temp.path().join("out").join("packet.bin");

    cmd()
        .arg("send")
        .arg("-m")
        .arg(&image)
        .arg("--speed")
        .arg("3")
        .arg("--blink")
        .arg("-o")
        .arg(&packet)
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(contains("OK: packet saved").and(contains("dry run")));

    let bytes = fs::read(&packet).expect("read packet");
    assert_eq!(bytes.len(), 128);
    assert_eq!(&bytes[..6], b"wang\0\0");
    assert_eq!(bytes[6], 0b1);
    assert_eq!(bytes[8], 0x30);
    assert_eq!(&bytes[16..18], &[0, 3]);
    assert_eq!(bytes[64], 0x80);
}

#[test]
fn message_overrides_apply_per_message() {
    let temp = TempDir::new().expect("tempdir");
    let first = write_image(temp.path(), "a.png", 8, 11);
    let second = write_image(temp.path(), "b.png", 8, 11);
    let packet = temp.path().join("packet.bin");

    cmd()
        .arg("send")
        .arg("--mode")
        .arg("up")
        .arg("-m")
        .arg(&first)
        .arg("-m")
        .arg(format!("{},mode=laser,speed=9,border", second.display()))
        .arg("-o")
        .arg(&packet)
        .arg("--dry-run")
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());

    let decoded = decode_packet(&fs::read(&packet).expect("read packet")).expect("decode");
    assert_eq!(decoded.messages.len(), 2);
    assert_eq!(decoded.messages[0].mode, DisplayMode::ScrollUp);
    assert_eq!(decoded.messages[0].speed.get(), 5);
    assert!(!decoded.messages[0].border);
    assert_eq!(decoded.messages[1].mode, DisplayMode::Laser);
    assert_eq!(decoded.messages[1].speed.get(), 9);
    assert!(decoded.messages[1].border);
}

#[test]
fn send_writes_to_device_node() {
    let temp = TempDir::new().expect("tempdir");
    let image = write_image(temp.path(), "hello.png", 8, 11);
    let device = temp.path().join("hidraw0");
    fs::write(&device, b"").expect("create device node");

    cmd()
        .arg("send")
        .arg("-m")
        .arg(&image)
        .arg("--device")
        .arg(&device)
        .assert()
        .success()
        .stderr(contains("OK: 128 bytes written"));

    let bytes = fs::read(&device).expect("read device node");
    assert_eq!(bytes.len(), 128);
}

#[test]
fn dump_prints_hex() {
    let temp = TempDir::new().expect("tempdir");
    let image = write_image(temp.path(), "hello.png", 8, 11);

    cmd()
        .arg("send")
        .arg("-m")
        .arg(&image)
        .arg("--dump")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(contains("00000000  77 61 6e 67 00 00").and(contains("|wang")));
}

#[test]
fn wrong_height_shows_hint() {
    let temp = TempDir::new().expect("tempdir");
    let image = write_image(temp.path(), "tall.png", 8, 12);

    cmd()
        .arg("send")
        .arg("-m")
        .arg(&image)
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(contains("bad raster height").and(contains("11 pixels high")));
}

#[test]
fn ninth_message_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let image = write_image(temp.path(), "hello.png", 8, 11);

    let mut command = cmd();
    command.arg("send");
    for _ in 0..9 {
        command.arg("-m").arg(&image);
    }
    command
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(contains("too many messages").and(contains("hint:")));
}

#[test]
fn oversize_packet_is_not_sent() {
    let temp = TempDir::new().expect("tempdir");
    let image = write_image(temp.path(), "wide.png", 8000, 11);
    let packet = temp.path().join("packet.bin");

    cmd()
        .arg("send")
        .arg("-m")
        .arg(&image)
        .arg("-o")
        .arg(&packet)
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(contains("buffer too large"));
    assert!(!packet.exists());
}

#[test]
fn missing_badge_shows_hint() {
    let temp = TempDir::new().expect("tempdir");
    let image = write_image(temp.path(), "hello.png", 8, 11);
    let sysfs = temp.path().join("sys");
    fs::create_dir_all(&sysfs).expect("sysfs dir");

    cmd()
        .arg("send")
        .arg("-m")
        .arg(&image)
        .arg("--sysfs-root")
        .arg(&sysfs)
        .assert()
        .failure()
        .stderr(contains("no hidraw device found for 0416:5020").and(contains("hint:")));
}

#[test]
fn device_conflicts_with_devid() {
    let temp = TempDir::new().expect("tempdir");
    let image = write_image(temp.path(), "hello.png", 8, 11);

    cmd()
        .arg("send")
        .arg("-m")
        .arg(&image)
        .arg("--device")
        .arg(temp.path().join("hidraw0"))
        .arg("--devid")
        .arg("1234:5678")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn inspect_outputs_json() {
    let assert = cmd()
        .arg("inspect")
        .arg(sample_packet())
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["timestamp"], "2019-08-30T23:11:39");
    assert_eq!(report["messages"][0]["mode"], "animation");
    assert_eq!(report["messages"][0]["cells"], 11);
}

#[test]
fn inspect_missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");

    cmd()
        .arg("inspect")
        .arg(temp.path().join("missing.bin"))
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn inspect_truncated_packet_fails() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("short.bin");
    fs::write(&input, [0u8; 32]).expect("write short packet");

    cmd()
        .arg("inspect")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("truncated header"));
}

#[test]
fn demo_appends_animation_frame() {
    let temp = TempDir::new().expect("tempdir");
    let packet = temp.path().join("demo.bin");

    cmd()
        .arg("demo")
        .arg("-o")
        .arg(&packet)
        .arg("--dry-run")
        .assert()
        .success();

    let decoded = decode_packet(&fs::read(&packet).expect("read packet")).expect("decode");
    assert_eq!(decoded.messages.len(), 2);
    assert_eq!(decoded.messages[0].speed.get(), 6);
    let frame = &decoded.messages[1];
    assert_eq!(frame.mode, DisplayMode::Animation);
    assert!(frame.border);
    assert_eq!(frame.columns.len(), 4);
    assert_eq!(frame.columns[1][5], 0b0010_0000);
}

fn packet_dir(names: &[&str]) -> TempDir {
    let temp = TempDir::new().expect("tempdir");
    for name in names {
        fs::copy(sample_packet(), temp.path().join(name)).expect("copy sample packet");
    }
    temp
}

#[test]
fn inspect_accepts_pattern_with_one_match() {
    let temp = packet_dir(&["badge.bin"]);
    fs::write(temp.path().join("notes.txt"), "not a packet").expect("write notes");

    let assert = cmd()
        .arg("inspect")
        .arg(temp.path().join("*.bin"))
        .assert()
        .success();
    let report: Value = serde_json::from_slice(&assert.get_output().stdout).expect("valid json");
    assert_eq!(report["bytes"], 192);
}

#[test]
fn inspect_rejects_pattern_with_several_matches() {
    let temp = packet_dir(&["a.bin", "b.bin"]);

    cmd()
        .arg("inspect")
        .arg(temp.path().join("*.bin"))
        .assert()
        .failure()
        .stderr(contains("multiple files match").and(contains("(2 matches)")));
}

#[test]
fn inspect_rejects_pattern_without_matches() {
    let temp = packet_dir(&[]);

    cmd()
        .arg("inspect")
        .arg(temp.path().join("*.bin"))
        .assert()
        .failure()
        .stderr(contains("no files match").and(contains("hint:")));
}
