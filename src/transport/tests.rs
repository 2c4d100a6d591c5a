use super::gcode_file::GcodeFileSink;
use super::session::{read_frame, DeviceInfo};
use super::{CommandSink, TransportError};
use crate::protocol::Command;
use std::io::Cursor;

// ── Rahmen-Parsing ──

#[test]
fn test_frame_bis_nul_delimiter() {
    let mut reader = Cursor::new(b"ok\r\n\0weitere daten".to_vec());
    let frame = read_frame(&mut reader, 1000).unwrap();
    assert_eq!(frame, "ok");
}

#[test]
fn test_frame_whitespace_wird_getrimmt() {
    let mut reader = Cursor::new(b"  hello VERSION:3.0  \r\n\0".to_vec());
    let frame = read_frame(&mut reader, 1000).unwrap();
    assert_eq!(frame, "hello VERSION:3.0");
}

#[test]
fn test_leerer_stream_ist_verbindungsabbruch() {
    let mut reader = Cursor::new(Vec::new());
    assert!(matches!(
        read_frame(&mut reader, 1000),
        Err(TransportError::Disconnected)
    ));
}

#[test]
fn test_stream_ende_mitten_im_rahmen_ist_verbindungsabbruch() {
    let mut reader = Cursor::new(b"ok ohne delimiter".to_vec());
    assert!(matches!(
        read_frame(&mut reader, 1000),
        Err(TransportError::Disconnected)
    ));
}

#[test]
fn test_ungueltiges_utf8_ist_malformed() {
    let mut reader = Cursor::new(vec![0xff, 0xfe, 0x00]);
    assert!(matches!(
        read_frame(&mut reader, 1000),
        Err(TransportError::MalformedResponse { .. })
    ));
}

// ── Geräte-Begrüßung ──

#[test]
fn test_hello_parsing() {
    let info = DeviceInfo::parse("hello VERSION:3.0 SERIAL:123456").unwrap();
    assert_eq!(info.version.as_deref(), Some("3.0"));
    assert_eq!(info.serial.as_deref(), Some("123456"));
    assert_eq!(info.raw, "hello VERSION:3.0 SERIAL:123456");
}

#[test]
fn test_hello_mit_unbekannten_feldern() {
    let info = DeviceInfo::parse("hello VERSION:2.1 NAME:lineus SERIAL:7").unwrap();
    assert_eq!(info.version.as_deref(), Some("2.1"));
    assert_eq!(info.serial.as_deref(), Some("7"));
}

#[test]
fn test_begruessung_ohne_hello_wird_abgelehnt() {
    assert!(DeviceInfo::parse("ok").is_none());
    assert!(DeviceInfo::parse("").is_none());
    assert!(DeviceInfo::parse("error not ready").is_none());
}

#[test]
fn test_describe_mit_fehlenden_feldern() {
    let info = DeviceInfo::parse("hello").unwrap();
    assert_eq!(info.describe(), "Version: ?, Serial: ?");
}

// ── G-Code-Dateiausgabe ──

#[test]
fn test_gcode_datei_format() {
    let path = std::env::temp_dir().join(format!("lineus_gcode_test_{}.gcode", std::process::id()));

    let mut sink = GcodeFileSink::create(&path, 1000, 0).unwrap();
    sink.send(&Command::PenUp).unwrap();
    sink.send(&Command::MoveTo { x: 100, y: 200 }).unwrap();
    sink.send(&Command::PenDown).unwrap();
    sink.finish().unwrap();

    // Lesen vor dem Drop: `finish` allein muss den Puffer leeren
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "G54 X0 Y0 S1\nG00 Z1000\nG00 X100 Y200\nG00 Z0\n");

    drop(sink);
    std::fs::remove_file(&path).unwrap();
}
