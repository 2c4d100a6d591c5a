use super::command::Command;
use super::encoder::{round_half_away, CommandEncoder, PenState};
use glam::Vec2;

// ── Wire-Format ──

#[test]
fn test_wire_zeilen_exakt() {
    assert_eq!(
        Command::MoveTo { x: 1200, y: -35 }.wire_line(1000, 0),
        "G00 X1200 Y-35"
    );
    assert_eq!(Command::PenUp.wire_line(1000, 0), "G00 Z1000");
    assert_eq!(Command::PenDown.wire_line(1000, 0), "G00 Z0");
    // Konfigurierbare Stift-Positionen
    assert_eq!(Command::PenDown.wire_line(800, 150), "G00 Z150");
}

#[test]
fn test_befehls_klassifikation() {
    assert!(Command::MoveTo { x: 0, y: 0 }.is_motion());
    assert!(!Command::PenUp.is_motion());
    assert!(Command::PenUp.is_pen());
    assert!(Command::PenDown.is_pen());
    assert!(!Command::MoveTo { x: 1, y: 1 }.is_pen());
}

// ── Rundung ──

#[test]
fn test_rundung_halb_vom_nullpunkt_weg() {
    assert_eq!(round_half_away(0.4), 0);
    assert_eq!(round_half_away(0.5), 1);
    assert_eq!(round_half_away(1.5), 2);
    assert_eq!(round_half_away(2.5), 3);
    assert_eq!(round_half_away(-0.5), -1);
    assert_eq!(round_half_away(-2.5), -3);
    assert_eq!(round_half_away(-0.4), 0);
}

// ── Encoder ──

#[test]
fn test_stift_befehle_nur_bei_wechsel() {
    let mut enc = CommandEncoder::new();
    // Unbekannter Zustand → erster Wechsel erzeugt immer einen Befehl
    assert_eq!(enc.set_pen(PenState::Up), Some(Command::PenUp));
    assert_eq!(enc.set_pen(PenState::Up), None);
    assert_eq!(enc.set_pen(PenState::Down), Some(Command::PenDown));
    assert_eq!(enc.set_pen(PenState::Down), None);
    assert_eq!(enc.set_pen(PenState::Up), Some(Command::PenUp));
}

#[test]
fn test_identisch_gerundete_wegpunkte_verschmelzen() {
    let mut enc = CommandEncoder::new();
    assert_eq!(
        enc.move_to(Vec2::new(10.2, 20.4)),
        Some(Command::MoveTo { x: 10, y: 20 })
    );
    // Rundet auf denselben Punkt → kein Befehl
    assert_eq!(enc.move_to(Vec2::new(9.8, 20.1)), None);
    assert_eq!(enc.move_to(Vec2::new(10.0, 20.49)), None);
    // Echter Positionswechsel
    assert_eq!(
        enc.move_to(Vec2::new(10.6, 20.0)),
        Some(Command::MoveTo { x: 11, y: 20 })
    );
}

#[test]
fn test_encoder_determinismus() {
    let stream: Vec<(PenState, Vec2)> = vec![
        (PenState::Up, Vec2::new(100.3, 200.7)),
        (PenState::Down, Vec2::new(100.4, 200.6)),
        (PenState::Down, Vec2::new(150.0, 250.0)),
        (PenState::Up, Vec2::new(150.0, 250.0)),
    ];

    let encode = |stream: &[(PenState, Vec2)]| -> Vec<Command> {
        let mut enc = CommandEncoder::new();
        let mut commands = Vec::new();
        for &(pen, point) in stream {
            commands.extend(enc.set_pen(pen));
            commands.extend(enc.move_to(point));
        }
        commands
    };

    let first = encode(&stream);
    let second = encode(&stream);
    assert_eq!(first, second);

    // Keine zwei aufeinanderfolgenden identischen Fahrbefehle
    for pair in first.windows(2) {
        if let (Command::MoveTo { x: x1, y: y1 }, Command::MoveTo { x: x2, y: y2 }) =
            (pair[0], pair[1])
        {
            assert!((x1, y1) != (x2, y2));
        }
    }
}
