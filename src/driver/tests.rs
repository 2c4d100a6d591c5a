use super::plot::{PlotDriver, PlotOutcome};
use crate::geometry::{Drawing, Path, Segment};
use crate::protocol::Command;
use crate::shared::PlotOptions;
use crate::transport::{CommandSink, SendError};
use approx::assert_relative_eq;
use glam::Vec2;
use std::sync::{Arc, Mutex};

/// Senke, die alle Befehle in ein geteiltes Log schreibt.
struct RecordingSink {
    log: Arc<Mutex<Vec<Command>>>,
}

impl RecordingSink {
    fn new() -> (Self, Arc<Mutex<Vec<Command>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (Self { log: log.clone() }, log)
    }
}

impl CommandSink for RecordingSink {
    fn send(&mut self, command: &Command) -> Result<(), SendError> {
        self.log.lock().unwrap().push(*command);
        Ok(())
    }
}

fn options() -> PlotOptions {
    PlotOptions::default()
}

fn line_drawing(points: &[Vec2]) -> Drawing {
    Drawing {
        paths: vec![Path::polyline(points, false)],
    }
}

#[test]
fn test_einzelner_pfad_befehlsreihenfolge() {
    let (sink, log) = RecordingSink::new();
    let drawing = line_drawing(&[Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0)]);

    let report = PlotDriver::new(sink, options()).run(&drawing).unwrap();
    assert_eq!(report.outcome, PlotOutcome::Completed);

    let sent = log.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![
            Command::PenUp,
            Command::MoveTo { x: 100, y: 100 },
            Command::PenDown,
            Command::MoveTo { x: 200, y: 100 },
            Command::PenUp,
        ]
    );
    assert_eq!(report.commands_sent, sent.len());
    assert_eq!(report.commands_total, sent.len());
}

#[test]
fn test_punkt_pfad_wird_stationaerer_punkt() {
    // Degenerierter Pfad → Stift senken und heben ohne Zeichenfahrt
    let p = Vec2::new(500.0, 500.0);
    let (sink, log) = RecordingSink::new();
    let drawing = Drawing {
        paths: vec![Path::new(vec![Segment::Line { from: p, to: p }], false)],
    };

    PlotDriver::new(sink, options()).run(&drawing).unwrap();

    let sent = log.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![
            Command::PenUp,
            Command::MoveTo { x: 500, y: 500 },
            Command::PenDown,
            Command::PenUp,
        ]
    );
}

#[test]
fn test_fehlerhafter_pfad_wird_uebersprungen() {
    let (sink, log) = RecordingSink::new();
    let drawing = Drawing {
        paths: vec![
            Path::polyline(&[Vec2::new(0.0, 0.0), Vec2::new(f32::NAN, 1.0)], false),
            Path::polyline(&[Vec2::new(100.0, 100.0), Vec2::new(200.0, 200.0)], false),
        ],
    };

    let report = PlotDriver::new(sink, options()).run(&drawing).unwrap();
    assert_eq!(report.outcome, PlotOutcome::Completed);
    assert_eq!(report.skipped_paths.len(), 1);
    assert_eq!(report.skipped_paths[0].path_index, 0);

    // Der intakte Pfad wurde trotzdem geplottet
    let sent = log.lock().unwrap().clone();
    assert!(sent.contains(&Command::MoveTo { x: 100, y: 100 }));
    assert!(sent.contains(&Command::MoveTo { x: 200, y: 200 }));
}

#[test]
fn test_pfad_ausserhalb_arbeitsbereich_wird_uebersprungen() {
    let (sink, log) = RecordingSink::new();
    let drawing = line_drawing(&[Vec2::new(100.0, 100.0), Vec2::new(9000.0, 100.0)]);

    let report = PlotDriver::new(sink, options()).run(&drawing).unwrap();
    assert_eq!(report.skipped_paths.len(), 1);
    // Nur das abschließende Stift-Heben bleibt übrig
    assert_eq!(log.lock().unwrap().clone(), vec![Command::PenUp]);
}

#[test]
fn test_clamping_statt_ueberspringen() {
    let (sink, log) = RecordingSink::new();
    let mut opts = options();
    opts.clamp_to_envelope = true;
    let drawing = line_drawing(&[Vec2::new(100.0, 100.0), Vec2::new(9000.0, 100.0)]);

    let report = PlotDriver::new(sink, opts).run(&drawing).unwrap();
    assert!(report.skipped_paths.is_empty());
    assert!(log
        .lock()
        .unwrap()
        .contains(&Command::MoveTo { x: 2000, y: 100 }));
}

#[test]
fn test_park_fahrt_nur_nach_bewegung() {
    let mut opts = options();
    opts.park_position = Some(Vec2::new(1000.0, 1000.0));

    // Mit Bewegung: Park-Fahrt als letzter Befehl
    let (sink, log) = RecordingSink::new();
    let drawing = line_drawing(&[Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0)]);
    PlotDriver::new(sink, opts.clone()).run(&drawing).unwrap();
    assert_eq!(
        *log.lock().unwrap().last().unwrap(),
        Command::MoveTo { x: 1000, y: 1000 }
    );

    // Leere Zeichnung: keine Park-Fahrt, keine Bewegungsbefehle
    let (sink, log) = RecordingSink::new();
    PlotDriver::new(sink, opts).run(&Drawing::new()).unwrap();
    assert_eq!(log.lock().unwrap().clone(), vec![Command::PenUp]);
}

#[test]
fn test_fortschritt_zaehlt_bis_gesamt() {
    let (sink, _log) = RecordingSink::new();
    let drawing = line_drawing(&[
        Vec2::new(100.0, 100.0),
        Vec2::new(200.0, 100.0),
        Vec2::new(300.0, 100.0),
    ]);

    let driver = PlotDriver::new(sink, options());
    let progress = driver.progress();
    assert_eq!(progress.total(), 0);

    let report = driver.run(&drawing).unwrap();
    assert_eq!(progress.total(), report.commands_total);
    assert_eq!(progress.sent(), report.commands_total);
    assert_relative_eq!(progress.fraction(), 1.0);
}

#[test]
fn test_aufeinanderfolgende_pfade_ohne_doppelte_stiftbefehle() {
    let (sink, log) = RecordingSink::new();
    let drawing = Drawing {
        paths: vec![
            Path::polyline(&[Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)], false),
            Path::polyline(&[Vec2::new(200.0, 0.0), Vec2::new(300.0, 0.0)], false),
        ],
    };

    PlotDriver::new(sink, options()).run(&drawing).unwrap();

    // Zwischen den Pfaden genau ein Stift-Heben, kein doppeltes
    let sent = log.lock().unwrap().clone();
    for pair in sent.windows(2) {
        assert!(
            !(pair[0].is_pen() && pair[0] == pair[1]),
            "doppelter Stiftbefehl: {:?}",
            pair
        );
    }
}
