//! Plot-Treiber: plant den Befehlsstrom und streamt ihn zur Senke.
//!
//! Ablauf pro Zeichnung: alle Pfade abflachen (fehlerhafte Pfade werden
//! übersprungen, nicht die ganze Zeichnung verworfen), daraus den
//! vollständigen Befehlsplan kodieren, dann Befehl für Befehl senden.
//! Transport- und Gerätefehler brechen den Durchlauf hart ab — die
//! Stiftposition nach einem Fault ist unbekannt, ein Wiederaufsetzen
//! mitten in der Zeichnung ist ohne Positionsabfrage nicht möglich.

use super::progress::{CancelFlag, PlotProgress};
use crate::geometry::{enforce_envelope, flatten_path, Drawing, GeometryError};
use crate::protocol::{Command, CommandEncoder, PenState};
use crate::shared::PlotOptions;
use crate::transport::{CommandSink, SendError, TransportError};
use std::sync::Arc;
use thiserror::Error;

/// Reguläres Ende eines Plot-Durchlaufs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotOutcome {
    /// Alle geplanten Befehle gesendet
    Completed,
    /// Vom Aufrufer abgebrochen (kein Fehler)
    Cancelled,
}

/// Ein wegen Geometriefehler übersprungener Pfad.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPath {
    /// Index des Pfads in der Zeichnung
    pub path_index: usize,
    /// Grund des Überspringens
    pub error: GeometryError,
}

/// Ergebnis eines regulär beendeten Plot-Durchlaufs.
#[derive(Debug, Clone)]
pub struct PlotReport {
    /// Abgeschlossen oder abgebrochen
    pub outcome: PlotOutcome,
    /// Tatsächlich gesendete Befehle (inkl. erzwungenem Stift-Heben
    /// bei Abbruch, das nicht im Plan enthalten war)
    pub commands_sent: usize,
    /// Geplante Befehlsanzahl
    pub commands_total: usize,
    /// Übersprungene Pfade (als Warnungen zu präsentieren)
    pub skipped_paths: Vec<SkippedPath>,
}

/// Fataler Fehler eines Plot-Durchlaufs.
///
/// Trägt den Befehls- und Pfadindex für die Diagnose — der Aufrufer
/// kann damit gezielt neu verbinden und von vorn plotten.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Verbindungsfehler beim Senden eines Befehls.
    #[error("Transportfehler bei Befehl {command_index}/{commands_total} (Pfad {path_display}): {source}",
        path_display = display_path_index(.path_index))]
    Transport {
        command_index: usize,
        commands_total: usize,
        path_index: Option<usize>,
        #[source]
        source: TransportError,
    },
    /// Explizite Fehlerantwort des Geräts.
    #[error("Gerätefehler bei Befehl {command_index}/{commands_total} (Pfad {path_display}): {response:?}",
        path_display = display_path_index(.path_index))]
    Device {
        command_index: usize,
        commands_total: usize,
        path_index: Option<usize>,
        response: String,
    },
}

fn display_path_index(path_index: &Option<usize>) -> String {
    match path_index {
        Some(i) => i.to_string(),
        None => "-".to_string(),
    }
}

/// Ein geplanter Befehl mit Herkunfts-Pfad (None = Abschluss-Sequenz).
#[derive(Debug, Clone, Copy)]
struct PlannedCommand {
    command: Command,
    path_index: Option<usize>,
}

/// Orchestriert einen vollständigen Plot-Durchlauf über eine Senke.
///
/// Treiber, Session und Flattener sind explizite Instanzen ohne
/// globalen Zustand — mehrere Durchläufe (oder Tests) im selben
/// Prozess stören sich nicht.
pub struct PlotDriver<S: CommandSink> {
    sink: S,
    options: PlotOptions,
    progress: Arc<PlotProgress>,
    cancel: CancelFlag,
}

impl<S: CommandSink> PlotDriver<S> {
    /// Erstellt einen Treiber über der gegebenen Senke.
    pub fn new(sink: S, options: PlotOptions) -> Self {
        Self::with_cancel(sink, options, CancelFlag::new())
    }

    /// Wie `new`, aber mit einem vom Aufrufer gehaltenen Abbruch-Signal.
    pub fn with_cancel(sink: S, options: PlotOptions, cancel: CancelFlag) -> Self {
        Self {
            sink,
            options,
            progress: Arc::new(PlotProgress::default()),
            cancel,
        }
    }

    /// Geteiltes Fortschritts-Handle (gesendet/gesamt).
    pub fn progress(&self) -> Arc<PlotProgress> {
        Arc::clone(&self.progress)
    }

    /// Geteiltes Abbruch-Signal für den Aufrufer.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Plottet die Zeichnung vollständig.
    ///
    /// Konsumiert den Treiber; die Senke wird auf allen Ausgängen
    /// (Erfolg, Abbruch, Fehler) freigegeben.
    pub fn run(mut self, drawing: &Drawing) -> Result<PlotReport, PlotError> {
        let (plan, skipped_paths) = plan_commands(drawing, &self.options);
        let commands_total = plan.len();
        self.progress.set_total(commands_total);
        log::info!(
            "Plot geplant: {} Befehle aus {} Pfaden ({} übersprungen)",
            commands_total,
            drawing.path_count(),
            skipped_paths.len()
        );

        let mut commands_sent = 0usize;

        for (command_index, planned) in plan.iter().enumerate() {
            if self.cancel.is_cancelled() {
                log::info!("Abbruch angefordert nach {} Befehlen", commands_sent);
                commands_sent += self.forced_pen_up();
                let _ = self.sink.finish();
                return Ok(PlotReport {
                    outcome: PlotOutcome::Cancelled,
                    commands_sent,
                    commands_total,
                    skipped_paths,
                });
            }

            match self.sink.send(&planned.command) {
                Ok(()) => {
                    commands_sent += 1;
                    self.progress.record_sent();
                    self.pen_settle(&planned.command);
                }
                Err(e) => {
                    // Stift-Heben versuchen, damit er nicht auf dem
                    // Papier stehen bleibt; eine gefaultete Session
                    // verweigert das von sich aus.
                    self.forced_pen_up();
                    let _ = self.sink.finish();
                    return Err(to_plot_error(e, command_index, commands_total, planned.path_index));
                }
            }
        }

        if let Err(e) = self.sink.finish() {
            return Err(to_plot_error(e, commands_total, commands_total, None));
        }

        log::info!("Plot abgeschlossen: {} Befehle gesendet", commands_sent);
        Ok(PlotReport {
            outcome: PlotOutcome::Completed,
            commands_sent,
            commands_total,
            skipped_paths,
        })
    }

    /// Erzwungenes Stift-Heben außerhalb des Plans (Abbruch/Fault).
    /// Gibt 1 zurück, wenn der Befehl gesendet werden konnte.
    fn forced_pen_up(&mut self) -> usize {
        match self.sink.send(&Command::PenUp) {
            Ok(()) => 1,
            Err(e) => {
                log::warn!("Abschließendes Stift-Heben fehlgeschlagen: {}", e);
                0
            }
        }
    }

    /// Wartezeit nach Stift-Befehlen (mechanisches Setzen des Stifts).
    fn pen_settle(&self, command: &Command) {
        if command.is_pen() && self.options.pen_delay_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(self.options.pen_delay_ms));
        }
    }
}

fn to_plot_error(
    e: SendError,
    command_index: usize,
    commands_total: usize,
    path_index: Option<usize>,
) -> PlotError {
    match e {
        SendError::Transport(source) => PlotError::Transport {
            command_index,
            commands_total,
            path_index,
            source,
        },
        SendError::DeviceFault { response } => PlotError::Device {
            command_index,
            commands_total,
            path_index,
            response,
        },
    }
}

/// Plant den vollständigen Befehlsstrom einer Zeichnung.
///
/// Pro Pfad: Stift heben, Anfahrt zum ersten Wegpunkt, Stift senken,
/// Zeichenfahrten, Stift heben. Fehlerhafte Pfade werden übersprungen
/// und gesammelt. Zum Schluss Stift heben und — falls konfiguriert und
/// mindestens eine Bewegung geplant wurde — die Park-Fahrt.
fn plan_commands(
    drawing: &Drawing,
    options: &PlotOptions,
) -> (Vec<PlannedCommand>, Vec<SkippedPath>) {
    let mut encoder = CommandEncoder::new();
    let mut plan: Vec<PlannedCommand> = Vec::new();
    let mut skipped: Vec<SkippedPath> = Vec::new();

    fn push(plan: &mut Vec<PlannedCommand>, cmd: Option<Command>, path_index: Option<usize>) {
        if let Some(command) = cmd {
            plan.push(PlannedCommand {
                command,
                path_index,
            });
        }
    }

    for (path_index, path) in drawing.paths.iter().enumerate() {
        let mut waypoints = match flatten_path(path, options.tolerance) {
            Ok(w) => w,
            Err(error) => {
                log::warn!("Pfad {} übersprungen: {}", path_index, error);
                skipped.push(SkippedPath { path_index, error });
                continue;
            }
        };

        if let Err(error) = enforce_envelope(
            &mut waypoints,
            options.envelope_min,
            options.envelope_max,
            options.clamp_to_envelope,
        ) {
            log::warn!("Pfad {} übersprungen: {}", path_index, error);
            skipped.push(SkippedPath { path_index, error });
            continue;
        }

        if waypoints.is_empty() {
            continue;
        }

        let idx = Some(path_index);
        push(&mut plan, encoder.set_pen(PenState::Up), idx);
        push(&mut plan, encoder.move_to(waypoints[0]), idx);
        push(&mut plan, encoder.set_pen(PenState::Down), idx);
        for &wp in &waypoints[1..] {
            push(&mut plan, encoder.move_to(wp), idx);
        }
        push(&mut plan, encoder.set_pen(PenState::Up), idx);
    }

    // Abschluss: Stift sicher oben (bei leerer Zeichnung der einzige
    // Befehl), Park-Fahrt nur wenn überhaupt Bewegung stattfand.
    push(&mut plan, encoder.set_pen(PenState::Up), None);
    if let Some(park) = options.park_position {
        let has_motion = plan.iter().any(|p| p.command.is_motion());
        if has_motion {
            push(&mut plan, encoder.move_to(park), None);
        }
    }

    (plan, skipped)
}
