//! Befehls-Encoder: Wegpunkte + Stiftzustand → Befehlsfolge.
//!
//! Zustandsbehaftet, aber rein (kein I/O): Stift-Befehle entstehen nur
//! bei Zustandswechseln, Fahrbefehle nur bei tatsächlicher Bewegung
//! nach Rundung auf Geräte-Ganzzahlen.

use super::command::Command;
use glam::Vec2;

/// Stiftzustand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenState {
    /// Stift gehoben
    Up,
    /// Stift auf der Zeichenfläche
    Down,
}

/// Rundet kaufmännisch vom Nullpunkt weg (0.5 → 1, -0.5 → -1).
pub fn round_half_away(v: f32) -> i32 {
    v.round() as i32
}

/// Erzeugt aus (Stiftzustand, Wegpunkt)-Paaren die minimale Befehlsfolge.
///
/// Startet mit unbekanntem Stiftzustand und unbekannter Position:
/// der erste `set_pen`- und der erste `move_to`-Aufruf erzeugen
/// daher immer einen Befehl.
#[derive(Debug, Clone, Default)]
pub struct CommandEncoder {
    pen: Option<PenState>,
    position: Option<(i32, i32)>,
}

impl CommandEncoder {
    /// Erstellt einen Encoder mit unbekanntem Geräte-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wechselt den Stiftzustand. `None` wenn bereits aktiv.
    pub fn set_pen(&mut self, pen: PenState) -> Option<Command> {
        if self.pen == Some(pen) {
            return None;
        }
        self.pen = Some(pen);
        Some(match pen {
            PenState::Up => Command::PenUp,
            PenState::Down => Command::PenDown,
        })
    }

    /// Fahrt zum Wegpunkt. `None` wenn das gerundete Ziel der
    /// aktuellen Position entspricht (No-Op-Fahrten werden verschmolzen).
    pub fn move_to(&mut self, target: Vec2) -> Option<Command> {
        let x = round_half_away(target.x);
        let y = round_half_away(target.y);
        if self.position == Some((x, y)) {
            return None;
        }
        self.position = Some((x, y));
        Some(Command::MoveTo { x, y })
    }

    /// Aktueller Stiftzustand (`None` = unbekannt).
    pub fn pen(&self) -> Option<PenState> {
        self.pen
    }
}
