//! Geräte-Befehle und ihr textuelles Wire-Format.
//!
//! Das Gerät spricht zeilenorientiertes G-Code-Subset: eine Befehlszeile,
//! eine Antwortzeile. Ausgehende Zeilen enden mit `\r\n\0`, Antworten
//! sind NUL-terminiert. Eine Antwort, die mit `ok` beginnt, bestätigt
//! den Befehl; jeder andere Inhalt ist ein Geräte-Fehler.

/// Abschluss jeder ausgehenden Befehlszeile.
pub const WIRE_TERMINATOR: &[u8] = b"\r\n\x00";
/// Rahmen-Ende eingehender Antworten.
pub const FRAME_DELIMITER: u8 = 0x00;
/// Präfix einer Bestätigungs-Antwort.
pub const ACK_TOKEN: &str = "ok";
/// Kopfzeile für G-Code-Dateiausgabe (Koordinatensystem-Setup).
pub const GCODE_FILE_HEADER: &str = "G54 X0 Y0 S1";

/// Ein diskreter Befehl an das Gerät.
///
/// Befehle werden in strikter Plot-Reihenfolge erzeugt und müssen in
/// derselben Reihenfolge gesendet werden — das Protokoll kennt weder
/// Umordnung noch Batching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fahrt zur Zielposition (Maschinenkoordinaten, ganzzahlig)
    MoveTo { x: i32, y: i32 },
    /// Stift heben
    PenUp,
    /// Stift absenken
    PenDown,
}

impl Command {
    /// Serialisiert den Befehl als G-Code-Zeile (ohne Terminator).
    ///
    /// Der Stift hängt an der Z-Achse; die Z-Positionen für gehoben
    /// und abgesenkt sind gerätespezifisch konfigurierbar.
    pub fn wire_line(&self, pen_up_z: i32, pen_down_z: i32) -> String {
        match *self {
            Command::MoveTo { x, y } => format!("G00 X{} Y{}", x, y),
            Command::PenUp => format!("G00 Z{}", pen_up_z),
            Command::PenDown => format!("G00 Z{}", pen_down_z),
        }
    }

    /// Bewegt der Befehl die XY-Achsen?
    pub fn is_motion(&self) -> bool {
        matches!(self, Command::MoveTo { .. })
    }

    /// Hebt oder senkt der Befehl den Stift?
    pub fn is_pen(&self) -> bool {
        matches!(self, Command::PenUp | Command::PenDown)
    }
}
