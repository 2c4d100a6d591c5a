//! Transport-Layer: Befehls-Senken und die TCP-Session zum Gerät.
//!
//! `CommandSink` ist die Naht zwischen Plot-Treiber und Ausgabekanal:
//! die echte Geräte-Session, die G-Code-Dateiausgabe und Test-Mocks
//! implementieren dasselbe Interface.

pub mod error;
pub mod gcode_file;
pub mod session;

#[cfg(test)]
mod tests;

pub use error::{SendError, TransportError};
pub use gcode_file::GcodeFileSink;
pub use session::{DeviceInfo, SessionState, TcpSession};

use crate::protocol::Command;

/// Eine Senke für Geräte-Befehle.
///
/// `send` blockiert, bis der Befehl vollständig übertragen und — falls
/// das Medium Bestätigungen kennt — bestätigt wurde. Nach einem Fehler
/// darf die Senke keine weiteren Befehle mehr annehmen.
pub trait CommandSink {
    /// Überträgt genau einen Befehl und wartet auf dessen Abschluss.
    fn send(&mut self, command: &Command) -> Result<(), SendError>;

    /// Schließt die Senke ordentlich ab (z.B. Puffer leeren).
    fn finish(&mut self) -> Result<(), SendError> {
        Ok(())
    }
}
