//! G-Code-Dateiausgabe: derselbe Befehlsstrom, aber in eine Datei.
//!
//! Alternative Senke für den Betrieb ohne Gerät — die Datei kann später
//! manuell übertragen oder inspiziert werden. Keine Bestätigungen.

use super::error::{SendError, TransportError};
use super::CommandSink;
use crate::protocol::{Command, GCODE_FILE_HEADER};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Schreibt Befehle zeilenweise als G-Code-Datei.
pub struct GcodeFileSink {
    writer: BufWriter<File>,
    pen_up_z: i32,
    pen_down_z: i32,
}

impl GcodeFileSink {
    /// Legt die Datei an und schreibt die Kopfzeile.
    pub fn create(path: &Path, pen_up_z: i32, pen_down_z: i32) -> Result<Self, TransportError> {
        let file = File::create(path).map_err(TransportError::Io)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", GCODE_FILE_HEADER).map_err(TransportError::Io)?;
        log::info!("G-Code-Ausgabe nach: {}", path.display());

        Ok(Self {
            writer,
            pen_up_z,
            pen_down_z,
        })
    }
}

impl CommandSink for GcodeFileSink {
    fn send(&mut self, command: &Command) -> Result<(), SendError> {
        let line = command.wire_line(self.pen_up_z, self.pen_down_z);
        writeln!(self.writer, "{}", line)
            .map_err(|e| SendError::Transport(TransportError::Io(e)))
    }

    fn finish(&mut self) -> Result<(), SendError> {
        self.writer
            .flush()
            .map_err(|e| SendError::Transport(TransportError::Io(e)))
    }
}
