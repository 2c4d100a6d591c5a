//! Fehler-Klassifikation des Transport-Layers.

use thiserror::Error;

/// Verbindungs- und Protokollrahmen-Fehler.
///
/// Jeder dieser Fehler versetzt die Session in den terminalen
/// Fault-Zustand: der Pufferzustand des Geräts ist danach unbekannt,
/// ein erneutes Senden könnte Bewegungen doppelt ausführen.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Das Gerät hat den Verbindungsaufbau abgelehnt.
    #[error("Verbindung zu {addr} abgelehnt: {source}")]
    ConnectionRefused {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    /// Keine Bestätigung innerhalb des Timeouts.
    #[error("keine Bestätigung innerhalb von {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
    /// Antwort war kein gültiger Protokollrahmen (z.B. kein UTF-8).
    #[error("unlesbare Antwort vom Gerät: {response:?}")]
    MalformedResponse { response: String },
    /// Das Gerät hat die Verbindung unerwartet beendet.
    #[error("Verbindung vom Gerät getrennt")]
    Disconnected,
    /// Die Session war bereits im Fault-Zustand.
    #[error("Session ist im Fault-Zustand, Senden nicht mehr erlaubt")]
    SessionFaulted,
    /// Sonstiger E/A-Fehler.
    #[error("E/A-Fehler: {0}")]
    Io(#[source] std::io::Error),
}

/// Fehler beim Senden eines einzelnen Befehls.
#[derive(Debug, Error)]
pub enum SendError {
    /// Verbindungsfehler (Timeout, Abbruch, unlesbarer Rahmen).
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Das Gerät hat den Befehl explizit mit einer Fehlerzeile beantwortet.
    #[error("Gerät meldet Fehler: {response:?}")]
    DeviceFault { response: String },
}
