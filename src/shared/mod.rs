//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen und alle Geräte-Konstanten, die
//! `geometry`, `transport` und `driver` gemeinsam verwenden.

pub mod options;

pub use options::PlotOptions;
pub use options::{ACK_TIMEOUT_MS, DEVICE_DEFAULT_HOST, DEVICE_DEFAULT_PORT, MAX_SUBDIVISION_DEPTH};
