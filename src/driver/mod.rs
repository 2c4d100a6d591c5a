//! Treiber-Layer: orchestriert einen vollständigen Plot-Durchlauf.
//!
//! Der `PlotDriver` flacht die Zeichnung ab, kodiert den vollständigen
//! Befehlsplan und streamt ihn Befehl für Befehl durch eine
//! `CommandSink`. Abbruch und Fortschritt sind über geteilte,
//! thread-sichere Handles von außen beobachtbar.

pub mod plot;
pub mod progress;

pub use plot::{PlotDriver, PlotError, PlotOutcome, PlotReport, SkippedPath};
pub use progress::{CancelFlag, PlotProgress};

#[cfg(test)]
mod tests;
