//! Abbruch-Signal und Fortschrittszähler für laufende Plots.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Kooperatives Abbruch-Signal.
///
/// Der Aufrufer setzt das Flag von einem beliebigen Thread; der Treiber
/// prüft es ausschließlich zwischen zwei Befehlen — ein bereits an die
/// Session übergebener Befehl durchläuft seinen Send/Ack-Zyklus immer
/// vollständig.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Erstellt ein nicht gesetztes Abbruch-Signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fordert den Abbruch an.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Wurde der Abbruch angefordert?
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fortschritt eines Plot-Durchlaufs: gesendete vs. geplante Befehle.
///
/// Die Gesamtzahl steht erst nach dem Abflachen aller Pfade fest, da
/// die Segmentanzahl der Kurvenunterteilung koordinatenabhängig ist.
#[derive(Debug, Default)]
pub struct PlotProgress {
    sent: AtomicUsize,
    total: AtomicUsize,
}

impl PlotProgress {
    pub(crate) fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
    }

    pub(crate) fn record_sent(&self) {
        self.sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Anzahl bereits bestätigter Befehle.
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }

    /// Geplante Gesamtanzahl (0 solange die Planung läuft).
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Fortschritt als Anteil in [0, 1].
    pub fn fraction(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.sent() as f32 / total as f32
        }
    }
}
