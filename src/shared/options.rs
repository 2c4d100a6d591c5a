//! Zentrale Konfiguration für den Line-us Plot-Treiber.
//!
//! `PlotOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use glam::Vec2;
use serde::{Deserialize, Serialize};

// ── Gerät ───────────────────────────────────────────────────────────

/// Standard-Hostname des Geräts im lokalen Netz.
pub const DEVICE_DEFAULT_HOST: &str = "line-us.local";
/// Fester TCP-Port des Geräts.
pub const DEVICE_DEFAULT_PORT: u16 = 1337;
/// Timeout für die Befehlsbestätigung in Millisekunden.
/// Muss die maximale physische Stiftfahrzeit einer einzelnen Bewegung
/// übersteigen, sonst werden langsame Striche fälschlich als Fault gewertet.
pub const ACK_TIMEOUT_MS: u64 = 10_000;

// ── Arbeitsbereich ──────────────────────────────────────────────────

/// Untere Ecke des Arbeitsbereichs in Maschineneinheiten.
pub const ENVELOPE_MIN: Vec2 = Vec2::new(0.0, 0.0);
/// Obere Ecke des Arbeitsbereichs (eine Seiteneinheit = ein Motorschritt).
pub const ENVELOPE_MAX: Vec2 = Vec2::new(2000.0, 2000.0);
/// Home-Position für die optionale Park-Fahrt nach dem Plot.
pub const HOME_POSITION: Vec2 = Vec2::new(1000.0, 1000.0);

// ── Stift ───────────────────────────────────────────────────────────

/// Z-Position bei gehobenem Stift.
pub const PEN_UP_Z: i32 = 1000;
/// Z-Position bei abgesenktem Stift.
pub const PEN_DOWN_Z: i32 = 0;
/// Wartezeit nach Heben/Senken des Stifts in Millisekunden.
pub const PEN_DELAY_MS: u64 = 0;

// ── Flattening ──────────────────────────────────────────────────────

/// Maximale Abweichung der Polylinie von der Kurve in Maschineneinheiten.
pub const FLATTEN_TOLERANCE: f32 = 0.1;
/// Rekursionstiefen-Limit der Kurvenunterteilung. Begrenzt die
/// Segmentanzahl auf 2^n pro Kurve und terminiert degenerierte Kurven.
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Plot-Optionen.
/// Wird als `lineus_plot.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotOptions {
    // ── Flattening ──────────────────────────────────────────────
    /// Maximale Kurvenabweichung in Maschineneinheiten
    pub tolerance: f32,

    // ── Stift ───────────────────────────────────────────────────
    /// Z-Position bei gehobenem Stift
    pub pen_up_z: i32,
    /// Z-Position bei abgesenktem Stift
    pub pen_down_z: i32,
    /// Wartezeit nach Stift-Befehlen in Millisekunden
    #[serde(default)]
    pub pen_delay_ms: u64,

    // ── Transport ───────────────────────────────────────────────
    /// Timeout für Befehlsbestätigungen in Millisekunden
    pub ack_timeout_ms: u64,

    // ── Arbeitsbereich ──────────────────────────────────────────
    /// Untere Ecke des Arbeitsbereichs
    pub envelope_min: Vec2,
    /// Obere Ecke des Arbeitsbereichs
    pub envelope_max: Vec2,
    /// Wegpunkte außerhalb des Arbeitsbereichs in den Bereich clampen
    /// statt den Pfad als Geometriefehler zu überspringen
    #[serde(default)]
    pub clamp_to_envelope: bool,

    // ── Abschluss ───────────────────────────────────────────────
    /// Park-Position nach dem letzten Pfad (None = keine Park-Fahrt)
    #[serde(default)]
    pub park_position: Option<Vec2>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            tolerance: FLATTEN_TOLERANCE,
            pen_up_z: PEN_UP_Z,
            pen_down_z: PEN_DOWN_Z,
            pen_delay_ms: PEN_DELAY_MS,
            ack_timeout_ms: ACK_TIMEOUT_MS,
            envelope_min: ENVELOPE_MIN,
            envelope_max: ENVELOPE_MAX,
            clamp_to_envelope: false,
            park_position: None,
        }
    }
}

impl PlotOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("lineus-plot"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("lineus_plot.toml")
    }
}
