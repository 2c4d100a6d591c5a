//! Datenmodell einer Zeichnung: Segmente, Pfade, Zeichnung.

use glam::Vec2;

/// Ein Pfadsegment mit allen Stützpunkten in Maschinenkoordinaten.
///
/// Aufeinanderfolgende Segmente eines Pfads teilen sich ihre Endpunkte
/// (`to` des Vorgängers = `from` des Nachfolgers).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Gerade Strecke zwischen zwei Punkten
    Line { from: Vec2, to: Vec2 },
    /// Quadratische Bézier-Kurve (ein Steuerpunkt)
    Quadratic { from: Vec2, control: Vec2, to: Vec2 },
    /// Kubische Bézier-Kurve (zwei Steuerpunkte)
    Cubic {
        from: Vec2,
        control1: Vec2,
        control2: Vec2,
        to: Vec2,
    },
}

impl Segment {
    /// Startpunkt des Segments.
    pub fn from(&self) -> Vec2 {
        match *self {
            Segment::Line { from, .. }
            | Segment::Quadratic { from, .. }
            | Segment::Cubic { from, .. } => from,
        }
    }

    /// Endpunkt des Segments.
    pub fn to(&self) -> Vec2 {
        match *self {
            Segment::Line { to, .. } | Segment::Quadratic { to, .. } | Segment::Cubic { to, .. } => {
                to
            }
        }
    }

    /// Prüft alle Stützpunkte auf endliche Koordinaten.
    pub fn is_finite(&self) -> bool {
        match *self {
            Segment::Line { from, to } => from.is_finite() && to.is_finite(),
            Segment::Quadratic { from, control, to } => {
                from.is_finite() && control.is_finite() && to.is_finite()
            }
            Segment::Cubic {
                from,
                control1,
                control2,
                to,
            } => from.is_finite() && control1.is_finite() && control2.is_finite() && to.is_finite(),
        }
    }
}

/// Ein Pfad: geordnete Segmentfolge mit zusammenhängenden Endpunkten.
///
/// `closed` schließt den Pfad implizit zurück zum ersten Punkt,
/// ohne dass ein explizites Schluss-Segment nötig ist.
#[derive(Debug, Clone, Default)]
pub struct Path {
    /// Segmente in Zeichenreihenfolge
    pub segments: Vec<Segment>,
    /// Pfad implizit geschlossen (zurück zum Startpunkt)
    pub closed: bool,
}

impl Path {
    /// Erstellt einen Pfad aus Segmenten.
    pub fn new(segments: Vec<Segment>, closed: bool) -> Self {
        Self { segments, closed }
    }

    /// Erstellt einen reinen Linienpfad durch die gegebenen Punkte.
    pub fn polyline(points: &[Vec2], closed: bool) -> Self {
        let segments = points
            .windows(2)
            .map(|w| Segment::Line {
                from: w[0],
                to: w[1],
            })
            .collect();
        Self { segments, closed }
    }

    /// Pfad ohne Segmente (erzeugt keine Wegpunkte).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Eine Zeichnung: geordnete Pfadfolge.
///
/// Die Reihenfolge ist signifikant — sie bestimmt die physische
/// Reihenfolge der Stiftstriche.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    /// Pfade in Plot-Reihenfolge
    pub paths: Vec<Path>,
}

impl Drawing {
    /// Erstellt eine leere Zeichnung.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der Pfade.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }
}
