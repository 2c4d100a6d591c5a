//! Kurven-Flattening: wandelt Pfade in Wegpunktlisten um.
//!
//! Kurvensegmente werden per de-Casteljau-Bisektion rekursiv unterteilt,
//! bis die Steuerpunkte innerhalb der Toleranz an der Sehne liegen.
//! Erster und letzter Wegpunkt entsprechen exakt den Pfad-Endpunkten.

use super::drawing::{Path, Segment};
use crate::shared::MAX_SUBDIVISION_DEPTH;
use glam::Vec2;
use thiserror::Error;

/// Fehler in der Eingabe-Geometrie eines einzelnen Pfads.
///
/// Wird pro Pfad behandelt: der betroffene Pfad wird übersprungen,
/// die restliche Zeichnung läuft weiter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Mindestens ein Stützpunkt ist NaN oder unendlich.
    #[error("Pfad enthält nicht-endliche Koordinaten")]
    NonFinite,
    /// Ein Wegpunkt liegt außerhalb des Arbeitsbereichs des Geräts.
    #[error("Wegpunkt ({x:.1}, {y:.1}) liegt außerhalb des Arbeitsbereichs")]
    OutsideEnvelope { x: f32, y: f32 },
}

/// Flacht einen Pfad zu einer Wegpunktliste innerhalb `tolerance` ab.
///
/// - Linien-Segmente werden unverändert übernommen.
/// - Kurven werden unterteilt, bis jeder Kurvenpunkt höchstens
///   `tolerance` Maschineneinheiten von der Polylinie entfernt liegt.
/// - Null-Länge-Segmente kollabieren (keine doppelten Wegpunkte).
/// - Leerer Pfad → leere Liste; vollständig degenerierter Pfad →
///   genau ein Wegpunkt (Punkt-Zeichnung).
pub fn flatten_path(path: &Path, tolerance: f32) -> Result<Vec<Vec2>, GeometryError> {
    let tolerance = tolerance.max(f32::EPSILON);
    let mut waypoints: Vec<Vec2> = Vec::new();

    for segment in &path.segments {
        if !segment.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        push_waypoint(&mut waypoints, segment.from());

        match *segment {
            Segment::Line { .. } => {}
            Segment::Quadratic { from, control, to } => {
                let (c1, c2) = elevate_quadratic(from, control, to);
                flatten_cubic(
                    from,
                    c1,
                    c2,
                    to,
                    tolerance,
                    MAX_SUBDIVISION_DEPTH,
                    &mut waypoints,
                );
            }
            Segment::Cubic {
                from,
                control1,
                control2,
                to,
            } => {
                flatten_cubic(
                    from,
                    control1,
                    control2,
                    to,
                    tolerance,
                    MAX_SUBDIVISION_DEPTH,
                    &mut waypoints,
                );
            }
        }

        push_waypoint(&mut waypoints, segment.to());
    }

    if path.closed {
        if let Some(&first) = waypoints.first() {
            push_waypoint(&mut waypoints, first);
        }
    }

    Ok(waypoints)
}

/// Prüft Wegpunkte gegen den Arbeitsbereich.
///
/// Punkte außerhalb sind ein Aufruffehler und ergeben `OutsideEnvelope` —
/// außer `clamp` ist gesetzt, dann werden sie in den Bereich geclampt.
pub fn enforce_envelope(
    waypoints: &mut [Vec2],
    min: Vec2,
    max: Vec2,
    clamp: bool,
) -> Result<(), GeometryError> {
    for wp in waypoints.iter_mut() {
        let inside = wp.x >= min.x && wp.x <= max.x && wp.y >= min.y && wp.y <= max.y;
        if inside {
            continue;
        }
        if clamp {
            *wp = wp.clamp(min, max);
        } else {
            return Err(GeometryError::OutsideEnvelope { x: wp.x, y: wp.y });
        }
    }
    Ok(())
}

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub(crate) fn cubic_point(p0: Vec2, c1: Vec2, c2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * c1 + 3.0 * inv * t2 * c2 + t2 * t * p3
}

/// Hängt `p` an, außer der letzte Wegpunkt ist identisch.
fn push_waypoint(waypoints: &mut Vec<Vec2>, p: Vec2) {
    if waypoints.last() != Some(&p) {
        waypoints.push(p);
    }
}

/// Gradanhebung: quadratische Bézier als exakt gleiche kubische.
fn elevate_quadratic(p0: Vec2, control: Vec2, p2: Vec2) -> (Vec2, Vec2) {
    let c1 = p0 + (control - p0) * (2.0 / 3.0);
    let c2 = p2 + (control - p2) * (2.0 / 3.0);
    (c1, c2)
}

/// Rekursive Bisektion einer kubischen Bézier-Kurve.
///
/// Gibt die inneren Wegpunkte aus; `p0` ist bereits ausgegeben und
/// `p3` gibt der Aufrufer aus. Bei `depth == 0` wird die Sehne
/// direkt übernommen (Terminierungs-Garantie für degenerierte Kurven).
fn flatten_cubic(
    p0: Vec2,
    c1: Vec2,
    c2: Vec2,
    p3: Vec2,
    tolerance: f32,
    depth: u32,
    waypoints: &mut Vec<Vec2>,
) {
    if depth == 0 || is_flat(p0, c1, c2, p3, tolerance) {
        return;
    }

    let (left, right) = split_cubic(p0, c1, c2, p3);
    flatten_cubic(
        left[0], left[1], left[2], left[3], tolerance, depth - 1, waypoints,
    );
    push_waypoint(waypoints, left[3]);
    flatten_cubic(
        right[0], right[1], right[2], right[3], tolerance, depth - 1, waypoints,
    );
}

/// Flachheits-Kriterium: maximale Distanz der Steuerpunkte zur Sehne.
///
/// Die konvexe Hülle der Steuerpunkte umschließt die Kurve, daher
/// begrenzt dieser Wert auch die echte Kurvenabweichung.
fn is_flat(p0: Vec2, c1: Vec2, c2: Vec2, p3: Vec2, tolerance: f32) -> bool {
    let d1 = point_segment_distance(c1, p0, p3);
    let d2 = point_segment_distance(c2, p0, p3);
    d1.max(d2) <= tolerance
}

/// Distanz eines Punkts zur Strecke `a`–`b` (Projektion geclampt).
pub(crate) fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// De-Casteljau-Split bei t = 0.5.
fn split_cubic(p0: Vec2, c1: Vec2, c2: Vec2, p3: Vec2) -> ([Vec2; 4], [Vec2; 4]) {
    let m01 = (p0 + c1) * 0.5;
    let m12 = (c1 + c2) * 0.5;
    let m23 = (c2 + p3) * 0.5;
    let m012 = (m01 + m12) * 0.5;
    let m123 = (m12 + m23) * 0.5;
    let mid = (m012 + m123) * 0.5;
    ([p0, m01, m012, mid], [mid, m123, m23, p3])
}
