//! Geometrie-Layer: Zeichnungsmodell und Kurven-Flattening.
//!
//! Alle Koordinaten liegen bereits in Maschineneinheiten vor;
//! dieser Layer führt keine Einheiten-Umrechnung durch.

pub mod drawing;
pub mod flatten;

pub use drawing::{Drawing, Path, Segment};
pub use flatten::{enforce_envelope, flatten_path, GeometryError};
