//! Line-us Plot-Treiber Library.
//!
//! Wandelt Vektor-Zeichnungen (Linien- und Bézier-Segmente in
//! Maschinenkoordinaten) in einen G-Code-Befehlsstrom und streamt ihn
//! über TCP an den Line-us Zeichenroboter. Das Gerät akzeptiert genau
//! einen Befehl gleichzeitig und bestätigt jeden mit einer `ok`-Zeile;
//! der Treiber erzwingt diese Disziplin strikt.
//!
//! Schichten:
//! - `geometry`  — Zeichnungsmodell und Kurven-Flattening
//! - `protocol`  — Befehlsmodell, Wire-Format und Encoder
//! - `transport` — TCP-Session mit Send/Ack-Zustandsmaschine, Datei-Sink
//! - `driver`    — Orchestrierung: Planen, Streamen, Abbruch, Fortschritt
//! - `shared`    — Laufzeit-Optionen und Konstanten

pub mod driver;
pub mod geometry;
pub mod protocol;
pub mod shared;
pub mod transport;

pub use driver::{
    CancelFlag, PlotDriver, PlotError, PlotOutcome, PlotProgress, PlotReport, SkippedPath,
};
pub use geometry::{flatten_path, Drawing, GeometryError, Path, Segment};
pub use protocol::{Command, CommandEncoder, PenState};
pub use shared::PlotOptions;
pub use transport::{
    CommandSink, DeviceInfo, GcodeFileSink, SendError, SessionState, TcpSession, TransportError,
};
