//! Protokoll-Layer: Befehlsmodell, Wire-Format und Encoder.
//!
//! Reine Datenverarbeitung ohne I/O — der Transport-Layer übernimmt
//! das eigentliche Senden.

pub mod command;
pub mod encoder;

pub use command::{Command, ACK_TOKEN, FRAME_DELIMITER, GCODE_FILE_HEADER, WIRE_TERMINATOR};
pub use encoder::{round_half_away, CommandEncoder, PenState};

#[cfg(test)]
mod tests;
