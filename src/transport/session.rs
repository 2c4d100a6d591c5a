//! TCP-Session zum Gerät mit Send/Ack-Zustandsmaschine.
//!
//! Das Gerät akzeptiert genau einen Befehl gleichzeitig, führt ihn aus
//! und bestätigt dann mit einer `ok`-Zeile. Die Session erzwingt diese
//! Ein-Befehl-Disziplin: `send` blockiert bis zur Bestätigung, und nach
//! jedem Fehler ist die Session terminal im Fault-Zustand — nur ein
//! frischer `connect` (neue Session) kann das Gerät wieder ansprechen.

use super::error::{SendError, TransportError};
use super::CommandSink;
use crate::protocol::{Command, ACK_TOKEN, FRAME_DELIMITER, WIRE_TERMINATOR};
use crate::shared::PlotOptions;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Zustand der Session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Verbunden, bereit für den nächsten Befehl
    Idle,
    /// Befehl übertragen, Bestätigung steht aus
    AwaitingAck,
    /// Terminal: Gerätezustand unbekannt, Senden verweigert
    Faulted,
}

/// Geräte-Identifikation aus der `hello`-Begrüßung.
///
/// Das Gerät meldet sich nach dem Verbindungsaufbau mit einer Zeile wie
/// `hello VERSION:3.0 SERIAL:123456`.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// Firmware-Version (`VERSION`-Feld)
    pub version: Option<String>,
    /// Seriennummer (`SERIAL`-Feld)
    pub serial: Option<String>,
    /// Unveränderte Begrüßungszeile
    pub raw: String,
}

impl DeviceInfo {
    /// Parst die Begrüßungszeile. `None` wenn sie nicht mit `hello` beginnt.
    pub fn parse(greeting: &str) -> Option<Self> {
        let mut words = greeting.split_whitespace();
        if words.next() != Some("hello") {
            return None;
        }

        let mut version = None;
        let mut serial = None;
        for field in words {
            if let Some((key, value)) = field.split_once(':') {
                match key {
                    "VERSION" => version = Some(value.to_string()),
                    "SERIAL" => serial = Some(value.to_string()),
                    _ => {}
                }
            }
        }

        Some(Self {
            version,
            serial,
            raw: greeting.to_string(),
        })
    }

    /// Kurzbeschreibung für Log und CLI.
    pub fn describe(&self) -> String {
        format!(
            "Version: {}, Serial: {}",
            self.version.as_deref().unwrap_or("?"),
            self.serial.as_deref().unwrap_or("?")
        )
    }
}

/// Liest einen NUL-terminierten Protokollrahmen.
///
/// Gibt den Rahmeninhalt ohne Delimiter und ohne umgebenden Whitespace
/// zurück. Stream-Ende vor dem Delimiter gilt als Verbindungsabbruch.
pub(crate) fn read_frame<R: BufRead>(
    reader: &mut R,
    timeout_ms: u64,
) -> Result<String, TransportError> {
    let mut buf = Vec::new();
    match reader.read_until(FRAME_DELIMITER, &mut buf) {
        Ok(0) => Err(TransportError::Disconnected),
        Ok(_) => {
            if buf.last() == Some(&FRAME_DELIMITER) {
                buf.pop();
            } else {
                // Stream endete mitten im Rahmen
                return Err(TransportError::Disconnected);
            }
            match String::from_utf8(buf) {
                Ok(text) => Ok(text.trim().to_string()),
                Err(e) => Err(TransportError::MalformedResponse {
                    response: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                }),
            }
        }
        Err(e) => Err(classify_io(e, timeout_ms)),
    }
}

/// Ordnet E/A-Fehler der Transport-Taxonomie zu.
fn classify_io(e: std::io::Error, timeout_ms: u64) -> TransportError {
    use std::io::ErrorKind;
    match e.kind() {
        ErrorKind::WouldBlock | ErrorKind::TimedOut => TransportError::Timeout { timeout_ms },
        ErrorKind::BrokenPipe
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::UnexpectedEof => TransportError::Disconnected,
        _ => TransportError::Io(e),
    }
}

/// Exklusiv besessene TCP-Verbindung zum Gerät.
#[derive(Debug)]
pub struct TcpSession {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    state: SessionState,
    info: DeviceInfo,
    pen_up_z: i32,
    pen_down_z: i32,
    timeout_ms: u64,
}

impl TcpSession {
    /// Baut die Verbindung auf und liest die Geräte-Begrüßung.
    ///
    /// Der Ack-Timeout begrenzt auch den Verbindungsaufbau und jede
    /// Schreiboperation — ein unerreichbarer Host hängt nicht bis zum
    /// Betriebssystem-Default.
    pub fn connect(host: &str, port: u16, options: &PlotOptions) -> Result<Self, TransportError> {
        let addr = format!("{}:{}", host, port);
        let timeout = Duration::from_millis(options.ack_timeout_ms);

        let resolved = addr.as_str().to_socket_addrs().map_err(|e| {
            TransportError::ConnectionRefused {
                addr: addr.clone(),
                source: e,
            }
        })?;

        let mut last_err: Option<std::io::Error> = None;
        let mut connected = None;
        for sock_addr in resolved {
            match TcpStream::connect_timeout(&sock_addr, timeout) {
                Ok(s) => {
                    connected = Some(s);
                    break;
                }
                Err(e) => last_err = Some(e),
            }
        }

        let stream = match connected {
            Some(s) => s,
            None => {
                let e = last_err.unwrap_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::AddrNotAvailable,
                        "Hostname hat keine Adressen",
                    )
                });
                return Err(if e.kind() == std::io::ErrorKind::ConnectionRefused {
                    TransportError::ConnectionRefused { addr, source: e }
                } else {
                    classify_io(e, options.ack_timeout_ms)
                });
            }
        };

        stream
            .set_read_timeout(Some(timeout))
            .map_err(TransportError::Io)?;
        stream
            .set_write_timeout(Some(timeout))
            .map_err(TransportError::Io)?;
        stream.set_nodelay(true).map_err(TransportError::Io)?;
        let reader = BufReader::new(stream.try_clone().map_err(TransportError::Io)?);

        let mut session = Self {
            stream,
            reader,
            state: SessionState::Idle,
            info: DeviceInfo {
                version: None,
                serial: None,
                raw: String::new(),
            },
            pen_up_z: options.pen_up_z,
            pen_down_z: options.pen_down_z,
            timeout_ms: options.ack_timeout_ms,
        };

        let greeting = read_frame(&mut session.reader, session.timeout_ms)?;
        session.info = DeviceInfo::parse(&greeting)
            .ok_or(TransportError::MalformedResponse { response: greeting })?;
        log::info!("Verbunden mit {} ({})", addr, session.info.describe());

        Ok(session)
    }

    /// Geräte-Identifikation aus der Begrüßung.
    pub fn device_info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Aktueller Session-Zustand.
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn write_frame(&mut self, line: &str) -> Result<(), TransportError> {
        let timeout_ms = self.timeout_ms;
        self.stream
            .write_all(line.as_bytes())
            .and_then(|_| self.stream.write_all(WIRE_TERMINATOR))
            .and_then(|_| self.stream.flush())
            .map_err(|e| classify_io(e, timeout_ms))
    }
}

impl CommandSink for TcpSession {
    /// Sendet einen Befehl und blockiert bis zur Bestätigung.
    fn send(&mut self, command: &Command) -> Result<(), SendError> {
        if self.state != SessionState::Idle {
            return Err(TransportError::SessionFaulted.into());
        }

        let line = command.wire_line(self.pen_up_z, self.pen_down_z);
        self.state = SessionState::AwaitingAck;

        let response = self
            .write_frame(&line)
            .and_then(|_| read_frame(&mut self.reader, self.timeout_ms));

        match response {
            Ok(response) if response.starts_with(ACK_TOKEN) => {
                log::debug!("{} -> {}", line, response);
                self.state = SessionState::Idle;
                Ok(())
            }
            Ok(response) => {
                log::error!("{} -> Gerätefehler: {:?}", line, response);
                self.state = SessionState::Faulted;
                Err(SendError::DeviceFault { response })
            }
            Err(e) => {
                log::error!("{} -> Transportfehler: {}", line, e);
                self.state = SessionState::Faulted;
                Err(e.into())
            }
        }
    }
}
