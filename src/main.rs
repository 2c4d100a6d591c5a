//! Line-us Plot-Treiber CLI.
//!
//! Manuelle Gerätesteuerung (Stift, Home, Firmware-Info) und ein
//! eingebautes Testmuster zum Prüfen von Verbindung und Kalibrierung.
//! Mit `--gcode-out` landet der Befehlsstrom in einer Datei statt
//! auf dem Gerät.

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec2;
use lineus_driver::shared::options::{DEVICE_DEFAULT_HOST, DEVICE_DEFAULT_PORT, HOME_POSITION};
use lineus_driver::{
    Command, CommandSink, Drawing, GcodeFileSink, Path, PlotDriver, PlotOptions, PlotReport,
    Segment, TcpSession,
};

#[derive(Parser)]
#[command(name = "lineus-plot", version, about = "Plot-Treiber für den Line-us Zeichenroboter")]
struct Cli {
    /// Hostname oder IP des Geräts
    #[arg(long, default_value = DEVICE_DEFAULT_HOST)]
    host: String,

    /// TCP-Port des Geräts
    #[arg(long, default_value_t = DEVICE_DEFAULT_PORT)]
    port: u16,

    /// Befehlsstrom als G-Code-Datei schreiben statt zu senden
    #[arg(long)]
    gcode_out: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Firmware-Version und Seriennummer abfragen
    Info,
    /// Stift heben
    PenUp,
    /// Stift senken
    PenDown,
    /// Zur Home-Position fahren
    Home,
    /// Eingebautes Testmuster plotten (Dreieck + Bogen)
    Pattern,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("lineus-plot v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let options = PlotOptions::load_from_file(&PlotOptions::config_path());

    match cli.command {
        CliCommand::Info => {
            let session = connect(&cli, &options)?;
            println!("{}", session.device_info().describe());
        }
        CliCommand::PenUp => send_single(&cli, &options, Command::PenUp)?,
        CliCommand::PenDown => send_single(&cli, &options, Command::PenDown)?,
        CliCommand::Home => send_single(
            &cli,
            &options,
            Command::MoveTo {
                x: HOME_POSITION.x as i32,
                y: HOME_POSITION.y as i32,
            },
        )?,
        CliCommand::Pattern => {
            let report = plot(&cli, &options, &test_pattern())?;
            println!(
                "Fertig: {}/{} Befehle gesendet, {} Pfade übersprungen",
                report.commands_sent,
                report.commands_total,
                report.skipped_paths.len()
            );
        }
    }

    Ok(())
}

fn connect(cli: &Cli, options: &PlotOptions) -> anyhow::Result<TcpSession> {
    TcpSession::connect(&cli.host, cli.port, options)
        .with_context(|| format!("Verbindung zu {}:{} fehlgeschlagen", cli.host, cli.port))
}

/// Sendet genau einen manuellen Befehl (immer Stift heben zum Schluss).
fn send_single(cli: &Cli, options: &PlotOptions, command: Command) -> anyhow::Result<()> {
    let mut session = connect(cli, options)?;
    session
        .send(&command)
        .with_context(|| format!("Befehl fehlgeschlagen: {:?}", command))?;
    Ok(())
}

/// Plottet die Zeichnung auf das Gerät oder in die G-Code-Datei.
fn plot(cli: &Cli, options: &PlotOptions, drawing: &Drawing) -> anyhow::Result<PlotReport> {
    if let Some(ref path) = cli.gcode_out {
        let sink = GcodeFileSink::create(path, options.pen_up_z, options.pen_down_z)
            .context("G-Code-Datei konnte nicht angelegt werden")?;
        Ok(PlotDriver::new(sink, options.clone()).run(drawing)?)
    } else {
        let session = connect(cli, options)?;
        Ok(PlotDriver::new(session, options.clone()).run(drawing)?)
    }
}

/// Testmuster: Dreieck und ein kubischer Bogen in der Blattmitte.
fn test_pattern() -> Drawing {
    let triangle = Path::polyline(
        &[
            Vec2::new(700.0, 700.0),
            Vec2::new(1300.0, 700.0),
            Vec2::new(1000.0, 1300.0),
        ],
        true,
    );

    let arc = Path::new(
        vec![Segment::Cubic {
            from: Vec2::new(700.0, 600.0),
            control1: Vec2::new(900.0, 400.0),
            control2: Vec2::new(1100.0, 400.0),
            to: Vec2::new(1300.0, 600.0),
        }],
        false,
    );

    Drawing {
        paths: vec![triangle, arc],
    }
}
