//! audio-delay - record from an input device and play it back after a delay
//!
//! Terminal front-end over `audio-delay-core`, with real devices through
//! `audio-delay-cpal` or the in-memory host with `--simulate`.

mod app;
mod cli;
mod commands;
mod delegate;
mod view;

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use log::info;

use audio_delay_core::{DelaySession, MediaHost, SimulatedHost};
use audio_delay_cpal::CpalHost;

use delegate::LogDelegate;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    cli::init_logging(&args);

    info!("Starting audio-delay");

    if args.simulate {
        launch(SimulatedHost::demo(), &args)
    } else {
        launch(CpalHost::default(), &args)
    }
}

fn launch<H: MediaHost>(host: H, args: &cli::Args) -> anyhow::Result<()> {
    let mut session =
        DelaySession::new(host, args.session_config()).context("invalid delay settings")?;
    session.set_delegate(LogDelegate::new());
    session.probe();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if session.capability().is_supported() && (args.list || args.device.is_some()) {
        session.refresh_devices()?;
    }

    if args.list {
        return print_devices(&session, args.json, &mut out);
    }

    if let Some(ref device_id) = args.device {
        if session.capability().is_supported() {
            session.switch_device(device_id)?;
            if args.record {
                session
                    .start()
                    .with_context(|| format!("could not start recording from {device_id}"))?;
            }
        }
    }

    let stdin = io::stdin();
    app::run(&mut session, stdin.lock(), &mut out)
}

fn print_devices<H: MediaHost, W: Write>(
    session: &DelaySession<H>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    if let Some(message) = session.capability().unsupported_message() {
        anyhow::bail!("{message}");
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, session.devices())?;
        writeln!(out)?;
    } else {
        for (i, device) in session.devices().iter().enumerate() {
            writeln!(out, "{}. {}\t{}", i + 1, device.label, device.id)?;
        }
    }
    Ok(())
}
