use std::io::{BufRead, Write};

use audio_delay_core::{DelaySession, MediaHost};

use crate::commands::{self, Command, Outcome};
use crate::view;

/// Interactive prompt loop: render, read a command, apply it, repeat.
///
/// Ends on `quit` or end of input. Any active stream is stopped on the way out.
pub fn run<H, R, W>(session: &mut DelaySession<H>, input: R, out: &mut W) -> anyhow::Result<()>
where
    H: MediaHost,
    R: BufRead,
    W: Write,
{
    write!(out, "{}", view::render(session))?;
    if !session.capability().is_supported() {
        return Ok(());
    }
    writeln!(out, "Type `help` for commands.")?;

    for line in input.lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        match commands::execute(session, command) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue(message)) => {
                if let Some(message) = message {
                    writeln!(out, "{}", message)?;
                }
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        write!(out, "\n{}", view::render(session))?;
        out.flush()?;
    }

    if let Some(summary) = session.stop() {
        writeln!(out, "Stopped recording from {}", summary.device_id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use audio_delay_core::{HostCall, SessionConfiguration, SimulatedHost};

    fn run_script(host: SimulatedHost, script: &str) -> (String, Vec<HostCall>) {
        let journal = host.journal();
        let mut session = DelaySession::new(host, SessionConfiguration::default()).unwrap();
        session.probe();
        let mut out = Vec::new();
        run(&mut session, script.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), journal.calls())
    }

    #[test]
    fn unsupported_host_exits_after_status() {
        let (out, calls) = run_script(SimulatedHost::demo().without_audio_processing(), "devices\n");
        assert_eq!(
            out,
            "Unsupported: The audio features required are not found on this host.\n"
        );
        assert!(calls.is_empty());
    }

    #[test]
    fn scripted_session_records_and_stops() {
        let (out, calls) = run_script(
            SimulatedHost::demo(),
            "devices\nselect 3\ndelay 2\nrecord\ndelay 1\nstop\nquit\n",
        );

        assert!(out.contains("3 input device(s) detected"));
        assert!(out.contains("Selected mic-2"));
        assert!(out.contains("Recording from mic-2 with 2.0s delay"));
        assert!(out.contains("Error: delay cannot change while a capture stream is active"));
        assert!(out.contains("Stopped after"));
        assert!(calls.contains(&HostCall::BuildDelayGraph {
            device_id: "mic-2".into(),
            delay_secs: 2.0,
        }));
        assert_eq!(calls.last(), Some(&HostCall::StopTracks { device_id: "mic-2".into() }));
    }

    #[test]
    fn end_of_input_stops_active_stream() {
        let (out, calls) = run_script(SimulatedHost::demo(), "devices\nselect mic-1\nrecord\n");
        assert!(out.ends_with("Stopped recording from mic-1\n"));
        assert_eq!(calls.last(), Some(&HostCall::StopTracks { device_id: "mic-1".into() }));
    }

    #[test]
    fn bad_lines_do_not_end_the_loop() {
        let (out, _) = run_script(SimulatedHost::demo(), "dance\nrecord\nquit\n");
        assert!(out.contains("unknown command: dance"));
        assert!(out.contains("Error: missing capture device id"));
    }
}
