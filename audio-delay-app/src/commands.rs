use std::str::FromStr;

use audio_delay_core::{DelaySession, MediaHost, SessionError};

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Devices,
    Select(String),
    Delay(f64),
    Nudge(i32),
    Record,
    Stop,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "devices" | "refresh" | "detect" => Ok(Self::Devices),
            "select" | "use" if !rest.is_empty() => Ok(Self::Select(rest.to_string())),
            "select" | "use" => Err("usage: select <number|id>".into()),
            "delay" => rest
                .trim_end_matches('s')
                .parse::<f64>()
                .map(Self::Delay)
                .map_err(|_| "usage: delay <seconds>".to_string()),
            "+" => Ok(Self::Nudge(1)),
            "-" => Ok(Self::Nudge(-1)),
            "record" | "start" | "r" => Ok(Self::Record),
            "stop" | "s" => Ok(Self::Stop),
            "status" | "" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

pub const HELP: &str = "\
Commands:
  devices            detect or refresh input devices
  select <n|id>      choose a device by list number or id (stops recording)
  delay <seconds>    set the playback delay (only while not recording)
  + / -              nudge the delay by one step
  record             start recording and delayed playback
  stop               stop recording
  status             show the current state
  quit               stop and exit
";

/// What the prompt loop should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue(Option<String>),
    Quit,
}

/// Apply `command` to the session.
pub fn execute<H: MediaHost>(
    session: &mut DelaySession<H>,
    command: Command,
) -> Result<Outcome, SessionError> {
    let message = match command {
        Command::Devices => {
            let count = session.refresh_devices()?.len();
            Some(format!("{count} input device(s) detected"))
        }
        Command::Select(target) => {
            let device_id = resolve_device(session, &target);
            let stopped = session.switch_device(&device_id)?;
            Some(match stopped {
                Some(summary) => format!(
                    "Stopped recording from {}; selected {}",
                    summary.device_id, device_id
                ),
                None => format!("Selected {device_id}"),
            })
        }
        Command::Delay(secs) => {
            let value = session.set_delay(secs)?;
            Some(format!("Delay set to {value:.1}s"))
        }
        Command::Nudge(steps) => {
            let value = session.nudge_delay(steps)?;
            Some(format!("Delay set to {value:.1}s"))
        }
        Command::Record => {
            let active = session.start()?;
            Some(format!(
                "Recording from {} with {:.1}s delay",
                active.handle.device_id, active.delay_secs
            ))
        }
        Command::Stop => Some(match session.stop() {
            Some(summary) => format!("Stopped after {:.1}s", summary.duration_secs),
            None => "Not recording".to_string(),
        }),
        Command::Status => None,
        Command::Help => Some(HELP.trim_end().to_string()),
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Continue(message))
}

/// Map a 1-based list number to a device id; anything else is taken as an id.
fn resolve_device<H: MediaHost>(session: &DelaySession<H>, target: &str) -> String {
    target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| session.devices().get(i))
        .map(|d| d.id.clone())
        .unwrap_or_else(|| target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use audio_delay_core::{SessionConfiguration, SimulatedHost};

    fn ready() -> DelaySession<SimulatedHost> {
        let mut session =
            DelaySession::new(SimulatedHost::demo(), SessionConfiguration::default()).unwrap();
        session.probe();
        session
    }

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!("devices".parse(), Ok(Command::Devices));
        assert_eq!("  select  2 ".parse(), Ok(Command::Select("2".into())));
        assert_eq!("select USB Mic".parse(), Ok(Command::Select("USB Mic".into())));
        assert_eq!("delay 1.5".parse(), Ok(Command::Delay(1.5)));
        assert_eq!("delay 2s".parse(), Ok(Command::Delay(2.0)));
        assert_eq!("+".parse(), Ok(Command::Nudge(1)));
        assert_eq!("record".parse(), Ok(Command::Record));
        assert_eq!("".parse(), Ok(Command::Status));
        assert_eq!("q".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!("select".parse::<Command>().is_err());
        assert!("delay soon".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().unwrap_err().contains("unknown command"));
    }

    #[test]
    fn select_accepts_list_number_or_id() {
        let mut session = ready();
        execute(&mut session, Command::Devices).unwrap();

        execute(&mut session, Command::Select("3".into())).unwrap();
        assert_eq!(session.selected_device_id(), Some("mic-2"));

        execute(&mut session, Command::Select("mic-1".into())).unwrap();
        assert_eq!(session.selected_device_id(), Some("mic-1"));
    }

    #[test]
    fn record_without_selection_reports_missing_device() {
        let mut session = ready();
        execute(&mut session, Command::Devices).unwrap();
        assert_eq!(
            execute(&mut session, Command::Record),
            Err(SessionError::MissingDevice)
        );
    }

    #[test]
    fn record_stop_round() {
        let mut session = ready();
        execute(&mut session, Command::Devices).unwrap();
        execute(&mut session, Command::Select("mic-2".into())).unwrap();
        execute(&mut session, Command::Delay(1.5)).unwrap();

        let started = execute(&mut session, Command::Record).unwrap();
        assert_eq!(
            started,
            Outcome::Continue(Some("Recording from mic-2 with 1.5s delay".into()))
        );
        assert_eq!(
            execute(&mut session, Command::Nudge(1)),
            Err(SessionError::DelayLocked)
        );

        let stopped = execute(&mut session, Command::Stop).unwrap();
        assert!(matches!(stopped, Outcome::Continue(Some(m)) if m.starts_with("Stopped after")));
        assert_eq!(
            execute(&mut session, Command::Stop).unwrap(),
            Outcome::Continue(Some("Not recording".into()))
        );
        assert_eq!(execute(&mut session, Command::Quit).unwrap(), Outcome::Quit);
    }
}
