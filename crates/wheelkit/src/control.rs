use anyhow::Context;
use std::fmt;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/spinwheel.sock";

/// One line of the control socket protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Spin,
    Add(String),
    Remove(usize),
    Present,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'add' needs option text")]
    MissingText,
    #[error("Invalid index '{0}'")]
    InvalidIndex(String),
}

impl FromStr for ControlCommand {
    type Err = ControlError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((line, ""));

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(ControlError::Empty),
            "spin" => Ok(Self::Spin),
            "present" | "show" => Ok(Self::Present),
            "add" if rest.is_empty() => Err(ControlError::MissingText),
            "add" => Ok(Self::Add(rest.to_string())),
            "remove" => rest
                .parse()
                .map(Self::Remove)
                .map_err(|_| ControlError::InvalidIndex(rest.to_string())),
            other => Err(ControlError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spin => write!(f, "spin"),
            Self::Add(text) => write!(f, "add {}", text.replace('\n', " ")),
            Self::Remove(index) => write!(f, "remove {}", index),
            Self::Present => write!(f, "present"),
        }
    }
}

/// Delivers `command` to a running spinwheel instance.
pub fn send(command: &ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).with_context(|| {
        format!(
            "Failed to connect to spinwheel at {}. Is spinwheel running?",
            SOCKET_PATH
        )
    })?;

    writeln!(stream, "{}", command)?;
    Ok(())
}
