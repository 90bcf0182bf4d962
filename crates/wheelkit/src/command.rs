use crate::segment::SegmentNumber;
use crate::wheel::Variant;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/wheelkit.sock";

/// One line of the control socket protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start {
        segment: SegmentNumber,
        duration_ms: Option<u64>,
    },
    Stop,
    Mount(Variant),
    LiveLabels(bool),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs a {1}")]
    MissingArgument(&'static str, &'static str),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Expected 'on' or 'off', got '{0}'")]
    InvalidToggle(String),
    #[error("Unexpected argument '{0}'")]
    TrailingArgument(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "start" => {
                let segment = words
                    .next()
                    .ok_or(CommandError::MissingArgument("start", "segment number"))?;
                Command::Start {
                    segment: SegmentNumber::new(parse_number(segment)?),
                    duration_ms: words.next().map(parse_number::<u64>).transpose()?,
                }
            }
            "stop" => Command::Stop,
            "live" => {
                let enabled = words.next().map(parse_toggle).transpose()?;
                Command::LiveLabels(enabled.unwrap_or(true))
            }
            other => other
                .parse::<Variant>()
                .map(Command::Mount)
                .map_err(|_| CommandError::Unknown(verb.to_string()))?,
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start {
                segment,
                duration_ms: Some(ms),
            } => write!(f, "start {} {}", segment, ms),
            Command::Start {
                segment,
                duration_ms: None,
            } => write!(f, "start {}", segment),
            Command::Stop => write!(f, "stop"),
            Command::Mount(variant) => write!(f, "{}", variant),
            Command::LiveLabels(enabled) => {
                write!(f, "live {}", if *enabled { "on" } else { "off" })
            }
        }
    }
}

pub fn parse_toggle(s: &str) -> Result<bool, CommandError> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(CommandError::InvalidToggle(s.to_string())),
    }
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, CommandError> {
    s.parse()
        .map_err(|_| CommandError::InvalidNumber(s.to_string()))
}
