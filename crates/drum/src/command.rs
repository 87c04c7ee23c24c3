use crate::attribute::AttributeName;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/cylinder.sock";

/// Line-based control commands accepted by the picker daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Rotate(i64),
    Stop,
    Set(AttributeName, String),
    Unset(AttributeName),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("missing argument for '{0}'")]
    MissingArgument(&'static str),
    #[error("invalid step count '{0}'")]
    InvalidDelta(String),
    #[error("unknown attribute: {0}")]
    Attribute(#[from] strum::ParseError),
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    s.split_once(char::is_whitespace)
        .map(|(head, rest)| (head, rest.trim()))
        .unwrap_or((s, ""))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = split_word(line.trim());

        match verb {
            "" => Err(ParseCommandError::Empty),
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            "stop" => Ok(Self::Stop),
            "rotate" => {
                if rest.is_empty() {
                    return Err(ParseCommandError::MissingArgument("rotate"));
                }
                rest.parse()
                    .map(Self::Rotate)
                    .map_err(|_| ParseCommandError::InvalidDelta(rest.to_string()))
            }
            "set" => {
                let (name, value) = split_word(rest);
                if name.is_empty() {
                    return Err(ParseCommandError::MissingArgument("set"));
                }
                Ok(Self::Set(name.parse()?, value.to_string()))
            }
            "unset" => {
                if rest.is_empty() {
                    return Err(ParseCommandError::MissingArgument("unset"));
                }
                Ok(Self::Unset(rest.parse()?))
            }
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Prev => write!(f, "prev"),
            Self::Rotate(delta) => write!(f, "rotate {}", delta),
            Self::Stop => write!(f, "stop"),
            Self::Set(name, value) => write!(f, "set {} {}", name, value),
            Self::Unset(name) => write!(f, "unset {}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cases = vec![
            ("next", Command::Next),
            ("  prev  ", Command::Prev),
            ("stop", Command::Stop),
            ("rotate -3", Command::Rotate(-3)),
            ("set value 4", Command::Set(AttributeName::Value, "4".to_string())),
            ("set Infinite", Command::Set(AttributeName::Infinite, String::new())),
            ("unset disabled", Command::Unset(AttributeName::Disabled)),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>(), Ok(expected), "line {line:?}");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "rotate".parse::<Command>(),
            Err(ParseCommandError::MissingArgument("rotate"))
        );
        assert_eq!(
            "rotate lots".parse::<Command>(),
            Err(ParseCommandError::InvalidDelta("lots".to_string()))
        );
        assert!(matches!(
            "set colour red".parse::<Command>(),
            Err(ParseCommandError::Attribute(_))
        ));
        assert_eq!(
            "show".parse::<Command>(),
            Err(ParseCommandError::Unknown("show".to_string()))
        );
    }

    #[test]
    fn test_display_is_parseable() {
        let commands = vec![
            Command::Rotate(12),
            Command::Set(AttributeName::Curvature, "30".to_string()),
            Command::Unset(AttributeName::Value),
        ];

        for command in commands {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
    }
}
