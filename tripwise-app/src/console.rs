use std::str::FromStr;
use tripwise_core::{CoreError, Field, GuestKind};
use uuid::Uuid;

pub const HELP: &str = "\
Commands:
  login <username> <password>   sign in
  logout                        sign out
  go <path>                     open /, /book-a-new-trip, /my-trips or /login
  set <field> [value]           edit a booking field (dates as YYYY-MM-DD)
  inc <adults|children|infants> add a guest
  dec <adults|children|infants> remove a guest
  next | prev                   move between booking steps
  confirm | cancel              finish or discard the booking
  new                           start another booking after confirming
  trips                         list booked trips
  cancel-trip <id>              cancel a booked trip
  help | quit";

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Go(String),
    Set { field: Field, value: String },
    Increment(GuestKind),
    Decrement(GuestKind),
    Next,
    Previous,
    Confirm,
    Cancel,
    BookNew,
    Trips,
    CancelTrip(Uuid),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "login" => match rest.split_once(char::is_whitespace) {
                // The password is the rest of the line and may contain spaces
                Some((username, password)) if !password.trim().is_empty() => Command::Login {
                    username: username.to_string(),
                    password: password.trim_start().to_string(),
                },
                _ => return Err(CommandError::Usage("login <username> <password>")),
            },
            "logout" => Command::Logout,
            "go" if !rest.is_empty() => Command::Go(rest.to_string()),
            "go" => return Err(CommandError::Usage("go <path>")),
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if name.is_empty() {
                    return Err(CommandError::Usage("set <field> [value]"));
                }
                Command::Set {
                    field: name.parse()?,
                    value: value.trim().to_string(),
                }
            }
            "inc" => Command::Increment(rest.parse()?),
            "dec" => Command::Decrement(rest.parse()?),
            "next" => Command::Next,
            "prev" => Command::Previous,
            "confirm" => Command::Confirm,
            "cancel" => Command::Cancel,
            "new" => Command::BookNew,
            "trips" => Command::Trips,
            "cancel-trip" => {
                let id = Uuid::parse_str(rest).map_err(|_| CommandError::InvalidTripId(rest.to_string()))?;
                Command::CancelTrip(id)
            }
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("No command given")]
    Empty,

    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Not a trip id: {0}")]
    InvalidTripId(String),

    #[error(transparent)]
    Input(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "login rahul rahul@2021".parse::<Command>().unwrap(),
            Command::Login {
                username: "rahul".to_string(),
                password: "rahul@2021".to_string()
            }
        );
        assert_eq!(
            "login rahul  correct horse battery".parse::<Command>().unwrap(),
            Command::Login {
                username: "rahul".to_string(),
                password: "correct horse battery".to_string()
            }
        );
        assert_eq!(
            "set name  Alice Smith ".parse::<Command>().unwrap(),
            Command::Set {
                field: Field::Name,
                value: "Alice Smith".to_string()
            }
        );
        assert_eq!(
            "set assistanceOption".parse::<Command>().unwrap(),
            Command::Set {
                field: Field::AssistanceOption,
                value: String::new()
            }
        );
        assert_eq!("dec adults".parse::<Command>().unwrap(), Command::Decrement(GuestKind::Adults));
        assert_eq!("go /my-trips".parse::<Command>().unwrap(), Command::Go("/my-trips".to_string()));
        assert_eq!("NEXT".parse::<Command>().unwrap(), Command::Next);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("   ".parse::<Command>(), Err(CommandError::Empty)));
        assert!(matches!("login rahul".parse::<Command>(), Err(CommandError::Usage(_))));
        assert!(matches!("login rahul   ".parse::<Command>(), Err(CommandError::Usage(_))));
        assert!(matches!("set nickname Al".parse::<Command>(), Err(CommandError::Input(_))));
        assert!(matches!("inc pets".parse::<Command>(), Err(CommandError::Input(_))));
        assert!(matches!("cancel-trip 42".parse::<Command>(), Err(CommandError::InvalidTripId(_))));
        assert!(matches!("fly".parse::<Command>(), Err(CommandError::Unknown(_))));
    }
}
