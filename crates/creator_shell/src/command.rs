//! Shell commands
//!
//! One command per line. Scene names may contain spaces: everything
//! after `load` or `rename` is the name.

use std::fmt;

use creator_scene::MaterialAxis;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{0}: too many arguments")]
    TooManyArguments(&'static str),
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Save,
    Delete,
    Load(String),
    Rename(String),
    Shape,
    /// Flip one material axis (`fluid` or `smooth`)
    Material(MaterialAxis),
    Grid,
    Color { hex: String, alpha: Option<String> },
    List,
    Status,
    Diagnostics,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments give `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "save" => no_args("save", rest, Command::Save)?,
            "delete" | "rm" => no_args("delete", rest, Command::Delete)?,
            "load" => Command::Load(required("load", "scene name", rest)?),
            "rename" => Command::Rename(required("rename", "new name", rest)?),
            "shape" => no_args("shape", rest, Command::Shape)?,
            "fluid" => no_args("fluid", rest, Command::Material(MaterialAxis::Substance))?,
            "smooth" => no_args("smooth", rest, Command::Material(MaterialAxis::Shading))?,
            "grid" => no_args("grid", rest, Command::Grid)?,
            "color" | "colour" => {
                let mut parts = rest.split_whitespace();
                let hex = parts
                    .next()
                    .ok_or(CommandError::MissingArgument {
                        command: "color",
                        argument: "hex colour",
                    })?
                    .to_string();
                let alpha = parts.next().map(str::to_string);
                if parts.next().is_some() {
                    return Err(CommandError::TooManyArguments("color"));
                }
                Command::Color { hex, alpha }
            }
            "list" | "ls" => no_args("list", rest, Command::List)?,
            "status" => no_args("status", rest, Command::Status)?,
            "diagnostics" | "diag" => no_args("diagnostics", rest, Command::Diagnostics)?,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }

    /// Whether the command changes the session
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Save
                | Command::Delete
                | Command::Load(_)
                | Command::Rename(_)
                | Command::Shape
                | Command::Material(_)
                | Command::Grid
                | Command::Color { .. }
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Save => write!(f, "save"),
            Command::Delete => write!(f, "delete"),
            Command::Load(name) => write!(f, "load {}", name),
            Command::Rename(name) => write!(f, "rename {}", name),
            Command::Shape => write!(f, "shape"),
            Command::Material(MaterialAxis::Substance) => write!(f, "fluid"),
            Command::Material(MaterialAxis::Shading) => write!(f, "smooth"),
            Command::Grid => write!(f, "grid"),
            Command::Color { hex, alpha: Some(alpha) } => write!(f, "color {} {}", hex, alpha),
            Command::Color { hex, alpha: None } => write!(f, "color {}", hex),
            Command::List => write!(f, "list"),
            Command::Status => write!(f, "status"),
            Command::Diagnostics => write!(f, "diagnostics"),
            Command::Help => write!(f, "help"),
            Command::Quit => write!(f, "quit"),
        }
    }
}

pub const HELP: &str = "\
save                  save the current scene
delete                delete the current scene from the store
load <name>           load a stored scene
rename <name>         rename the current scene (saved on next save)
shape                 next selection shape
fluid                 toggle solid / fluid
smooth                toggle noise / smooth shading
grid                  show / hide the grid
color <hex> [alpha]   set material colour, e.g. color #ff8800 128
list                  stored scene names
status                current scene state
diagnostics           recent failures
quit                  exit";

fn no_args(command: &'static str, rest: &str, parsed: Command) -> Result<Command, CommandError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::TooManyArguments(command))
    }
}

fn required(
    command: &'static str,
    argument: &'static str,
    rest: &str,
) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("save").unwrap(), Some(Command::Save));
        assert_eq!(Command::parse("  SHAPE ").unwrap(), Some(Command::Shape));
        assert_eq!(
            Command::parse("fluid").unwrap(),
            Some(Command::Material(MaterialAxis::Substance))
        );
        assert_eq!(
            Command::parse("smooth").unwrap(),
            Some(Command::Material(MaterialAxis::Shading))
        );
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(Command::parse("# note").unwrap(), None);
    }

    #[test]
    fn test_names_keep_spaces() {
        assert_eq!(
            Command::parse("load  Night Sky ").unwrap(),
            Some(Command::Load("Night Sky".to_string()))
        );
        assert_eq!(
            Command::parse("rename My Scene").unwrap(),
            Some(Command::Rename("My Scene".to_string()))
        );
    }

    #[test]
    fn test_color_arguments() {
        assert_eq!(
            Command::parse("color #ff0000").unwrap(),
            Some(Command::Color {
                hex: "#ff0000".to_string(),
                alpha: None
            })
        );
        assert_eq!(
            Command::parse("color 00ff00 128").unwrap(),
            Some(Command::Color {
                hex: "00ff00".to_string(),
                alpha: Some("128".to_string())
            })
        );
        assert_eq!(
            Command::parse("color 00ff00 128 1"),
            Err(CommandError::TooManyArguments("color"))
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            Command::parse("load"),
            Err(CommandError::MissingArgument { command: "load", .. })
        ));
        assert!(matches!(
            Command::parse("color"),
            Err(CommandError::MissingArgument { command: "color", .. })
        ));
        assert_eq!(
            Command::parse("grid now"),
            Err(CommandError::TooManyArguments("grid"))
        );
        assert_eq!(
            Command::parse("explode"),
            Err(CommandError::UnknownCommand("explode".to_string()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        for line in ["save", "load Blue", "fluid", "color ff0000 12", "diagnostics"] {
            let command = Command::parse(line).unwrap().unwrap();
            assert_eq!(command.to_string(), line);
        }
    }

    #[test]
    fn test_mutating() {
        assert!(Command::Grid.is_mutating());
        assert!(!Command::Status.is_mutating());
        assert!(!Command::Quit.is_mutating());
    }
}
