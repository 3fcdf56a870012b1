//! Line commands for the interactive `browse` session.

use anyhow::{bail, Result};

use crate::domain::ResourceType;
use crate::render::UiEvent;

pub const HELP: &str = "\
Commands:
  unit <id|all>    show one unit (or every unit)
  search [text]    fuzzy search topics (no text clears)
  type <type>      toggle a type filter (video, lab, reading, ...)
  cc               toggle captioned-only
  open <code>      expand or collapse a topic
  menu             toggle the unit list
  show             redraw the whole page
  help             this text
  quit             leave";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Show,
    Help,
    Quit,
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "unit" | "u" => {
            if rest.is_empty() {
                bail!("usage: unit <id|all>");
            }
            Command::Event(UiEvent::SelectUnit(rest.to_string()))
        }
        "search" | "s" | "/" => Command::Event(UiEvent::Search(rest.to_string())),
        "type" | "t" => {
            let kind: ResourceType = rest.parse()?;
            Command::Event(UiEvent::ToggleType(kind))
        }
        "cc" | "captions" => Command::Event(UiEvent::ToggleCaptions),
        "open" | "o" => {
            if rest.is_empty() {
                bail!("usage: open <code>");
            }
            Command::Event(UiEvent::ToggleTopic(rest.to_string()))
        }
        "menu" => Command::Event(UiEvent::ToggleSidebar),
        "show" | "" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => bail!("Unknown command: {} (try 'help')", other),
    };

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        assert_eq!(
            parse_command("unit u2\n").unwrap(),
            Command::Event(UiEvent::SelectUnit("u2".to_string()))
        );
        assert_eq!(
            parse_command("search  cell structure ").unwrap(),
            Command::Event(UiEvent::Search("cell structure".to_string()))
        );
        assert_eq!(
            parse_command("search").unwrap(),
            Command::Event(UiEvent::Search(String::new()))
        );
        assert_eq!(
            parse_command("type Lab").unwrap(),
            Command::Event(UiEvent::ToggleType(ResourceType::Lab))
        );
        assert_eq!(
            parse_command("cc").unwrap(),
            Command::Event(UiEvent::ToggleCaptions)
        );
    }

    #[test]
    fn test_parse_control() {
        assert_eq!(parse_command("").unwrap(), Command::Show);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(parse_command("help").unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("unit").is_err());
        assert!(parse_command("type podcast").is_err());
        assert!(parse_command("dance").is_err());
    }
}
