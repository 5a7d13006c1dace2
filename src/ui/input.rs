use crate::error::{AppError, AppResult};

/// A line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve a title through the recommendation endpoint
    Search(String),
    /// List all matches of a title without resolving it
    Lookup(String),
    /// Pick the candidate at a 1-based position of the shown list
    Select(usize),
    Help,
    Quit,
}

pub const HELP: &str = "\
Type a movie title to get recommendations.
  /find <title>     list every movie matching <title>
  /select <number>  pick a movie from the shown matches
  /help             show this message
  /quit             leave";

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> AppResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Some(Command::Search(line.to_string())));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "quit" | "exit" => Command::Quit,
            "help" => Command::Help,
            "select" => {
                let position = arg.parse::<usize>().map_err(|_| {
                    AppError::InvalidInput(format!("expected a match number, got '{}'", arg))
                })?;
                Command::Select(position)
            }
            "find" if !arg.is_empty() => Command::Lookup(arg.to_string()),
            "find" => {
                return Err(AppError::InvalidInput(
                    "/find needs a title".to_string(),
                ))
            }
            other => {
                return Err(AppError::InvalidInput(format!(
                    "unknown command '/{}'",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}
