//! Interactive storefront session.
//!
//! Reads one command per line from stdin and prints the page after every
//! action. `add` and `remove` take the index shown next to a product card or
//! cart line and activate that node, the way a click would.

use std::io::Write;

use cloudmart_core::Category;
use cloudmart_storefront::Command;
use cloudmart_storefront::surface::{Container, Node};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::{CliError, Session};

const HELP: &str = "\
commands:
  filter [category]   show one category, or all without an argument
  add <n>             add product [n] to the cart
  remove <n>          remove cart line [n]
  checkout            place an order
  show                print the page again
  help                this text
  quit                leave the shell";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Filter(String),
    Add(usize),
    Remove(usize),
    Checkout,
    Show,
    Help,
    Quit,
}

/// Reasons a shell line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("{0} needs an index")]
    MissingIndex(&'static str),

    #[error("not an index: {0}")]
    BadIndex(String),
}

impl Input {
    /// Parse one line. Blank lines parse to `None`.
    ///
    /// # Errors
    ///
    /// Returns error for unknown commands and malformed indices.
    pub fn parse(line: &str) -> Result<Option<Self>, InputError> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let input = match word {
            "" => return Ok(None),
            "filter" => Self::Filter(rest.to_string()),
            "add" => Self::Add(index(rest, "add")?),
            "remove" => Self::Remove(index(rest, "remove")?),
            "checkout" => Self::Checkout,
            "show" => Self::Show,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(InputError::Unknown(other.to_string())),
        };
        Ok(Some(input))
    }
}

fn index(arg: &str, command: &'static str) -> Result<usize, InputError> {
    if arg.is_empty() {
        return Err(InputError::MissingIndex(command));
    }
    arg.parse().map_err(|_| InputError::BadIndex(arg.to_string()))
}

/// The node `input` activates, if it names one.
fn target(session: &Session, input: &Input) -> Option<Command> {
    let surface = session.surface();
    match input {
        Input::Filter(category) if category.is_empty() => {
            Some(Command::SelectCategory(Category::default()))
        }
        Input::Filter(category) => surface
            .children(Container::CategorySelect)
            .into_iter()
            .find(|node| {
                matches!(node, Node::CategoryOption { value } if value.as_str() == category)
            })
            .map(|node| node.command()),
        Input::Add(n) => surface.node(Container::ProductList, *n).map(|node| node.command()),
        Input::Remove(n) => surface.node(Container::CartList, *n).map(|node| node.command()),
        Input::Checkout => Some(Command::Checkout),
        Input::Show | Input::Help | Input::Quit => None,
    }
}

fn say(message: &str) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{message}")?;
    out.flush()?;
    Ok(())
}

fn prompt() -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Run the shell until `quit` or end of input.
///
/// Command failures are logged and the shell keeps going.
///
/// # Errors
///
/// Returns error only if stdin or stdout fail.
pub async fn run(session: &Session) -> Result<(), CliError> {
    // Failures are logged by the dispatcher; show whatever loaded.
    let _ = session.storefront().dispatch(Command::LoadPage).await;
    session.print()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let input = match Input::parse(&line) {
            Ok(Some(input)) => input,
            Ok(None) => {
                prompt()?;
                continue;
            }
            Err(err) => {
                say(&err.to_string())?;
                prompt()?;
                continue;
            }
        };
        debug!(?input, "shell input");

        match &input {
            Input::Quit => break,
            Input::Help => say(HELP)?,
            Input::Show => session.print()?,
            _ => match target(session, &input) {
                Some(command) => {
                    let _ = session.storefront().dispatch(command).await;
                    session.print()?;
                }
                None => say("nothing there")?,
            },
        }
        prompt()?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse("add 2").unwrap(), Some(Input::Add(2)));
        assert_eq!(Input::parse("  remove   0 ").unwrap(), Some(Input::Remove(0)));
        assert_eq!(Input::parse("checkout").unwrap(), Some(Input::Checkout));
        assert_eq!(Input::parse("exit").unwrap(), Some(Input::Quit));
        assert_eq!(Input::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            Input::parse("filter home garden").unwrap(),
            Some(Input::Filter("home garden".to_string()))
        );
        assert_eq!(
            Input::parse("filter").unwrap(),
            Some(Input::Filter(String::new()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Input::parse("add").unwrap_err(),
            InputError::MissingIndex("add")
        );
        assert_eq!(
            Input::parse("remove x").unwrap_err(),
            InputError::BadIndex("x".to_string())
        );
        assert_eq!(
            Input::parse("buy").unwrap_err(),
            InputError::Unknown("buy".to_string())
        );
    }
}
