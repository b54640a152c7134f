//! Line commands for the interactive shell.
//!
//! Cards are addressed by their 1-based position in the last rendered frame,
//! which is what the card list prints in its first column.

use crate::app::Event;
use crate::domain::{ImageId, SortMode};
use tokio::time::Instant;

pub const HELP: &str = "\
commands:
  search <text>     set the search text (empty clears it)
  sort <mode>       latest | popular | alphabetical
  next | prev       move between pages
  page <n>          jump to page n
  tap <n>           tap card n (two quick taps like it)
  dtap <n>          double tap card n
  like <n>          toggle the like on card n
  login | logout    sign in or out
  liked | gallery   switch views
  refresh           fetch the current page again
  dismiss           clear the notice
  help              show this text
  quit              exit";

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Event>),
    Help,
    Quit,
}

/// Parses one input line against the currently visible cards.
///
/// # Errors
///
/// Returns a user-facing message for unknown commands and bad arguments.
pub fn parse_command(line: &str, cards: &[ImageId], now: Instant) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let single = |event: Event| Ok(Command::Dispatch(vec![event]));
    let card = |arg: &str| -> Result<ImageId, String> {
        let position: usize = arg
            .parse()
            .map_err(|_| format!("expected a card number, got `{arg}`"))?;
        position
            .checked_sub(1)
            .and_then(|index| cards.get(index))
            .cloned()
            .ok_or_else(|| format!("no card {position} on screen"))
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Dispatch(vec![])),
        "search" | "s" => single(Event::SetSearch(rest.to_string())),
        "sort" => rest.parse::<SortMode>().map(Event::SetSort).map(|e| Command::Dispatch(vec![e])),
        "next" | "n" => single(Event::NextPage),
        "prev" | "p" => single(Event::PreviousPage),
        "page" => rest
            .parse::<u32>()
            .map_err(|_| format!("expected a page number, got `{rest}`"))
            .map(|page| Command::Dispatch(vec![Event::SetPage(page)])),
        "tap" => single(Event::Tap { id: card(rest)?, at: now }),
        "dtap" => {
            let id = card(rest)?;
            Ok(Command::Dispatch(vec![
                Event::Tap { id: id.clone(), at: now },
                Event::Tap { id, at: now },
            ]))
        }
        "like" | "l" => single(Event::ToggleLike { id: card(rest)? }),
        "login" => single(Event::SignIn),
        "logout" => single(Event::SignOut),
        "liked" => single(Event::ShowLiked),
        "gallery" => single(Event::ShowGallery),
        "refresh" | "r" => single(Event::Refresh),
        "dismiss" => single(Event::DismissNotice),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}
