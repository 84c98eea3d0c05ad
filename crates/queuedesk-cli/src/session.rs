//! Interactive operator session and the scripted demo.

use std::io::{self, Write};
use std::str::FromStr;

use queuedesk_core::queue::ServiceDesk;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render;

const HELP: &str = "\
Commands:
  add       issue a ticket to a new client
  next      call the next client to the counter
  finish    finish the current service
  status    client in service and remaining time
  waiting   list the waiting clients
  history   list completed services
  json      full desk snapshot as JSON
  help      show this message
  quit      leave the session";

/// One operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Next,
    Finish,
    Status,
    Waiting,
    History,
    Json,
    Help,
    Quit,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "a" => Ok(Action::Add),
            "next" | "n" => Ok(Action::Next),
            "finish" | "f" => Ok(Action::Finish),
            "status" | "s" => Ok(Action::Status),
            "waiting" | "w" => Ok(Action::Waiting),
            "history" | "h" => Ok(Action::History),
            "json" => Ok(Action::Json),
            "help" | "?" => Ok(Action::Help),
            "quit" | "q" | "exit" => Ok(Action::Quit),
            other => Err(format!("unknown command `{other}` (try `help`)")),
        }
    }
}

/// What the session should do after an action.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// Run one action against the desk. Every query reads the desk as it is now.
pub async fn execute(action: Action, desk: &dyn ServiceDesk) -> Reply {
    let text = match action {
        Action::Add => render::issued(&desk.enqueue().await),
        Action::Next => render::admission(&desk.admit_next().await),
        Action::Finish => render::finalization(&desk.finalize_current().await),
        Action::Status => render::status(&desk.status().await),
        Action::Waiting => render::waiting(&desk.waiting().await),
        Action::History => render::history(&desk.history().await),
        Action::Json => {
            let status = desk.status().await;
            serde_json::to_string_pretty(&status)
                .unwrap_or_else(|e| format!("failed to encode status: {e}"))
        }
        Action::Help => HELP.to_string(),
        Action::Quit => return Reply::Quit,
    };
    Reply::Print(text)
}

/// Read commands line by line until `quit` or end of input.
pub async fn run<R, W>(desk: &dyn ServiceDesk, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Service desk open. Type `help` for commands.")?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };
        match execute(action, desk).await {
            Reply::Print(text) => writeln!(out, "{text}")?,
            Reply::Quit => break,
        }
    }

    writeln!(out, "Service desk closed.")?;
    out.flush()
}

/// Two clients, served one after the other, printing every outcome.
pub async fn demo<W: Write>(desk: &dyn ServiceDesk, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", render::issued(&desk.enqueue().await))?;
    writeln!(out, "{}", render::issued(&desk.enqueue().await))?;
    writeln!(out, "{}", render::admission(&desk.admit_next().await))?;
    // 2 人目はまだ呼べない (Busy)
    writeln!(out, "{}", render::admission(&desk.admit_next().await))?;
    writeln!(out, "{}", render::status(&desk.status().await))?;
    writeln!(out, "{}", render::finalization(&desk.finalize_current().await))?;
    writeln!(out, "{}", render::admission(&desk.admit_next().await))?;
    writeln!(out, "{}", render::finalization(&desk.finalize_current().await))?;
    // 窓口が空なので NothingInService
    writeln!(out, "{}", render::finalization(&desk.finalize_current().await))?;
    writeln!(out, "{}", render::history(&desk.history().await))?;
    writeln!(out, "Idle: {}", desk.is_idle().await)?;
    out.flush()
}
