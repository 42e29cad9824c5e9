//! Interactive command input.

use nearby_app::Command;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const USAGE: &str =
    "commands: filter <all|atm|pharmacy>, search <text>, sort <distance|rating|name>, \
     radius <meters>, view <list|map>, refresh, retry, quit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub(crate) fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "filter" => Command::SetFilter(rest.parse()?),
        "search" => Command::SetSearch(rest.to_string()),
        "sort" => Command::SetSort(rest.parse()?),
        "radius" => Command::SetRadius(
            rest.parse()
                .map_err(|e| format!("invalid radius '{rest}': {e}"))?,
        ),
        "view" => Command::SetViewMode(rest.parse()?),
        "refresh" => Command::Refresh,
        "retry" => Command::Retry,
        "quit" | "exit" => Command::Shutdown,
        "help" => return Err(USAGE.to_string()),
        other => return Err(format!("unknown command '{other}'; {USAGE}")),
    };
    Ok(Some(command))
}

/// Forward parsed stdin lines until EOF or `quit`. EOF is sent on as a
/// shutdown.
pub(crate) async fn forward_stdin(tx: mpsc::UnboundedSender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_command(&line) {
                Ok(Some(command)) => {
                    let stop = command == Command::Shutdown;
                    if tx.send(command).is_err() || stop {
                        break;
                    }
                }
                Ok(None) => {}
                Err(message) => eprintln!("{message}"),
            },
            Ok(None) => {
                let _ = tx.send(Command::Shutdown);
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stdin");
                let _ = tx.send(Command::Shutdown);
                break;
            }
        }
    }
}
