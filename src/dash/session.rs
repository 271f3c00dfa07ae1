// An interactive session: selection commands are read line by line and the
// recomputed views are printed after each of them.

use serde_json::Value as JSValue;
use std::io::{BufRead, Write};

use crate::dash::*;

const HELP: &str = "\
commands:
  state <name>   select a state
  state          clear the state
  seat <name>    select a constituency of the current state
  seat           clear the constituency
  clear          clear the whole selection
  states         list the states
  show           print all the views
  help           print this message
  quit           leave the session";

#[derive(Eq, PartialEq, Debug, Clone)]
enum Command {
    Select(SelectionEvent),
    States,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let arg = if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    };
    let cmd = match word.to_lowercase().as_str() {
        "state" => Command::Select(SelectionEvent::SetState(arg)),
        "seat" | "constituency" => Command::Select(SelectionEvent::SetConstituency(arg)),
        "clear" if arg.is_none() => Command::Select(SelectionEvent::Clear),
        "states" if arg.is_none() => Command::States,
        "show" if arg.is_none() => Command::Show,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

fn print_js<W: Write>(output: &mut W, js: &JSValue) -> BDashResult<()> {
    let pretty = serde_json::to_string_pretty(js).context(ParsingJsonSnafu {})?;
    writeln!(output, "{}", pretty).context(WritingOutputSnafu { path: "stdout" })?;
    Ok(())
}

fn print_line<W: Write>(output: &mut W, line: &str) -> BDashResult<()> {
    writeln!(output, "{}", line).context(WritingOutputSnafu { path: "stdout" })?;
    Ok(())
}

/// Runs commands until the input ends or a quit command is read.
///
/// A refused selection is reported and the session goes on with the previous
/// selection.
pub fn run_session<R: BufRead, W: Write>(
    graph: &mut ViewGraph,
    input: R,
    mut output: W,
) -> BDashResult<()> {
    print_js(&mut output, &render::summary_js(graph, None))?;
    for line_r in input.lines() {
        let line = line_r.context(ReadingCommandsSnafu {})?;
        if line.trim().is_empty() {
            continue;
        }
        debug!("run_session: command {:?}", line);
        match parse_command(&line) {
            Some(Command::Select(event)) => match graph.apply(&event) {
                Ok(recomputation) => {
                    print_js(&mut output, &render::recomputation_js(graph, &recomputation))?;
                }
                Err(e) => {
                    warn!("Refused {:?}: {}", event, e);
                    print_line(&mut output, &format!("error: {}", e))?;
                }
            },
            Some(Command::States) => {
                for state in graph.dataset().all_states() {
                    print_line(&mut output, &state)?;
                }
            }
            Some(Command::Show) => print_js(&mut output, &render::summary_js(graph, None))?,
            Some(Command::Help) => print_line(&mut output, HELP)?,
            Some(Command::Quit) => break,
            None => {
                print_line(
                    &mut output,
                    &format!("error: unknown command {:?}, type 'help'", line.trim()),
                )?;
            }
        }
        output.flush().context(WritingOutputSnafu { path: "stdout" })?;
    }
    info!(
        "Session ended with generation {}",
        graph.selection().generation()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seat_tally::builder::Builder;
    use std::io::Cursor;

    fn graph() -> ViewGraph {
        let mut b = Builder::new();
        b.add_result("Goa", "1", "North Goa", "Shripad Yesso Naik", "BJP", 257326);
        b.add_result("Goa", "2", "South Goa", "Viriato Fernandes", "INC", 217836);
        b.add_result("Sikkim", "1", "Sikkim", "Indra Hang Subba", "SKM", 164396);
        ViewGraph::new(Arc::new(b.build().unwrap()))
    }

    fn run(commands: &str) -> (ViewGraph, String) {
        let mut g = graph();
        let mut out: Vec<u8> = Vec::new();
        run_session(&mut g, Cursor::new(commands), &mut out).unwrap();
        (g, String::from_utf8(out).unwrap())
    }

    #[test]
    fn commands() {
        assert_eq!(
            parse_command("state  Andhra Pradesh "),
            Some(Command::Select(SelectionEvent::SetState(Some(
                "Andhra Pradesh".to_string()
            ))))
        );
        assert_eq!(
            parse_command("state"),
            Some(Command::Select(SelectionEvent::SetState(None)))
        );
        assert_eq!(
            parse_command("SEAT North Goa"),
            Some(Command::Select(SelectionEvent::SetConstituency(Some(
                "North Goa".to_string()
            ))))
        );
        assert_eq!(parse_command("clear"), Some(Command::Select(SelectionEvent::Clear)));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
        assert_eq!(parse_command("vote"), None);
        assert_eq!(parse_command("clear all"), None);
    }

    #[test]
    fn selection_commands_update_the_graph() {
        let (g, out) = run("state Goa\nseat South Goa\n");
        assert_eq!(g.selection().state(), Some("Goa"));
        assert_eq!(g.selection().constituency(), Some("South Goa"));
        assert!(out.contains("Vote Share in South Goa (Goa)"));
        assert!(out.contains("\"Seats Won\""));
    }

    #[test]
    fn refused_commands_keep_the_session_going() {
        let (g, out) = run("state Goa\nseat Sikkim\nstate Atlantis\nfly\n");
        assert_eq!(g.selection().state(), Some("Goa"));
        assert_eq!(g.selection().constituency(), None);
        assert_eq!(out.matches("error:").count(), 3);
    }

    #[test]
    fn quit_stops_reading() {
        let (g, out) = run("states\nquit\nstate Goa\n");
        assert_eq!(g.selection().state(), None);
        assert!(out.contains("\nGoa\nSikkim\n"));
    }
}
