//! Terminal rendition of the list screen.
//!
//! # Responsibility
//! - Parse one input line into a screen action.
//! - Render the list as numbered checkbox rows.
//! - Drive a session from any line source, so tests can script it.
//!
//! # Invariants
//! - Row numbers on screen are 1-based; core indices are 0-based.
//! - Invalid input never mutates the list.

use std::io::{self, BufRead, Write};
use tasklist_core::{KvRepository, RowDeleteOutcome, TodoList, TodoService};

const TITLE: &str = "Task list";
const HELP: &str = "commands:
  add <text>   add a new item
  check <n>    check/uncheck item n
  del <n>      delete item n (deletes all checked items when n is checked and others are too)
  clear        delete all checked items
  list         show the list
  help         show this help
  quit         exit";

/// One user action on the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Check(usize),
    Delete(usize),
    Clear,
    List,
    Help,
    Quit,
    Invalid(String),
}

/// Parses one input line. Row numbers are converted to 0-based indices.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (trimmed, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" | "list" | "ls" => Command::List,
        "add" | "a" => Command::Add(rest.to_string()),
        "check" | "toggle" | "c" => parse_row(rest).map_or_else(Command::Invalid, Command::Check),
        "del" | "delete" | "rm" | "d" => {
            parse_row(rest).map_or_else(Command::Invalid, Command::Delete)
        }
        "clear" => Command::Clear,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("unknown command `{other}`")),
    }
}

fn parse_row(value: &str) -> Result<usize, String> {
    let value = value.trim();
    match value.parse::<usize>() {
        Ok(0) => Err("row numbers start at 1".to_string()),
        Ok(row) => Ok(row - 1),
        Err(_) => Err(format!("expected a row number, got `{value}`")),
    }
}

/// Renders the title and one line per item.
pub fn render(list: &TodoList) -> String {
    let mut out = format!("{TITLE}\n");
    if list.is_empty() {
        out.push_str("  (no items)\n");
        return out;
    }
    for (index, item) in list.items().iter().enumerate() {
        let mark = if item.done { 'x' } else { ' ' };
        out.push_str(&format!("{:>3}. [{mark}] {}\n", index + 1, item.text));
    }
    out
}

/// Runs the prompt loop until `quit` or end of input.
pub fn run_session<R, I, W>(
    service: &mut TodoService<R>,
    input: I,
    output: &mut W,
) -> io::Result<()>
where
    R: KvRepository,
    I: BufRead,
    W: Write,
{
    write!(output, "{}", render(service.list()))?;
    prompt(output)?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Command::Quit => return Ok(()),
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Invalid(message) => writeln!(output, "{message}; type `help`")?,
            Command::List => write!(output, "{}", render(service.list()))?,
            command => {
                apply(service, command, output)?;
                write!(output, "{}", render(service.list()))?;
            }
        }
        prompt(output)?;
    }

    writeln!(output)?;
    Ok(())
}

fn apply<R: KvRepository, W: Write>(
    service: &mut TodoService<R>,
    command: Command,
    output: &mut W,
) -> io::Result<()> {
    match command {
        Command::Add(text) => {
            service.add(text);
        }
        Command::Check(index) => {
            service.toggle(index);
        }
        Command::Delete(index) => {
            if let RowDeleteOutcome::Bulk(count) = service.delete_from_row(index) {
                writeln!(output, "deleted {count} checked items")?;
            }
        }
        Command::Clear => {
            service.delete_checked();
        }
        Command::List | Command::Help | Command::Quit | Command::Invalid(_) => {}
    }
    Ok(())
}

fn prompt<W: Write>(output: &mut W) -> io::Result<()> {
    write!(output, "> ")?;
    output.flush()
}
