//! Interactive comparison shell
//!
//! Reads one command per line from stdin and drives a single [`Session`].
//! Errors are printed and the loop continues; only `quit`, `exit` or end of
//! input stop it.

use anyhow::Result;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::app::container::AppContainer;
use crate::app::session::Session;
use crate::cli::args::ShellArgs;
use crate::cli::commands::TableView;
use crate::domain::errors::DomainError;
use crate::domain::presets;
use crate::output::text::{render_commands, render_summaries};

pub const PROMPT: &str = "diffmovie> ";

const HELP: &str = "\
commands:
  load <path>...      analyze files or directories (replaces the current set)
  preset <name>       add a built-in preset as a column
  presets             list preset names
  base <index>        select the base entry (zero-based)
  filter on|off       only show differing fields
  show                print the comparison table
  list                list entries
  summary             conversion summaries toward the base
  commands [dir]      ffmpeg commands converting each file toward the base
  report <path>       write an HTML or PNG report
  clear               drop every entry
  help                this text
  quit | exit         leave the shell
";

/// One parsed shell line
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Load(Vec<PathBuf>),
    Preset(String),
    Presets,
    Base(usize),
    Filter(bool),
    Show,
    List,
    Summary,
    Commands(Option<PathBuf>),
    Report(PathBuf),
    Clear,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, DomainError> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| DomainError::BadArgs("empty command".to_string()))?
            .to_ascii_lowercase();
        let rest: Vec<&str> = words.collect();

        let command = match verb.as_str() {
            "load" => {
                if rest.is_empty() {
                    return Err(DomainError::BadArgs("load needs at least one path".to_string()));
                }
                ShellCommand::Load(rest.iter().map(PathBuf::from).collect())
            }
            "preset" => ShellCommand::Preset(single(&verb, &rest, "name")?.to_string()),
            "presets" => no_args(&verb, &rest).map(|_| ShellCommand::Presets)?,
            "base" => {
                let raw = single(&verb, &rest, "index")?;
                let index = raw
                    .parse()
                    .map_err(|_| DomainError::BadArgs(format!("not an index: {}", raw)))?;
                ShellCommand::Base(index)
            }
            "filter" => match single(&verb, &rest, "of on|off")? {
                "on" => ShellCommand::Filter(true),
                "off" => ShellCommand::Filter(false),
                other => return Err(DomainError::BadArgs(format!("filter expects on|off, got {}", other))),
            },
            "show" => no_args(&verb, &rest).map(|_| ShellCommand::Show)?,
            "list" => no_args(&verb, &rest).map(|_| ShellCommand::List)?,
            "summary" => no_args(&verb, &rest).map(|_| ShellCommand::Summary)?,
            "commands" => match rest.as_slice() {
                [] => ShellCommand::Commands(None),
                [dir] => ShellCommand::Commands(Some(PathBuf::from(dir))),
                _ => return Err(DomainError::BadArgs("commands takes at most one directory".to_string())),
            },
            "report" => ShellCommand::Report(PathBuf::from(single(&verb, &rest, "path")?)),
            "clear" => no_args(&verb, &rest).map(|_| ShellCommand::Clear)?,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(DomainError::BadArgs(format!("unknown command: {} (try help)", other))),
        };
        Ok(command)
    }
}

fn single<'a>(verb: &str, rest: &[&'a str], what: &str) -> Result<&'a str, DomainError> {
    match rest {
        [arg] => Ok(*arg),
        _ => Err(DomainError::BadArgs(format!("{} takes exactly one {}", verb, what))),
    }
}

fn no_args(verb: &str, rest: &[&str]) -> Result<(), DomainError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(DomainError::BadArgs(format!("{} takes no arguments", verb)))
    }
}

/// Run one command against the session, returning the text to print
pub async fn execute(
    container: &dyn AppContainer,
    session: &mut Session,
    command: ShellCommand,
) -> Result<String> {
    let out = match command {
        ShellCommand::Load(paths) => {
            let count = session.submit(&paths, false).await;
            let failed = session.set().entries().iter().filter(|e| e.is_error()).count();
            if failed > 0 {
                format!("loaded {} entries ({} could not be analyzed)\n", count, failed)
            } else {
                format!("loaded {} entries\n", count)
            }
        }
        ShellCommand::Preset(name) => {
            let index = session.add_preset(&name)?;
            format!("added {} at index {}\n", session.set().entries()[index].label, index)
        }
        ShellCommand::Presets => {
            let mut out = presets::names().join("\n");
            out.push('\n');
            out
        }
        ShellCommand::Base(index) => {
            session.set_base(index)?;
            format!("base is now {}: {}\n", index, session.set().entries()[index].label)
        }
        ShellCommand::Filter(on) => {
            session.set_only_different(on);
            format!("filter {}\n", if on { "on" } else { "off" })
        }
        ShellCommand::Show => {
            let set = session.set();
            TableView::of(set, session.only_different())?.render(set)
        }
        ShellCommand::List => {
            let set = session.set();
            let mut out = String::new();
            for (i, entry) in set.entries().iter().enumerate() {
                let mark = if Some(i) == set.base_index() { " (base)" } else { "" };
                let state = if entry.is_error() { " [error]" } else { "" };
                out.push_str(&format!("{:>3}  {}{}{}\n", i, entry.label, mark, state));
            }
            if out.is_empty() {
                out.push_str("no entries\n");
            }
            out
        }
        ShellCommand::Summary => render_summaries(&session.set().summaries()?),
        ShellCommand::Commands(dir) => render_commands(&session.set().commands(dir.as_deref())?),
        ShellCommand::Report(path) => {
            let written = container
                .report_interactor()
                .write(session.set(), session.only_different(), &path)
                .await?;
            format!("report written to {}\n", written.display())
        }
        ShellCommand::Clear => {
            session.clear();
            "cleared\n".to_string()
        }
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => String::new(),
    };
    Ok(out)
}

/// Execute the shell command
pub async fn run(container: &dyn AppContainer, args: ShellArgs) -> Result<()> {
    let mut session = container.new_session();
    if !args.inputs.is_empty() {
        let out = execute(container, &mut session, ShellCommand::Load(args.inputs)).await?;
        print!("{}", out);
    }

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };
        debug!("Shell command: {:?}", command);
        if command == ShellCommand::Quit {
            break;
        }

        match execute(container, &mut session, command).await {
            Ok(out) => {
                stdout.write_all(out.as_bytes()).await?;
            }
            Err(e) => {
                warn!("Shell command failed: {:#}", e);
                eprintln!("error: {:#}", e);
            }
        }
    }
    Ok(())
}
