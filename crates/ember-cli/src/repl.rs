//! Interactive session
//!
//! Slash verbs manage the roster; any other line is a command for the main
//! entity.

use anyhow::Result;
use colored::Colorize;
use ember::{ChildId, CommandMode, EmberError, Session};
use std::io::Write;

use crate::input::StdinLines;

const HELP: &str = "\
/spawn [name]            split a new child (optionally naming it)
/name <n> <name>         rename child n
/describe <n> <text>     set child n's description
/assign <n> <function>   assign an available function to child n
/unassign <n> <function> remove an assigned function from child n
/children                list children and their functions
/functions <n>           list child n's available functions
                         (<n> is a child number or a one-word name)
/history                 show the command history
/mode <route|interpret>  switch the command pipeline
/talk                    listen for one spoken command
/help                    show this help
/quit                    leave the session
anything else            send it as a command";

/// How a verb names a child
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildRef {
    Id(ChildId),
    Name(String),
}

impl ChildRef {
    fn resolve(&self, session: &Session) -> Result<ChildId, EmberError> {
        match self {
            Self::Id(id) => Ok(*id),
            Self::Name(name) => session
                .find_child_by_name(name)
                .ok_or_else(|| EmberError::not_found("child", name)),
        }
    }
}

/// A parsed REPL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Spawn { name: Option<String> },
    Rename { child: ChildRef, name: String },
    Describe { child: ChildRef, description: String },
    Assign { child: ChildRef, function: String },
    Unassign { child: ChildRef, function: String },
    Children,
    Functions { child: ChildRef },
    History,
    Mode(CommandMode),
    Talk,
    Help,
    Quit,
    Command(String),
}

impl ReplCommand {
    /// Parse one line. `Ok(None)` for blank input.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(verb_line) = line.strip_prefix('/') else {
            return Ok(Some(Self::Command(line.to_string())));
        };

        let (verb, rest) = split_word(verb_line);
        let command = match verb.to_lowercase().as_str() {
            "spawn" => Self::Spawn {
                name: (!rest.is_empty()).then(|| rest.to_string()),
            },
            "name" => {
                let (child, name) = child_and_text(rest, "/name <n> <name>")?;
                Self::Rename { child, name }
            }
            "describe" => {
                let (child, description) = child_and_text(rest, "/describe <n> <text>")?;
                Self::Describe { child, description }
            }
            "assign" => {
                let (child, function) = child_and_text(rest, "/assign <n> <function>")?;
                Self::Assign { child, function }
            }
            "unassign" => {
                let (child, function) = child_and_text(rest, "/unassign <n> <function>")?;
                Self::Unassign { child, function }
            }
            "children" => Self::Children,
            "functions" => Self::Functions {
                child: parse_child(rest)?,
            },
            "history" => Self::History,
            "mode" => Self::Mode(rest.parse()?),
            "talk" => Self::Talk,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command '/{}'. Try /help", other)),
        };
        Ok(Some(command))
    }
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

/// 1-based child number, or a child name
fn parse_child(text: &str) -> Result<ChildRef, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("Missing child number or name".to_string());
    }
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(ChildRef::Id(ChildId(n - 1))),
        Ok(_) => Err(format!("'{}' is not a child number (1, 2, ...)", text)),
        Err(_) => Ok(ChildRef::Name(text.to_string())),
    }
}

fn child_and_text(text: &str, usage: &str) -> Result<(ChildRef, String), String> {
    let (child, rest) = split_word(text);
    if rest.is_empty() {
        return Err(format!("Usage: {}", usage));
    }
    Ok((parse_child(child)?, rest.to_string()))
}

/// Run the session until /quit or end of input
pub async fn run(session: &mut Session, input: &mut StdinLines) -> Result<()> {
    println!(
        "{} {} mode. Type {} for commands.",
        "Ember session".bold(),
        session.mode().to_string().cyan(),
        "/help".cyan()
    );

    loop {
        print!("{} ", "ember>".red().bold());
        std::io::stdout().flush()?;

        let Some(line) = input.next_line().await? else {
            println!();
            break;
        };

        let command = match ReplCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message.yellow());
                continue;
            }
        };

        if command == ReplCommand::Quit {
            break;
        }

        if let Err(e) = execute(session, input, command).await {
            println!("{} {}", "✗".red(), e);
        }
    }

    Ok(())
}

async fn execute(
    session: &mut Session,
    input: &mut StdinLines,
    command: ReplCommand,
) -> Result<(), EmberError> {
    match command {
        ReplCommand::Spawn { name } => {
            let id = session.spawn_child().await;
            if let Some(name) = name {
                session.rename_child(id, name)?;
            }
            let child = session.child(id)?;
            println!(
                "{} Child {} '{}' created at {} ({} functions available)",
                "✓".green(),
                id,
                child.display_name(id).cyan(),
                child.position,
                child.available_functions().len()
            );
        }

        ReplCommand::Rename { child, name } => {
            let child = child.resolve(session)?;
            session.rename_child(child, name)?;
            println!("{} Child {} renamed", "✓".green(), child);
        }

        ReplCommand::Describe { child, description } => {
            let child = child.resolve(session)?;
            session.describe_child(child, description)?;
            println!("{} Child {} described", "✓".green(), child);
        }

        ReplCommand::Assign { child, function } => {
            let child = child.resolve(session)?;
            if session.assign_function(child, &function)? {
                println!("{} Assigned {} to child {}", "✓".green(), function.cyan(), child);
            } else {
                println!(
                    "{} '{}' is not available to child {} or already assigned",
                    "-".yellow(),
                    function,
                    child
                );
            }
        }

        ReplCommand::Unassign { child, function } => {
            let child = child.resolve(session)?;
            if session.remove_function(child, &function)? {
                println!("{} Removed {} from child {}", "✓".green(), function.cyan(), child);
            } else {
                println!("{} '{}' was not assigned to child {}", "-".yellow(), function, child);
            }
        }

        ReplCommand::Children => print_children(session),

        ReplCommand::Functions { child } => {
            let child = child.resolve(session)?;
            if session.child(child)?.available_functions().is_empty() {
                session.reload_functions(child).await?;
            }
            let entity = session.child(child)?;
            if entity.available_functions().is_empty() {
                println!("No functions available.");
            }
            for function in entity.available_functions() {
                let marker = if entity.assigned_functions().contains(function) {
                    "[x]".green()
                } else {
                    "[ ]".dimmed()
                };
                println!("  {} {}", marker, function);
            }
        }

        ReplCommand::History => {
            if session.history().is_empty() {
                println!("No history yet.");
            }
            for entry in session.history().iter() {
                println!("  {} {}", format!("{}:", entry.role).dimmed(), entry.content);
            }
        }

        ReplCommand::Mode(mode) => {
            session.set_mode(mode);
            println!("{} Mode set to {}", "✓".green(), mode.to_string().cyan());
        }

        ReplCommand::Talk => {
            println!(
                "{} (speak within {}s)",
                "Listening...".yellow(),
                session.listen_window().as_secs()
            );
            session.listen(input).await?;
        }

        ReplCommand::Help => println!("{}", HELP),

        ReplCommand::Quit => {}

        ReplCommand::Command(text) => {
            session.handle_command(&text).await?;
        }
    }

    Ok(())
}

fn print_children(session: &Session) {
    let main = session.registry().main();
    if main.children().is_empty() {
        println!("No children yet. Create one with /spawn");
        return;
    }
    println!("{}", "Children:".bold());
    for (id, child) in main.iter_children() {
        let functions = child.assigned_functions().join(", ");
        println!(
            "  {} {}: {}{}",
            id.to_string().dimmed(),
            child.display_name(id).cyan(),
            if functions.is_empty() { "-" } else { functions.as_str() },
            if child.description.is_empty() {
                String::new()
            } else {
                format!(" ({})", child.description).dimmed().to_string()
            }
        );
    }
}
