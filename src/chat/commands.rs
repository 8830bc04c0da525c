//! Slash command handlers for the chat REPL.
//!
//! Dispatches `/history`, `/clear`, and `/help`. Returns a [`CommandAction`]
//! so the REPL loop can decide how to proceed.

use colored::Colorize;

use crate::message::{ChatTurn, Role};

/// Action returned by slash command handling.
#[derive(Debug, PartialEq)]
pub(crate) enum CommandAction {
    /// Command was handled successfully; continue the REPL loop.
    Continue,
    /// Unknown command was entered.
    Unknown(String),
}

/// Dispatch and handle a slash command against the in-memory turn history.
pub(crate) fn handle_slash_command(command: &str, turns: &mut Vec<ChatTurn>) -> CommandAction {
    match command {
        "/history" => {
            if turns.is_empty() {
                println!("{}", "No messages yet.".dimmed());
            }
            for turn in turns.iter() {
                println!("{} {}", format!("{}:", Role::User).green().bold(), turn.user());
                println!(
                    "{} {}",
                    format!("{}:", Role::Assistant).cyan().bold(),
                    turn.assistant()
                );
                println!();
            }
            CommandAction::Continue
        }
        "/clear" => {
            turns.clear();
            println!("{}", "History cleared.".dimmed());
            CommandAction::Continue
        }
        "/help" => {
            println!("{}", "Commands:".bold());
            println!("  {} - show conversation history", "/history".cyan());
            println!("  {} - clear conversation", "/clear".cyan());
            println!("  {} - show this help", "/help".cyan());
            println!("  {} - exit", "Ctrl+D".cyan());
            CommandAction::Continue
        }
        _ => CommandAction::Unknown(command.to_string()),
    }
}
