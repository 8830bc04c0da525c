//! Interactive chat REPL for cozy-oven.
//!
//! Provides a multi-turn conversation loop using [`rustyline`] for readline
//! support (history, line editing). Prior turns live only in memory and are
//! handed to the [`Assistant`] with each new message.

mod commands;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::agent::Assistant;
use crate::config::Config;
use crate::error::TurnError;
use crate::message::ChatTurn;

/// Runs the interactive chat REPL.
///
/// # Readline behavior
///
/// - **Ctrl+C**: cancels current input, stays in REPL
/// - **Ctrl+D**: exits cleanly with "goodbye."
/// - Readline history is persisted to `~/.cache/cozy-oven/chat_history.txt`
pub async fn run_chat(assistant: &Assistant, model: &str) -> Result<()> {
    println!(
        "{} [model: {}] (Ctrl+D to exit, /help for commands)",
        "The Cozy Oven".bold().cyan(),
        model.yellow(),
    );
    println!();

    let mut rl = DefaultEditor::new()?;
    let history_path = Config::cache_dir()
        .ok()
        .map(|dir| dir.join(crate::constants::HISTORY_FILENAME));
    if let Some(ref path) = history_path {
        if path.exists() {
            let _ = rl.load_history(path);
        }
    }

    let mut turns: Vec<ChatTurn> = Vec::new();

    loop {
        let readline = rl.readline(&format!("{} ", ">".green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }

                if line.starts_with('/') {
                    match commands::handle_slash_command(&line, &mut turns) {
                        commands::CommandAction::Continue => continue,
                        commands::CommandAction::Unknown(cmd) => {
                            println!("{} Unknown command: {}", "?".yellow(), cmd);
                            continue;
                        }
                    }
                }

                let _ = rl.add_history_entry(&line);
                println!();

                match exchange(assistant, line, &mut turns).await {
                    Ok(reply) => println!("{}", reply),
                    Err(e) => {
                        tracing::error!(error = %e, "chat turn failed");
                        eprintln!("{}", e.user_message().red());
                    }
                }
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "goodbye.".dimmed());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                break;
            }
        }
    }

    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let _ = rl.save_history(&path);
    }

    Ok(())
}

/// Runs one turn and records it in `turns` only when it succeeded.
///
/// Failed turns stay out of the history so the user can retry.
async fn exchange(
    assistant: &Assistant,
    line: String,
    turns: &mut Vec<ChatTurn>,
) -> Result<String, TurnError> {
    let reply = assistant.run_turn(&line, turns).await?;
    turns.push(ChatTurn::new(line, reply.clone()));
    Ok(reply)
}
