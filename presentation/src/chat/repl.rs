//! REPL (Read-Eval-Print Loop) for follow-up questions about a brief

use crate::ConsoleFormatter;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use scout_application::{ChatError, ChatSession};
use scout_domain::{ChatContext, ChatMessage, ChatRole};
use std::path::PathBuf;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Brief,
    History,
    Clear,
    Quit,
    Unknown,
}

impl ReplCommand {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/brief" | "/b" => ReplCommand::Brief,
            "/history" => ReplCommand::History,
            "/clear" => ReplCommand::Clear,
            _ => ReplCommand::Unknown,
        }
    }
}

/// Interactive follow-up chat
pub struct ChatRepl {
    session: ChatSession,
    context: ChatContext,
    history: Vec<ChatMessage>,
}

impl ChatRepl {
    pub fn new(session: ChatSession, context: ChatContext) -> Self {
        Self {
            session,
            context,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Run the interactive REPL until `/quit` or end of input
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = Self::history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("you> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(ReplCommand::parse(line), line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.ask(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Ask one question; the history only grows when the service answered.
    pub async fn ask(&mut self, question: &str) -> Option<&str> {
        match self.session.ask(&self.context, &self.history, question).await {
            Ok(history) => {
                self.history = history;
                let reply = self.history.last().map(|m| m.text.as_str())?;
                println!("\n{} {}\n", "scout>".green().bold(), reply);
                Some(reply)
            }
            Err(ChatError::EmptyMessage) => None,
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                None
            }
        }
    }

    fn history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("parallel-scout").join("history.txt"))
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Parallel Scout - Follow-up Chat      │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Ask anything about the brief and the pages that were visited.");
        Self::print_help();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?    - Show this help");
        println!("  /brief, /b       - Show the brief again");
        println!("  /history         - Show this conversation");
        println!("  /clear           - Forget this conversation");
        println!("  /quit, /exit, /q - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ReplCommand, raw: &str) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Brief => {
                println!();
                println!("{}", ConsoleFormatter::format_context(&self.context));
            }
            ReplCommand::History => {
                println!();
                for message in &self.history {
                    let who = match message.role {
                        ChatRole::User => "you>".bold(),
                        ChatRole::Assistant => "scout>".green().bold(),
                    };
                    println!("{} {}", who, message.text);
                }
                println!();
            }
            ReplCommand::Clear => {
                self.history.clear();
                println!("Conversation cleared.");
            }
            ReplCommand::Unknown => {
                println!("Unknown command: {}", raw);
                println!("Type /help for available commands");
            }
        }
        false
    }
}
