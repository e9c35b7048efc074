//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output::ConsoleFormatter;
use crate::progress::TurnSpinner;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use sous_application::ports::completion_gateway::CompletionGateway;
use sous_application::ports::user_data::UserDataStore;
use sous_application::use_cases::conversation::ConversationController;
use sous_domain::context::value_objects::DataSource;

/// Interactive chat REPL driving one conversation session.
pub struct ChatRepl<G: CompletionGateway + 'static, S: UserDataStore + 'static> {
    controller: ConversationController<G, S>,
    quiet: bool,
}

impl<G: CompletionGateway + 'static, S: UserDataStore + 'static> ChatRepl<G, S> {
    pub fn new(controller: ConversationController<G, S>) -> Self {
        Self {
            controller,
            quiet: false,
        }
    }

    /// Suppress the turn spinner.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("sous").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    self.process_turn(line).await;
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

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn process_turn(&mut self, line: &str) {
        let before = self.controller.messages().len();
        let spinner = TurnSpinner::start(self.quiet);
        self.controller.send_message(line).await;
        spinner.finish();

        // Print everything the turn appended after the user message.
        for message in self.controller.messages().iter().skip(before + 1) {
            println!("\n{}\n", ConsoleFormatter::format_message(message));
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              Sous - Chat Mode               │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if let Some(welcome) = self.controller.messages().first() {
            println!("{}\n", ConsoleFormatter::format_message(welcome));
        }
        println!("Try asking:");
        println!(
            "{}",
            ConsoleFormatter::format_suggestions(&self.controller.suggested_queries())
        );
        println!();
        println!("Commands:");
        println!("  /help      - Show this help");
        println!("  /stats     - Show your data counts");
        println!("  /suggest   - Show suggested questions");
        println!("  /privacy <recipes|shopping|meals> <on|off>");
        println!("  /refresh   - Re-read your data");
        println!("  /clear     - Start the conversation over");
        println!("  /quit      - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    fn handle_command(&mut self, command: &str) -> bool {
        let mut parts = command.split_whitespace();
        match parts.next() {
            Some("/quit") | Some("/exit") => return true,
            Some("/help") => self.print_welcome(),
            Some("/stats") => {
                println!(
                    "{}",
                    ConsoleFormatter::format_statistics(self.controller.statistics())
                );
            }
            Some("/suggest") => {
                println!(
                    "{}",
                    ConsoleFormatter::format_suggestions(&self.controller.suggested_queries())
                );
            }
            Some("/refresh") => match self.controller.refresh_statistics() {
                Some(change) => println!("{change}"),
                None => println!("No changes in your data."),
            },
            Some("/clear") => {
                self.controller.clear_conversation();
                if let Some(welcome) = self.controller.messages().first() {
                    println!("\n{}\n", ConsoleFormatter::format_message(welcome));
                }
            }
            Some("/privacy") => {
                let source = match parts.next() {
                    Some("recipes") => Some(DataSource::SavedRecipes),
                    Some("shopping") => Some(DataSource::ShoppingList),
                    Some("meals") => Some(DataSource::MealPlan),
                    _ => None,
                };
                let enabled = match parts.next() {
                    Some("on") => Some(true),
                    Some("off") => Some(false),
                    _ => None,
                };
                match (source, enabled) {
                    (Some(source), Some(enabled)) => {
                        self.controller.set_source_enabled(source, enabled);
                        println!(
                            "{} is now {}.",
                            source.label(),
                            if enabled { "visible to the assistant" } else { "hidden" }
                        );
                    }
                    _ => println!("Usage: /privacy <recipes|shopping|meals> <on|off>"),
                }
            }
            _ => println!("Unknown command. Type /help for the list."),
        }
        false
    }
}
