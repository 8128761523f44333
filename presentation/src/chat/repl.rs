//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::{ConsoleFormatter, PlainPrinter, ReplConfig, StreamPrinter};
use colored::Colorize;
use raimon_application::{ChatSelection, ConversationController, TurnObserver, TurnOutcome};
use raimon_domain::{Focus, Model, Session, derive_chat_title};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::debug;

/// One parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Prompt(String),
    New,
    Chats,
    Open(String),
    Menu(String),
    Delete(String),
    Cancel(String),
    Model(Option<String>),
    Focus(Option<String>),
    History,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line. Blank lines yield `None`.
    ///
    /// Prompts are kept exactly as typed. A leading `//` sends the rest of
    /// the line, starting with a single `/`, as a prompt.
    pub fn parse(raw: &str) -> Option<Self> {
        let line = raw.trim();
        if line.is_empty() {
            return None;
        }
        if let Some(escaped) = line.strip_prefix("//") {
            return Some(ReplCommand::Prompt(format!("/{}", escaped)));
        }
        if !line.starts_with('/') {
            return Some(ReplCommand::Prompt(raw.to_string()));
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        let optional = (!arg.is_empty()).then(|| arg.to_string());

        Some(match name {
            "/new" | "/n" => ReplCommand::New,
            "/chats" | "/ls" => ReplCommand::Chats,
            "/open" | "/o" => ReplCommand::Open(arg.to_string()),
            "/menu" => ReplCommand::Menu(arg.to_string()),
            "/delete" | "/rm" => ReplCommand::Delete(arg.to_string()),
            "/cancel" => ReplCommand::Cancel(arg.to_string()),
            "/model" => ReplCommand::Model(optional),
            "/focus" => ReplCommand::Focus(optional),
            "/history" => ReplCommand::History,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(name.to_string()),
        })
    }
}

/// Resolve `#n` (1-based) against `items`; anything else is returned as-is.
fn resolve_index<'a>(arg: &'a str, items: &'a [String]) -> Option<&'a str> {
    match arg.strip_prefix('#').map(str::parse::<usize>) {
        Some(Ok(n)) => n.checked_sub(1).and_then(|i| items.get(i)).map(String::as_str),
        _ => Some(arg),
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: ConversationController,
    session: Session,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: ConversationController, session: Session) -> Self {
        Self {
            controller,
            session,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(path) = &self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("Fale com o R.A.I.M.O.N. > ") {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line.trim());

                    if self.handle_line(&line).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Até logo!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(path) = &self.config.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Handle one line of input. Returns true if the REPL should exit.
    pub async fn handle_line(&mut self, line: &str) -> bool {
        let Some(command) = ReplCommand::parse(line) else {
            return false;
        };
        debug!("REPL command: {:?}", command);

        match command {
            ReplCommand::Prompt(prompt) => self.process_prompt(&prompt).await,
            ReplCommand::New => self.open_chat(""),
            ReplCommand::Chats => self.print_chats(),
            ReplCommand::Open(arg) => {
                if let Some(title) = self.resolve_title("/open", &arg) {
                    self.open_chat(&title);
                }
            }
            ReplCommand::Menu(arg) => {
                if let Some(title) = self.resolve_title("/menu", &arg) {
                    if self.session.toggle_menu(&title) {
                        println!(
                            "Menu de \"{}\": /delete {} para excluir, /cancel {} para fechar",
                            title, arg, arg
                        );
                    } else {
                        println!("Menu de \"{}\" fechado", title);
                    }
                }
            }
            ReplCommand::Delete(arg) => {
                if let Some(title) = self.resolve_title("/delete", &arg) {
                    self.delete_chat(&title);
                }
            }
            ReplCommand::Cancel(arg) => {
                if let Some(title) = self.resolve_title("/cancel", &arg) {
                    self.session.close_menu(&title);
                }
            }
            ReplCommand::Model(choice) => self.select_model(choice.as_deref()),
            ReplCommand::Focus(choice) => self.select_focus(choice.as_deref()),
            ReplCommand::History => {
                print!(
                    "{}",
                    ConsoleFormatter::format_transcript(self.session.messages())
                );
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::Quit => {
                println!("Até logo!");
                return true;
            }
            ReplCommand::Unknown(name) => {
                println!("Unknown command: {}", name);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn print_welcome(&self) {
        println!();
        print!("{}", ConsoleFormatter::banner());
        println!(
            "Modelo: {}   Foco: {}",
            self.session.model().to_string().green(),
            self.session.focus().label().green()
        );
        self.print_help();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /new                 - Start a new chat");
        println!("  /chats               - List saved chats (most recent first)");
        println!("  /open <title|#n>     - Continue a saved chat");
        println!("  /menu <title|#n>     - Toggle the actions menu of a chat");
        println!("  /delete <title|#n>   - Delete a chat (its menu must be open)");
        println!("  /cancel <title|#n>   - Close the actions menu of a chat");
        println!("  /model [name|#n]     - Show or select the model");
        println!("  /focus [name|#n]     - Show or select the focus");
        println!("  /history             - Show the current chat");
        println!("  /help, /h, /?        - Show this help");
        println!("  /quit, /exit, /q     - Exit");
        println!("  //text               - Send \"/text\" as a prompt");
        println!();
    }

    fn chat_titles(&self) -> Vec<String> {
        match self.controller.store().chat_titles() {
            Ok(titles) => titles,
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                Vec::new()
            }
        }
    }

    fn resolve_title(&self, command: &str, arg: &str) -> Option<String> {
        if arg.is_empty() {
            println!("Usage: {} <title|#n>", command);
            return None;
        }
        let titles = self.chat_titles();
        let resolved = resolve_index(arg, &titles).map(str::to_string);
        if resolved.is_none() {
            println!("No chat number {} (see /chats)", arg);
        }
        resolved
    }

    fn print_chats(&self) {
        let titles = self.chat_titles();
        let active = derive_chat_title(self.session.messages());
        print!(
            "{}",
            ConsoleFormatter::format_chat_list(&titles, &self.session, &active)
        );
    }

    fn open_chat(&mut self, title: &str) {
        match self.controller.select_chat(&mut self.session, title) {
            Ok(ChatSelection::NewChat) => println!("{}", "+ New Chat".green()),
            Ok(ChatSelection::Loaded { chat_title, .. }) => {
                println!("{} {}", "Conversa:".cyan().bold(), chat_title);
                print!(
                    "{}",
                    ConsoleFormatter::format_transcript(self.session.messages())
                );
            }
            Ok(ChatSelection::NotFound) => println!("No chat titled \"{}\"", title),
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
    }

    fn delete_chat(&mut self, title: &str) {
        if !self.session.is_menu_open(title) {
            println!("Open the menu first: /menu {}", title);
            return;
        }
        match self.controller.delete_chat(&mut self.session, title) {
            Some(file_name) => println!("Deleted \"{}\" ({})", title, file_name),
            None => println!("Nothing deleted for \"{}\"", title),
        }
    }

    fn select_model(&mut self, choice: Option<&str>) {
        let Some(choice) = choice else {
            print!("{}", ConsoleFormatter::format_models(self.session.model()));
            return;
        };

        let choices = Model::choices();
        let names: Vec<String> = choices.iter().map(|m| m.to_string()).collect();
        match resolve_index(choice, &names).and_then(|name| {
            choices.iter().find(|m| m.as_str() == name).cloned()
        }) {
            Some(model) => {
                println!("Modelo: {}", model.to_string().green());
                self.session.set_model(model);
            }
            None => println!("Unknown model: {} (choose {})", choice, names.join(" or ")),
        }
    }

    fn select_focus(&mut self, choice: Option<&str>) {
        let Some(choice) = choice else {
            print!("{}", ConsoleFormatter::format_focus(self.session.focus()));
            return;
        };

        let labels: Vec<String> = Focus::all().iter().map(|f| f.label().to_string()).collect();
        let parsed = resolve_index(choice, &labels).map(str::parse::<Focus>);
        match parsed {
            Some(Ok(focus)) => {
                println!("Foco: {}", focus.label().green());
                self.session.set_focus(focus);
            }
            Some(Err(e)) => println!("{}", e),
            None => println!("No focus number {}", choice),
        }
    }

    async fn process_prompt(&mut self, prompt: &str) {
        println!();

        let observer: Box<dyn TurnObserver> = if self.config.show_progress {
            Box::new(StreamPrinter::new())
        } else {
            Box::new(PlainPrinter)
        };

        match self
            .controller
            .submit_prompt(&mut self.session, prompt, observer.as_ref())
            .await
        {
            Ok(TurnOutcome::Completed { file_name, .. }) => {
                if let Some(file_name) = file_name {
                    debug!("Saved as {}", file_name);
                }
            }
            Ok(TurnOutcome::Skipped) => {}
            Err(e) => eprintln!("{} {}", "Error:".red(), e),
        }
        println!();
    }
}
