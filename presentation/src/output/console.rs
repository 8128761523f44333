//! Console output formatter for chats

use colored::Colorize;
use raimon_domain::{Focus, Message, Model, Role, Session};

/// Formats transcripts, chat lists and selectors for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The R.A.I.M.O.N. banner
    pub fn banner() -> String {
        let mut output = String::new();
        output.push_str(&Self::header("R.A.I.M.O.N"));
        output.push_str(&format!(
            "{}\n",
            "Reasoning Artificial Intelligence for Mentorship, Orientation, and Nudging".bold()
        ));
        output.push_str(&Self::footer());
        output
    }

    /// Format a transcript for display, hiding the system message
    pub fn format_transcript(messages: &[Message]) -> String {
        let mut output = String::new();
        for message in messages.iter().filter(|m| m.role != Role::System) {
            let speaker = match message.role {
                Role::User => "Você".cyan().bold(),
                _ => "R.A.I.M.O.N.".yellow().bold(),
            };
            output.push_str(&format!("\n{}\n{}\n", speaker, message.content));
        }
        if output.is_empty() {
            output.push_str(&format!("{}\n", "(conversa vazia)".dimmed()));
        }
        output
    }

    /// Numbered chat titles, most recent first
    ///
    /// `*` marks the chat loaded in the session; `[menu]` marks titles
    /// whose action menu is open.
    pub fn format_chat_list(titles: &[String], session: &Session, active_title: &str) -> String {
        let mut output = Self::section_header("Conversas");
        if titles.is_empty() {
            output.push_str("  (nenhuma conversa salva)\n");
            return output;
        }

        for (i, title) in titles.iter().enumerate() {
            let marker = if !active_title.is_empty() && title == active_title {
                "*".green().bold().to_string()
            } else {
                " ".to_string()
            };
            let menu = if session.is_menu_open(title) {
                format!(" {}", "[menu: /delete or /cancel]".red())
            } else {
                String::new()
            };
            output.push_str(&format!("{} {:>2}. {}{}\n", marker, i + 1, title, menu));
        }
        output
    }

    /// The model selector with the current choice marked
    pub fn format_models(current: &Model) -> String {
        let mut output = Self::section_header("Selecione o modelo:");
        for (i, model) in Model::choices().iter().enumerate() {
            output.push_str(&Self::choice_line(i + 1, model.as_str(), model == current));
        }
        if !current.is_builtin() {
            output.push_str(&format!("  (em uso: {})\n", current));
        }
        output
    }

    /// The focus selector with the current choice marked
    pub fn format_focus(current: Focus) -> String {
        let mut output = Self::section_header("Selecione o foco do R.A.I.M.O.N.:");
        for (i, focus) in Focus::all().iter().enumerate() {
            output.push_str(&Self::choice_line(i + 1, focus.label(), *focus == current));
        }
        output
    }

    fn choice_line(index: usize, label: &str, selected: bool) -> String {
        if selected {
            format!("  {} {}. {}\n", ">".green().bold(), index, label.green())
        } else {
            format!("    {}. {}\n", index, label)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{}\n{}\n", line.cyan(), title.cyan().bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}
