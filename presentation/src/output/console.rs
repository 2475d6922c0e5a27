//! Console output formatter for session state

use colored::Colorize;
use mcp_chat_application::{BootstrapReport, SessionSnapshot};
use mcp_chat_domain::{Message, Model, Role, Thread, ThreadId, first_line, truncate};

/// Width used when a message is shown on a single line
const PREVIEW_WIDTH: usize = 60;

/// Formats threads, timelines and catalog listings for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a thread's timeline, one block per message
    pub fn format_timeline(timeline: &[Message]) -> String {
        if timeline.is_empty() {
            return format!("{}\n", "(no messages yet)".dimmed());
        }

        let mut output = String::new();
        for message in timeline {
            output.push_str(&Self::format_message(message));
            output.push('\n');
        }
        output
    }

    pub fn format_message(message: &Message) -> String {
        let label = match message.role() {
            Role::Human => "you".green().bold(),
            Role::Assistant => "assistant".cyan().bold(),
            Role::Tool => "tool".magenta().bold(),
        };
        let pending = if message.is_pending() {
            format!(" {}", "(sending)".yellow())
        } else {
            String::new()
        };

        let content = match message.role() {
            // Tool output can be large; the first line is enough to follow along
            Role::Tool => truncate(first_line(message.content()), PREVIEW_WIDTH),
            Role::Human | Role::Assistant => message.content().to_string(),
        };

        format!("{}{}\n{}\n", label, pending, content)
    }

    /// Format the thread list, marking the active thread
    pub fn format_threads(threads: &[Thread], active: Option<&ThreadId>) -> String {
        if threads.is_empty() {
            return format!("{}\n", "No threads. Type a message or /new to start one.".dimmed());
        }

        let mut output = format!("{}\n", "Threads:".cyan().bold());
        for thread in threads {
            let marker = if Some(thread.id()) == active {
                "*".green().bold().to_string()
            } else {
                " ".to_string()
            };
            let local = if thread.is_local_only() {
                format!(" {}", "(local)".dimmed())
            } else {
                String::new()
            };
            output.push_str(&format!(
                " {} {}  {}{}  {}\n",
                marker,
                thread.display_name().bold(),
                thread.id().as_str().dimmed(),
                local,
                thread
                    .last_activity()
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .dimmed()
            ));
        }
        output
    }

    pub fn format_models(models: &[Model], selected: &Model) -> String {
        let mut output = format!("{}\n", "Models:".cyan().bold());
        if models.is_empty() {
            output.push_str(&format!(
                "  {} (backend list not loaded)\n",
                selected.as_str().green()
            ));
            return output;
        }
        for model in models {
            if model == selected {
                output.push_str(&format!("  * {}\n", model.as_str().green().bold()));
            } else {
                output.push_str(&format!("    {}\n", model));
            }
        }
        output
    }

    pub fn format_servers(servers: &[String]) -> String {
        if servers.is_empty() {
            return format!("{}\n", "No tool servers registered.".dimmed());
        }
        let mut output = format!("{}\n", "Tool servers:".cyan().bold());
        for server in servers {
            output.push_str(&format!("  - {}\n", server));
        }
        output
    }

    /// One-line summary of the session, shown after startup and by /show
    pub fn format_status(snapshot: &SessionSnapshot) -> String {
        let active = snapshot
            .active_thread_id
            .as_ref()
            .and_then(|id| snapshot.threads.iter().find(|t| t.id() == id))
            .map(|t| t.display_name().to_string())
            .unwrap_or_else(|| "none".to_string());

        format!(
            "{} {}  {} {}  {} {}  {} {}\n",
            "thread:".cyan(),
            active,
            "model:".cyan(),
            snapshot.selected_model,
            "threads:".cyan(),
            snapshot.threads.len(),
            "servers:".cyan(),
            snapshot.known_servers.len()
        )
    }

    /// Warnings for listings that failed to load at startup
    pub fn format_bootstrap(report: &BootstrapReport) -> String {
        let mut output = String::new();
        for (what, result) in [
            ("threads", &report.threads),
            ("models", &report.models),
            ("tool servers", &report.servers),
        ] {
            if let Err(e) = result {
                output.push_str(&format!(
                    "{} could not load {}: {}\n",
                    "warning:".yellow().bold(),
                    what,
                    e
                ));
            }
        }
        output
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "error:".red().bold(), message)
    }

    pub fn notice(message: &str) -> String {
        format!("{} {}", "->".cyan(), message)
    }
}
