//! Console output formatter for finished explorations

use colored::Colorize;
use scout_domain::{Brief, ChatContext, Exploration, ExplorationStatus, OutputFormat, Task, TaskStatus};

/// Formats explorations for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render in the requested format
    pub fn render(exploration: &Exploration, format: OutputFormat) -> String {
        match format {
            OutputFormat::Brief => Self::format_brief(exploration),
            OutputFormat::Full => Self::format_full(exploration),
            OutputFormat::Json => Self::format_json(exploration),
        }
    }

    /// The brief only (concise output)
    pub fn format_brief(exploration: &Exploration) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Intelligence Brief ===".cyan().bold()));
        output.push_str(&format!("{} {}\n", "Topics:".bold(), exploration.topics()));
        if let Some(goal) = exploration.goal() {
            output.push_str(&format!("{} {}\n", "Goal:".bold(), goal));
        }
        output.push('\n');

        match exploration.brief() {
            Some(brief) => output.push_str(&Self::brief_body(brief)),
            None => output.push_str(&Self::failure_line(exploration)),
        }

        output
    }

    /// The brief plus every task with its outcome and live-view link
    pub fn format_full(exploration: &Exploration) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Parallel Scout Results"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topics:".cyan().bold(), exploration.topics()));
        output.push_str(&format!(
            "{} {} / {} min\n",
            "Depth:".cyan().bold(),
            exploration.config().depth(),
            exploration.config().time_budget_minutes()
        ));
        if let Some(goal) = exploration.goal() {
            output.push_str(&format!("{} {}\n", "Goal:".cyan().bold(), goal));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Status:".cyan().bold(),
            Self::status_label(exploration.status())
        ));

        output.push_str(&Self::section_header(&format!(
            "Tasks ({}/{} complete)",
            exploration.count_tasks(TaskStatus::Complete),
            exploration.tasks().len()
        )));
        for task in exploration.tasks() {
            output.push_str(&Self::task_block(task));
        }

        output.push_str(&Self::section_header("Brief"));
        match exploration.brief() {
            Some(brief) => output.push_str(&Self::brief_body(brief)),
            None => output.push_str(&Self::failure_line(exploration)),
        }

        output.push_str(&Self::footer());
        output
    }

    /// The whole exploration as JSON
    pub fn format_json(exploration: &Exploration) -> String {
        serde_json::to_string_pretty(exploration).unwrap_or_else(|_| "{}".to_string())
    }

    /// The brief a chat session is about
    pub fn format_context(context: &ChatContext) -> String {
        let mut output = String::new();
        if let Some(goal) = &context.goal {
            output.push_str(&format!("{} {}\n\n", "Goal:".bold(), goal));
        }
        output.push_str(&Self::brief_body(&context.brief));
        output
    }

    fn brief_body(brief: &Brief) -> String {
        let mut output = String::new();

        if brief.top_findings.is_empty() {
            output.push_str(&format!("{}\n", "No findings.".dimmed()));
        } else {
            output.push_str(&format!("{}\n", "Top Findings:".green().bold()));
            for (i, finding) in brief.top_findings.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, finding.title.bold()));
                if let Some(summary) = &finding.summary {
                    output.push_str(&format!("{}\n", Self::indent(summary, "     ")));
                }
                if let Some(why) = &finding.why_it_matters {
                    output.push_str(&format!("     {} {}\n", "Why it matters:".dimmed(), why));
                }
                if let Some(link) = &finding.source_link {
                    output.push_str(&format!("     {}\n", link.blue().underline()));
                }
            }
        }

        Self::push_list(&mut output, "Insights:", &brief.insights);
        Self::push_list(&mut output, "Opportunities:", &brief.opportunities);
        Self::push_list(&mut output, "Sources:", &brief.sources);
        output
    }

    fn push_list(output: &mut String, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        output.push_str(&format!("\n{}\n", title.cyan().bold()));
        for item in items {
            output.push_str(&format!("  * {}\n", item));
        }
    }

    fn task_block(task: &Task) -> String {
        let heading = format!("── [{}] {} ──", task.id(), task.site());
        let heading = match task.status() {
            TaskStatus::Complete => heading.green().bold(),
            TaskStatus::Error => heading.red().bold(),
            _ => heading.yellow().bold(),
        };

        let mut output = format!("\n{}\n{}\n", heading, task.instructions());
        if let Some(url) = task.live_view_url() {
            output.push_str(&format!("{} {}\n", "Live view:".dimmed(), url));
        }
        match (task.status(), task.error()) {
            (TaskStatus::Error, Some(failure)) => {
                output.push_str(&format!("{} {}\n", "Error:".red(), failure));
            }
            _ => {
                if let Some(text) = task.result_text() {
                    output.push_str(&format!("{}\n", Self::indent(&text, "  ")));
                }
            }
        }
        output
    }

    fn status_label(status: ExplorationStatus) -> String {
        match status {
            ExplorationStatus::Done => status.display_name().green().to_string(),
            ExplorationStatus::Failed => status.display_name().red().to_string(),
            _ => status.display_name().yellow().to_string(),
        }
    }

    fn failure_line(exploration: &Exploration) -> String {
        match exploration.failure() {
            Some(failure) => format!("{} Exploration {}\n", "Error:".red().bold(), failure),
            None => format!("{}\n", "No brief was produced.".dimmed()),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_domain::{ExplorationConfig, Finding, TopicSet};

    fn done_exploration() -> Exploration {
        let mut exploration = Exploration::new(
            "exp-1",
            TopicSet::new(["rust"]).unwrap(),
            ExplorationConfig::default(),
        );
        exploration
            .begin_browsing(Some("Track the Rust ecosystem".to_string()), vec![])
            .unwrap();
        exploration.begin_synthesis().unwrap();
        exploration
            .finish(Brief {
                top_findings: vec![Finding {
                    title: "Async traits stabilised".to_string(),
                    summary: Some("Native async fn in traits".to_string()),
                    why_it_matters: None,
                    source_link: Some("https://blog.rust-lang.org".to_string()),
                }],
                insights: vec!["Ecosystem is converging".to_string()],
                opportunities: vec![],
                sources: vec!["https://blog.rust-lang.org".to_string()],
            })
            .unwrap();
        exploration
    }

    #[test]
    fn test_brief_lists_findings_and_sections() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_brief(&done_exploration());
        assert!(output.contains("Goal: Track the Rust ecosystem"));
        assert!(output.contains("1. Async traits stabilised"));
        assert!(output.contains("Native async fn in traits"));
        assert!(output.contains("Insights:"));
        assert!(!output.contains("Opportunities:"));
    }

    #[test]
    fn test_failed_exploration_shows_cause() {
        colored::control::set_override(false);
        let mut exploration = Exploration::new(
            "exp-2",
            TopicSet::new(["rust"]).unwrap(),
            ExplorationConfig::default(),
        );
        exploration.fail("planning service unavailable").unwrap();

        let output = ConsoleFormatter::format_full(&exploration);
        assert!(output.contains("planning service unavailable"));
        assert!(output.contains("Tasks (0/0 complete)"));
    }

    #[test]
    fn test_json_round_trips_status() {
        let json = ConsoleFormatter::render(&done_exploration(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "exp-1");
        assert!(value["brief"]["top_findings"].is_array());
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
