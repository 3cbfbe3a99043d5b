//! Progress reporting for exploration runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use scout_application::ExplorationProgressNotifier;
use scout_domain::{Brief, ExplorationStatus, Task, TaskStatus};
use std::sync::Mutex;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(120);

/// One line describing where a task currently stands.
pub fn task_line(task: &Task) -> String {
    let state = match task.status() {
        TaskStatus::Pending => "queued".dimmed().to_string(),
        TaskStatus::Started | TaskStatus::Progress => task
            .events()
            .last()
            .map(|event| event.summary())
            .unwrap_or_else(|| "starting".to_string()),
        TaskStatus::Complete => format!("{} done", "v".green()),
        TaskStatus::Error => match task.error() {
            Some(failure) => format!("{} {}", "x".red(), failure),
            None => format!("{} failed", "x".red()),
        },
    };

    match task.live_view_url() {
        Some(url) if !task.is_terminal() => format!("{} {} {}", state, "live:".dimmed(), url),
        _ => state,
    }
}

/// Reports progress with one spinner per browsing task
pub struct ProgressReporter {
    multi: MultiProgress,
    status_bar: ProgressBar,
    task_bars: Mutex<Vec<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let multi = MultiProgress::new();
        let status_bar = multi.add(ProgressBar::new_spinner());
        status_bar.set_style(Self::status_style());
        status_bar.set_prefix("Exploration");
        status_bar.enable_steady_tick(TICK);
        Self {
            multi,
            status_bar,
            task_bars: Mutex::new(Vec::new()),
        }
    }

    fn status_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn task_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("  {spinner:.blue} {prefix:.bold} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, index: usize, f: impl FnOnce(&ProgressBar)) {
        if let Ok(bars) = self.task_bars.lock()
            && let Some(bar) = bars.get(index)
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorationProgressNotifier for ProgressReporter {
    fn on_status_change(&self, status: ExplorationStatus) {
        self.status_bar.set_message(status.display_name().to_string());
    }

    fn on_plan_ready(&self, goal: Option<&str>, tasks: &[Task]) {
        if let Some(goal) = goal {
            let _ = self.multi.println(format!("{} {}", "Goal:".cyan().bold(), goal));
        }

        let Ok(mut bars) = self.task_bars.lock() else {
            return;
        };
        for task in tasks {
            let bar = self.multi.add(ProgressBar::new_spinner());
            bar.set_style(Self::task_style());
            bar.set_prefix(format!("[{}] {}", task.id(), task.site()));
            bar.set_message(task_line(task));
            bar.enable_steady_tick(TICK);
            bars.push(bar);
        }
    }

    fn on_task_update(&self, index: usize, task: &Task) {
        self.with_bar(index, |bar| {
            if task.is_terminal() {
                bar.finish_with_message(task_line(task));
            } else {
                bar.set_message(task_line(task));
            }
        });
    }

    fn on_budget_exceeded(&self, running: usize) {
        let _ = self.multi.println(format!(
            "{} time budget reached, stopping {} unfinished task(s)",
            "!".yellow().bold(),
            running
        ));
    }

    fn on_brief_ready(&self, brief: &Brief) {
        self.status_bar.finish_with_message(format!(
            "{} brief ready ({} finding(s))",
            "v".green(),
            brief.top_findings.len()
        ));
    }

    fn on_failed(&self, cause: &str) {
        if let Ok(bars) = self.task_bars.lock() {
            bars.iter().filter(|bar| !bar.is_finished()).for_each(ProgressBar::abandon);
        }
        self.status_bar
            .abandon_with_message(format!("{} {}", "x".red(), cause));
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ExplorationProgressNotifier for SimpleProgress {
    fn on_status_change(&self, status: ExplorationStatus) {
        eprintln!("{} {}", "->".cyan(), status.display_name().bold());
    }

    fn on_plan_ready(&self, goal: Option<&str>, tasks: &[Task]) {
        if let Some(goal) = goal {
            eprintln!("   Goal: {}", goal);
        }
        for task in tasks {
            eprintln!("   [{}] {}: {}", task.id(), task.site(), task.instructions());
        }
    }

    fn on_task_update(&self, _index: usize, task: &Task) {
        if task.is_terminal() {
            eprintln!("   [{}] {}", task.id(), task_line(task));
        }
    }

    fn on_budget_exceeded(&self, running: usize) {
        eprintln!("   time budget reached, stopping {} task(s)", running);
    }

    fn on_failed(&self, cause: &str) {
        eprintln!("{} {}", "x".red(), cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scout_domain::{Event, EventKind, Payload, Site, TaskId};
    use serde_json::json;

    fn task() -> Task {
        Task::new(
            TaskId::for_index(0),
            Site::parse("https://news.ycombinator.com").unwrap(),
            "Find AI stories",
        )
    }

    fn event(kind: EventKind, payload: serde_json::Value) -> Event {
        let payload: Payload = payload.as_object().cloned().unwrap();
        Event::new(kind, Utc::now(), payload)
    }

    #[test]
    fn test_pending_task_is_queued() {
        colored::control::set_override(false);
        assert_eq!(task_line(&task()), "queued");
    }

    #[test]
    fn test_running_task_shows_latest_event_and_live_view() {
        colored::control::set_override(false);
        let mut task = task();
        task.apply_event(event(
            EventKind::Progress,
            json!({"streamingUrl": "https://live.example/abc", "message": "Opening page"}),
        ));

        let line = task_line(&task);
        assert!(line.contains("Opening page"));
        assert!(line.ends_with("live: https://live.example/abc"));
    }

    #[test]
    fn test_terminal_lines() {
        colored::control::set_override(false);
        let mut done = task();
        done.apply_event(event(EventKind::Complete, json!({"status": "COMPLETED", "result": "ok"})));
        assert_eq!(task_line(&done), "v done");

        let mut failed = task();
        failed.apply_event(Event::synthetic_error("timeout", "no event received for 120s"));
        let line = task_line(&failed);
        assert!(line.starts_with("x "));
        assert!(line.contains("no event received for 120s"));
    }
}
