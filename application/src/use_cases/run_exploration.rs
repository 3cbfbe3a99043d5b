//! Run Exploration use case
//!
//! Orchestrates the full exploration flow: plan, browse every task
//! concurrently under the time budget, then synthesize a brief.

use super::plan_exploration::Planner;
use super::run_task::{TaskRunner, TaskUpdate};
use super::synthesize_brief::Synthesizer;
use crate::config::ExplorationParams;
use crate::ports::browser_automation::{BrowseRequest, BrowserAutomation};
use crate::ports::exploration_logger::{
    ExplorationLogEvent, ExplorationLogger, NoExplorationLogger,
};
use crate::ports::progress::{ExplorationProgressNotifier, NoProgress};
use scout_domain::{
    DomainError, Event, Exploration, ExplorationConfig, ExplorationStatus, FailureKind, Task,
    TopicSet,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Errors that prevent an exploration from being created.
///
/// Planning and synthesis failures are not errors here: they end the
/// returned exploration in FAILED with the cause recorded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunExplorationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Input for the RunExploration use case
#[derive(Debug, Clone)]
pub struct RunExplorationInput {
    pub topics: Vec<String>,
    pub config: ExplorationConfig,
}

impl RunExplorationInput {
    pub fn new<I, S>(topics: I, config: ExplorationConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topics: topics.into_iter().map(Into::into).collect(),
            config,
        }
    }
}

/// Exploration orchestrator
///
/// The only writer of [`Exploration`] state. Task runners execute
/// concurrently and report snapshots through a channel.
pub struct RunExplorationUseCase {
    planner: Planner,
    synthesizer: Synthesizer,
    browser: Arc<dyn BrowserAutomation>,
    params: ExplorationParams,
    logger: Arc<dyn ExplorationLogger>,
}

impl RunExplorationUseCase {
    pub fn new(
        planner: Planner,
        synthesizer: Synthesizer,
        browser: Arc<dyn BrowserAutomation>,
    ) -> Self {
        Self {
            planner,
            synthesizer,
            browser,
            params: ExplorationParams::default(),
            logger: Arc::new(NoExplorationLogger),
        }
    }

    pub fn with_params(mut self, params: ExplorationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ExplorationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunExplorationInput,
    ) -> Result<Exploration, RunExplorationError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Returns the exploration in DONE or FAILED.
    pub async fn execute_with_progress(
        &self,
        input: RunExplorationInput,
        progress: &dyn ExplorationProgressNotifier,
    ) -> Result<Exploration, RunExplorationError> {
        let topics = TopicSet::new(input.topics)?;
        let id = uuid::Uuid::new_v4().to_string();
        let mut exploration = Exploration::new(id, topics, input.config);

        info!(
            id = %exploration.id(),
            depth = %input.config.depth(),
            budget_minutes = input.config.time_budget_minutes(),
            "Starting exploration: {}",
            exploration.topics().joined()
        );
        self.logger.log(ExplorationLogEvent::new(
            exploration.id(),
            "exploration_started",
            json!({
                "topics": exploration.topics(),
                "config": exploration.config(),
            }),
        ));
        progress.on_status_change(ExplorationStatus::Planning);

        // Phase 1: Planning
        let planned = match self.planner.plan(exploration.topics(), &input.config).await {
            Ok(planned) => planned,
            Err(e) => {
                error!("Planning failed: {}", e);
                self.fail(&mut exploration, e.to_string(), progress);
                return Ok(exploration);
            }
        };
        self.logger.log(ExplorationLogEvent::new(
            exploration.id(),
            "plan",
            json!({
                "goal": planned.goal,
                "tasks": planned.tasks.iter().map(|t| json!({
                    "id": t.id(),
                    "site": t.site(),
                    "instructions": t.instructions(),
                })).collect::<Vec<_>>(),
            }),
        ));
        exploration.begin_browsing(planned.goal, planned.tasks)?;
        progress.on_plan_ready(exploration.goal(), exploration.tasks());
        progress.on_status_change(ExplorationStatus::Browsing);

        // Phase 2: Browsing
        self.browse(&mut exploration, progress).await;

        // Phase 3: Synthesis
        exploration.begin_synthesis()?;
        progress.on_status_change(ExplorationStatus::Synthesizing);
        let findings = exploration.findings();
        info!(
            "Browsing finished: {}/{} task(s) succeeded",
            findings.len(),
            exploration.tasks().len()
        );

        let topics = exploration.topics().as_slice().to_vec();
        let goal = exploration.goal().map(str::to_string);
        match self
            .synthesizer
            .synthesize(&topics, goal.as_deref(), findings)
            .await
        {
            Ok(brief) => {
                self.logger.log(ExplorationLogEvent::new(
                    exploration.id(),
                    "brief",
                    json!(brief),
                ));
                progress.on_brief_ready(&brief);
                exploration.finish(brief)?;
                progress.on_status_change(ExplorationStatus::Done);
                info!(id = %exploration.id(), "Exploration done");
            }
            Err(e) => {
                error!("Synthesis failed: {}", e);
                self.fail(&mut exploration, e.to_string(), progress);
            }
        }

        Ok(exploration)
    }

    /// Run every task to a terminal state, bounded by the concurrency limit
    /// and the overall time budget.
    async fn browse(&self, exploration: &mut Exploration, progress: &dyn ExplorationProgressNotifier) {
        let budget = exploration.config().time_budget();
        let deadline = Instant::now() + budget;
        let cancel = CancellationToken::new();
        let semaphore = Arc::new(Semaphore::new(self.params.max_concurrent_tasks.max(1)));
        let budget_message = format!(
            "time budget of {} minute(s) exceeded",
            exploration.config().time_budget_minutes()
        );

        let (tx, mut rx) = mpsc::channel::<TaskUpdate>(64);
        let mut join_set = JoinSet::new();

        for (index, task) in exploration.tasks().iter().cloned().enumerate() {
            let request = BrowseRequest::new(task.site().clone(), task.instructions())
                .with_profile(self.params.browser_profile)
                .with_proxy_country(self.params.proxy_country.clone());
            let runner = TaskRunner::new(index, task, self.params.inactivity_timeout)
                .with_cancellation(cancel.child_token(), budget_message.clone());
            let browser = Arc::clone(&self.browser);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();
            let tx = tx.clone();
            let budget_message = budget_message.clone();

            join_set.spawn(async move {
                let permit = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    permit = semaphore.acquire_owned() => permit.ok(),
                };
                let Some(_permit) = permit else {
                    // Never launched: the budget ran out while queued
                    let mut runner = runner;
                    runner.terminate(FailureKind::BudgetExceeded, budget_message);
                    let _ = tx.send((index, runner.task().clone())).await;
                    return;
                };
                runner.run(browser.as_ref(), &request, &tx).await;
            });
        }
        drop(tx);

        let sleep = tokio::time::sleep_until(deadline);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep, if !cancel.is_cancelled() => {
                    let running = exploration.tasks().iter().filter(|t| !t.is_terminal()).count();
                    warn!("Time budget of {:?} exceeded with {} task(s) still running", budget, running);
                    progress.on_budget_exceeded(running);
                    cancel.cancel();
                }
                update = rx.recv() => match update {
                    Some((index, task)) => self.apply_update(exploration, index, task, progress),
                    None => break,
                },
            }
        }

        while let Some(result) = join_set.join_next().await {
            if let Err(e) = result {
                warn!("Task runner join error: {}", e);
            }
        }

        // A runner that panicked never sent its terminal snapshot
        let unfinished: Vec<(usize, Task)> = exploration
            .tasks()
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_terminal())
            .map(|(i, t)| (i, t.clone()))
            .collect();
        for (index, mut task) in unfinished {
            task.apply_event(Event::synthetic_error(
                FailureKind::Connection.as_str(),
                "task runner stopped unexpectedly",
            ));
            self.apply_update(exploration, index, task, progress);
        }
    }

    fn apply_update(
        &self,
        exploration: &mut Exploration,
        index: usize,
        task: Task,
        progress: &dyn ExplorationProgressNotifier,
    ) {
        let previous_events = exploration
            .tasks()
            .get(index)
            .map(|t| t.events().len())
            .unwrap_or(0);

        match exploration.update_task(index, task) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Ignoring update for finished task {}", index);
                return;
            }
            Err(e) => {
                warn!("Rejected task update: {}", e);
                return;
            }
        }

        let task = &exploration.tasks()[index];
        for event in task.events().iter().skip(previous_events) {
            self.logger.log(
                ExplorationLogEvent::new(exploration.id(), "task_event", json!(event))
                    .for_task(task.id().as_str()),
            );
        }
        if task.is_terminal() {
            self.logger.log(
                ExplorationLogEvent::new(
                    exploration.id(),
                    "task_result",
                    json!({
                        "status": task.status(),
                        "live_view_url": task.live_view_url(),
                        "result": task.result(),
                        "error": task.error(),
                    }),
                )
                .for_task(task.id().as_str()),
            );
        }
        progress.on_task_update(index, task);
    }

    fn fail(
        &self,
        exploration: &mut Exploration,
        cause: String,
        progress: &dyn ExplorationProgressNotifier,
    ) {
        if let Err(e) = exploration.fail(cause.clone()) {
            warn!("Could not mark exploration failed: {}", e);
            return;
        }
        self.logger.log(ExplorationLogEvent::new(
            exploration.id(),
            "failure",
            json!({ "failure": exploration.failure() }),
        ));
        progress.on_failed(&cause);
        progress.on_status_change(ExplorationStatus::Failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::browser_automation::{BrowserError, FrameStream};
    use crate::ports::service::{
        PlanRequest, PlanningService, ServiceError, SynthesisRequest, SynthesisService,
    };
    use async_trait::async_trait;
    use scout_domain::{Depth, RawFrame, TaskStatus};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct MockPlanning {
        response: Result<String, ServiceError>,
    }

    #[async_trait]
    impl PlanningService for MockPlanning {
        async fn plan(&self, _request: &PlanRequest) -> Result<String, ServiceError> {
            self.response.clone()
        }
    }

    struct MockSynthesis {
        response: Result<String, ServiceError>,
        requests: Mutex<Vec<SynthesisRequest>>,
    }

    #[async_trait]
    impl SynthesisService for MockSynthesis {
        async fn synthesize(&self, request: &SynthesisRequest) -> Result<String, ServiceError> {
            self.requests.lock().unwrap().push(request.clone());
            self.response.clone()
        }
    }

    /// Frames per site; `silent` sites keep their stream open without
    /// sending anything after the scripted frames.
    #[derive(Default)]
    struct MockBrowser {
        scripts: HashMap<String, Vec<&'static str>>,
        silent: Vec<String>,
        open_senders: Mutex<Vec<mpsc::Sender<Result<RawFrame, BrowserError>>>>,
        tokens: Mutex<Vec<CancellationToken>>,
        max_active: Mutex<usize>,
        launches: Mutex<usize>,
    }

    impl MockBrowser {
        fn script(mut self, site: &str, frames: Vec<&'static str>) -> Self {
            self.scripts.insert(site.to_string(), frames);
            self
        }

        fn silent(mut self, site: &str) -> Self {
            self.silent.push(site.to_string());
            self
        }
    }

    #[async_trait]
    impl BrowserAutomation for MockBrowser {
        async fn launch(&self, request: &BrowseRequest) -> Result<FrameStream, BrowserError> {
            *self.launches.lock().unwrap() += 1;
            let frames = self
                .scripts
                .get(request.site.as_str())
                .cloned()
                .unwrap_or_default();
            let (tx, rx) = mpsc::channel(frames.len().max(1));
            for frame in frames {
                tx.try_send(Ok(RawFrame::data(frame))).unwrap();
            }
            if self.silent.iter().any(|s| s == request.site.as_str()) {
                self.open_senders.lock().unwrap().push(tx);
            }

            let token = CancellationToken::new();
            let mut tokens = self.tokens.lock().unwrap();
            tokens.push(token.clone());
            let active = tokens.iter().filter(|t| !t.is_cancelled()).count();
            let mut max_active = self.max_active.lock().unwrap();
            *max_active = (*max_active).max(active);

            Ok(FrameStream::new(rx, token))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        statuses: Mutex<Vec<ExplorationStatus>>,
        budget_exceeded: Mutex<Option<usize>>,
    }

    impl ExplorationProgressNotifier for RecordingProgress {
        fn on_status_change(&self, status: ExplorationStatus) {
            self.statuses.lock().unwrap().push(status);
        }

        fn on_budget_exceeded(&self, running: usize) {
            *self.budget_exceeded.lock().unwrap() = Some(running);
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<ExplorationLogEvent>>,
    }

    impl ExplorationLogger for RecordingLogger {
        fn log(&self, event: ExplorationLogEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    const BRIEF: &str = r#"{
        "top_findings": [{"title": "Agents ship", "source_link": "https://news.ycombinator.com/item?id=1"}],
        "insights": ["Tooling matters"],
        "opportunities": ["Build evals"]
    }"#;

    fn plan(sites: &[&str]) -> String {
        let tasks: Vec<_> = sites
            .iter()
            .map(|s| json!({"website": s, "instructions": "Find AI agent news"}))
            .collect();
        json!({"goal": "Find agent news", "tasks": tasks}).to_string()
    }

    struct Harness {
        use_case: RunExplorationUseCase,
        browser: Arc<MockBrowser>,
        synthesis: Arc<MockSynthesis>,
    }

    fn harness(
        plan: Result<String, ServiceError>,
        synthesis: Result<String, ServiceError>,
        browser: MockBrowser,
        params: ExplorationParams,
    ) -> Harness {
        let browser = Arc::new(browser);
        let synthesis = Arc::new(MockSynthesis {
            response: synthesis,
            requests: Mutex::new(Vec::new()),
        });
        let planner = Planner::new(Arc::new(MockPlanning { response: plan }))
            .with_limits(params.task_limits);
        let use_case = RunExplorationUseCase::new(
            planner,
            Synthesizer::new(synthesis.clone()),
            browser.clone(),
        )
        .with_params(params);
        Harness {
            use_case,
            browser,
            synthesis,
        }
    }

    fn input(depth: Depth, minutes: u32) -> RunExplorationInput {
        RunExplorationInput::new(["AI agents"], ExplorationConfig::new(depth, minutes).unwrap())
    }

    #[tokio::test]
    async fn test_shallow_exploration_reaches_done() {
        let h = harness(
            Ok(plan(&["https://news.ycombinator.com"])),
            Ok(BRIEF.to_string()),
            MockBrowser::default().script(
                "https://news.ycombinator.com",
                vec![
                    r#"{"type":"STARTED","runId":"run-1"}"#,
                    r#"{"type":"PROGRESS","liveViewUrl":"https://tetra.example/view/1"}"#,
                    r#"{"type":"COMPLETE","status":"COMPLETED","resultJson":{"summary":"Agents everywhere"}}"#,
                ],
            ),
            ExplorationParams::default(),
        );
        let progress = RecordingProgress::default();

        let exploration = h
            .use_case
            .execute_with_progress(input(Depth::Shallow, 5), &progress)
            .await
            .unwrap();

        assert_eq!(exploration.status(), ExplorationStatus::Done);
        assert_eq!(exploration.goal(), Some("Find agent news"));
        assert_eq!(exploration.tasks().len(), 1);
        let task = &exploration.tasks()[0];
        assert_eq!(task.status(), TaskStatus::Complete);
        assert_eq!(task.live_view_url(), Some("https://tetra.example/view/1"));

        let brief = exploration.brief().unwrap();
        assert!(brief.top_findings.len() <= 3);
        assert_eq!(brief.top_findings[0].title, "Agents ship");

        let requests = h.synthesis.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].findings.len(), 1);
        assert!(requests[0].findings[0].content.contains("Agents everywhere"));

        assert_eq!(
            *progress.statuses.lock().unwrap(),
            vec![
                ExplorationStatus::Planning,
                ExplorationStatus::Browsing,
                ExplorationStatus::Synthesizing,
                ExplorationStatus::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_record_tags_entries_with_exploration_and_task() {
        let h = harness(
            Ok(plan(&["https://news.ycombinator.com"])),
            Ok(BRIEF.to_string()),
            MockBrowser::default().script(
                "https://news.ycombinator.com",
                vec![
                    r#"{"type":"STARTED","runId":"run-1"}"#,
                    r#"{"type":"COMPLETE","status":"COMPLETED","resultJson":{"summary":"ok"}}"#,
                ],
            ),
            ExplorationParams::default(),
        );
        let logger = Arc::new(RecordingLogger::default());
        let use_case = h.use_case.with_logger(logger.clone());

        let exploration = use_case.execute(input(Depth::Shallow, 5)).await.unwrap();

        let events = logger.events.lock().unwrap();
        assert!(events.iter().all(|e| e.exploration_id == exploration.id()));
        let kinds: Vec<&str> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds.first(), Some(&"exploration_started"));
        assert_eq!(kinds.last(), Some(&"brief"));

        let task_kinds: Vec<&str> = events
            .iter()
            .filter(|e| e.task_id.as_deref() == Some("task-1"))
            .map(|e| e.kind)
            .collect();
        let recorded = exploration.tasks()[0].events().len();
        assert_eq!(task_kinds.len(), recorded + 1);
        assert!(task_kinds[..recorded].iter().all(|k| *k == "task_event"));
        assert_eq!(task_kinds.last(), Some(&"task_result"));
        assert!(
            events
                .iter()
                .filter(|e| matches!(e.kind, "plan" | "brief" | "exploration_started"))
                .all(|e| e.task_id.is_none())
        );
    }

    #[tokio::test]
    async fn test_malformed_frame_still_synthesizes() {
        let h = harness(
            Ok(plan(&["https://news.ycombinator.com"])),
            Ok(r#"{"top_findings": [], "insights": ["Nothing was found"]}"#.to_string()),
            MockBrowser::default()
                .script("https://news.ycombinator.com", vec!["{{{ not json"])
                .silent("https://news.ycombinator.com"),
            ExplorationParams::default(),
        );

        let exploration = h.use_case.execute(input(Depth::Shallow, 5)).await.unwrap();

        let task = &exploration.tasks()[0];
        assert_eq!(task.status(), TaskStatus::Error);
        assert_eq!(task.error().unwrap().kind, FailureKind::Protocol);
        assert_eq!(exploration.status(), ExplorationStatus::Done);

        // Synthesizer called exactly once, with no findings
        let requests = h.synthesis.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].findings.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_inactivity_timeout_ends_task() {
        let params = ExplorationParams::default().with_inactivity_timeout(Duration::from_secs(10));
        let h = harness(
            Ok(plan(&["https://news.ycombinator.com"])),
            Ok(BRIEF.to_string()),
            MockBrowser::default().silent("https://news.ycombinator.com"),
            params,
        );

        let exploration = h.use_case.execute(input(Depth::Shallow, 5)).await.unwrap();

        let task = &exploration.tasks()[0];
        assert_eq!(task.error().unwrap().kind, FailureKind::Timeout);
        assert!(h.browser.tokens.lock().unwrap().iter().all(|t| t.is_cancelled()));
        assert_eq!(exploration.status(), ExplorationStatus::Done);
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_exceeded_terminates_running_and_queued_tasks() {
        let params = ExplorationParams::default()
            .with_max_concurrent_tasks(1)
            .with_inactivity_timeout(Duration::from_secs(3600));
        let h = harness(
            Ok(plan(&[
                "https://a.example",
                "https://b.example",
                "https://c.example",
            ])),
            Ok(BRIEF.to_string()),
            MockBrowser::default()
                .script("https://a.example", vec![r#"{"type":"STARTED"}"#])
                .silent("https://a.example"),
            params,
        );
        let progress = RecordingProgress::default();

        let started = Instant::now();
        let exploration = h
            .use_case
            .execute_with_progress(input(Depth::Deep, 1), &progress)
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_secs(60));
        assert!(started.elapsed() < Duration::from_secs(120));
        assert_eq!(exploration.tasks().len(), 3);
        for task in exploration.tasks() {
            assert_eq!(task.status(), TaskStatus::Error);
            assert_eq!(task.error().unwrap().kind, FailureKind::BudgetExceeded);
        }
        // Only the first task ever got a slot
        assert_eq!(*h.browser.launches.lock().unwrap(), 1);
        assert_eq!(*progress.budget_exceeded.lock().unwrap(), Some(3));
        assert!(progress
            .statuses
            .lock()
            .unwrap()
            .contains(&ExplorationStatus::Synthesizing));
        assert_eq!(h.synthesis.requests.lock().unwrap().len(), 1);
        assert_eq!(exploration.status(), ExplorationStatus::Done);
    }

    #[tokio::test]
    async fn test_concurrency_bounded() {
        let done = r#"{"type":"COMPLETE","status":"COMPLETED","resultJson":"ok"}"#;
        let sites = [
            "https://a.example",
            "https://b.example",
            "https://c.example",
        ];
        let browser = sites
            .iter()
            .fold(MockBrowser::default(), |b, s| b.script(s, vec![done]));
        let h = harness(
            Ok(plan(&sites)),
            Ok(BRIEF.to_string()),
            browser,
            ExplorationParams::default().with_max_concurrent_tasks(2),
        );

        let exploration = h.use_case.execute(input(Depth::Deep, 5)).await.unwrap();

        assert_eq!(exploration.count_tasks(TaskStatus::Complete), 3);
        assert_eq!(*h.browser.launches.lock().unwrap(), 3);
        assert!(*h.browser.max_active.lock().unwrap() <= 2);
    }

    #[tokio::test]
    async fn test_empty_plan_fails_without_synthesis() {
        let h = harness(
            Ok(r#"{"goal": "x", "tasks": []}"#.to_string()),
            Ok(BRIEF.to_string()),
            MockBrowser::default(),
            ExplorationParams::default(),
        );

        let exploration = h.use_case.execute(input(Depth::Medium, 5)).await.unwrap();

        assert_eq!(exploration.status(), ExplorationStatus::Failed);
        let failure = exploration.failure().unwrap();
        assert_eq!(failure.stage, ExplorationStatus::Planning);
        assert!(failure.cause.contains("no tasks"));
        assert!(h.synthesis.requests.lock().unwrap().is_empty());
        assert_eq!(*h.browser.launches.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_synthesis_error_fails_exploration() {
        let h = harness(
            Ok(plan(&["https://news.ycombinator.com"])),
            Err(ServiceError::HttpStatus {
                status: 500,
                body: "boom".into(),
            }),
            MockBrowser::default().script(
                "https://news.ycombinator.com",
                vec![r#"{"type":"COMPLETE","status":"COMPLETED","resultJson":"ok"}"#],
            ),
            ExplorationParams::default(),
        );

        let exploration = h.use_case.execute(input(Depth::Shallow, 5)).await.unwrap();

        assert_eq!(exploration.status(), ExplorationStatus::Failed);
        assert_eq!(exploration.failure().unwrap().stage, ExplorationStatus::Synthesizing);
        assert!(exploration.brief().is_none());
        assert!(exploration.all_tasks_terminal());
    }

    #[tokio::test]
    async fn test_no_topics_rejected() {
        let h = harness(
            Ok(plan(&["https://a.example"])),
            Ok(BRIEF.to_string()),
            MockBrowser::default(),
            ExplorationParams::default(),
        );
        let input = RunExplorationInput::new(["  ", ""], ExplorationConfig::default());
        let result = h.use_case.execute(input).await;
        assert_eq!(result.unwrap_err(), RunExplorationError::Domain(DomainError::NoTopics));
    }
}
