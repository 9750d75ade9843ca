//! Draw Orchestrator - One fortune draw from birth date to result card
//!
//! The orchestrator owns the state machine of a draw cycle:
//!
//! ```text
//! Input -> [Shuffling] -> Racing -> LoadingResult -> Result
//!   ^                                    |              |
//!   +------------- strict failure -------+---- reset ---+
//! ```
//!
//! The interpretation request is spawned the moment a fortune is selected and
//! its handle is held until the horse ceremony has run for its full duration.
//! Only then is the handle joined, so the user waits
//! `max(ceremony, latency)` and never less than the ceremony.
//!
//! Presentation code reads [`DrawView`] snapshots from [`DrawOrchestrator::subscribe`]
//! and may request a reset from another task through [`ResetSignal`] while
//! the orchestrator is suspended waiting on the join.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::ceremony::pick_loading_message;
use super::interpretation_service::InterpretationError;
use crate::application::ports::outbound::InterpretationPort;
use crate::domain::entities::{DrawResult, FortuneCatalog, FortuneLabel};
use crate::domain::value_objects::{
    BirthDate, DrawCycleId, DrawSettings, FallbackPolicy, InterpretationContent, ValidationError,
};

/// Message shown when a strict-policy draw fails
pub const INTERPRETATION_FAILED_MESSAGE: &str = "Thiên cơ bất khả lộ, vui lòng thử lại!";

/// State tag of the draw cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawPhase {
    #[default]
    Input,
    Shuffling,
    Racing,
    LoadingResult,
    Result,
}

/// Raw date text as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDateInput {
    pub day: String,
    pub month: String,
    pub year: String,
}

/// Snapshot of everything the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawView {
    pub phase: DrawPhase,
    pub input: BirthDateInput,
    pub error: Option<String>,
    /// Shuffling candidate, or the selected fortune once racing
    pub fortune: Option<FortuneLabel>,
    pub loading_message: Option<String>,
    pub result: Option<DrawResult>,
}

/// Lets another task reset a draw that is suspended on its join
#[derive(Debug, Clone)]
pub struct ResetSignal {
    generation: Arc<watch::Sender<u64>>,
}

impl ResetSignal {
    fn new() -> Self {
        Self {
            generation: Arc::new(watch::Sender::new(0)),
        }
    }

    /// Ask the orchestrator to abandon the current cycle
    pub fn request(&self) {
        self.generation.send_modify(|generation| *generation += 1);
    }

    fn current(&self) -> u64 {
        *self.generation.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}

/// State of the single active draw cycle
struct DrawCycle {
    id: DrawCycleId,
    birth_date: BirthDate,
    fortune: Option<FortuneLabel>,
    /// Aborted with the cycle, so no reply can outlive it
    pending: Option<JoinHandle<Result<InterpretationContent, InterpretationError>>>,
    racing_since: Option<Instant>,
    /// Reset generation observed when the cycle started
    reset_generation: u64,
}

/// Coordinates the ceremony with the interpretation request
pub struct DrawOrchestrator<I: InterpretationPort, R: Rng> {
    interpreter: Arc<I>,
    catalog: FortuneCatalog,
    settings: DrawSettings,
    rng: R,
    view: DrawView,
    cycle: Option<DrawCycle>,
    publisher: watch::Sender<DrawView>,
    reset_signal: ResetSignal,
}

impl<I: InterpretationPort, R: Rng> DrawOrchestrator<I, R> {
    /// Create an orchestrator in the `Input` phase
    ///
    /// `rng` drives fortune selection, shuffling and loading messages.
    pub fn new(interpreter: Arc<I>, catalog: FortuneCatalog, settings: DrawSettings, rng: R) -> Self {
        let view = DrawView::default();
        Self {
            interpreter,
            catalog,
            settings,
            rng,
            publisher: watch::Sender::new(view.clone()),
            view,
            cycle: None,
            reset_signal: ResetSignal::new(),
        }
    }

    pub fn view(&self) -> &DrawView {
        &self.view
    }

    pub fn phase(&self) -> DrawPhase {
        self.view.phase
    }

    pub fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    /// Birth date of the active cycle, if any
    pub fn birth_date(&self) -> Option<&BirthDate> {
        self.cycle.as_ref().map(|cycle| &cycle.birth_date)
    }

    pub fn result(&self) -> Option<&DrawResult> {
        self.view.result.as_ref()
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<DrawView> {
        self.publisher.subscribe()
    }

    pub fn reset_signal(&self) -> ResetSignal {
        self.reset_signal.clone()
    }

    /// Validate the raw date and start a draw cycle
    ///
    /// On failure the phase stays `Input`, a user-facing error is set and no
    /// request is issued.
    pub fn submit(&mut self, raw_day: &str, raw_month: &str, raw_year: &str) -> Result<(), DrawError> {
        self.require_phase("submit", &[DrawPhase::Input])?;

        self.view.input = BirthDateInput {
            day: raw_day.to_string(),
            month: raw_month.to_string(),
            year: raw_year.to_string(),
        };

        let birth_date = match BirthDate::parse(raw_day, raw_month, raw_year, self.settings.year_bounds()) {
            Ok(date) => date,
            Err(e) => {
                tracing::info!(error = %e, "Rejected birth date");
                self.view.error = Some(e.user_message().to_string());
                self.publish();
                return Err(e.into());
            }
        };

        self.view.error = None;
        self.cycle = Some(DrawCycle {
            id: DrawCycleId::new(),
            birth_date,
            fortune: None,
            pending: None,
            racing_since: None,
            reset_generation: self.reset_signal.current(),
        });

        if self.settings.shuffle_enabled {
            self.view.phase = DrawPhase::Shuffling;
            self.view.fortune = Some(self.catalog.pick(&mut self.rng));
            self.publish();
            Ok(())
        } else {
            let fortune = self.catalog.pick(&mut self.rng);
            self.begin_draw(fortune)
        }
    }

    /// Show the next shuffling candidate
    pub fn shuffle_tick(&mut self) -> Result<FortuneLabel, DrawError> {
        self.require_phase("shuffle", &[DrawPhase::Shuffling])?;
        let candidate = self.catalog.pick(&mut self.rng);
        self.view.fortune = Some(candidate.clone());
        self.publish();
        Ok(candidate)
    }

    /// Freeze the shuffling candidate and start the draw with it
    pub fn stop_shuffling(&mut self) -> Result<(), DrawError> {
        self.require_phase("stop shuffling", &[DrawPhase::Shuffling])?;
        let fortune = match self.view.fortune.clone() {
            Some(fortune) => fortune,
            None => self.catalog.pick(&mut self.rng),
        };
        self.begin_draw(fortune)
    }

    /// Store the fortune, spawn the interpretation request and enter `Racing`
    ///
    /// The request handle is held, not awaited; it is joined by
    /// [`Self::on_animation_complete`].
    pub fn begin_draw(&mut self, fortune: FortuneLabel) -> Result<(), DrawError> {
        self.require_phase("begin draw", &[DrawPhase::Input, DrawPhase::Shuffling])?;
        let phase = self.view.phase;
        let cycle = match self.cycle.as_mut() {
            Some(cycle) if cycle.pending.is_none() => cycle,
            _ => {
                return Err(DrawError::InvalidTransition {
                    action: "begin draw",
                    phase,
                })
            }
        };

        let interpreter = Arc::clone(&self.interpreter);
        let id = cycle.id;
        let birth_date = cycle.birth_date;
        let label = fortune.clone();
        cycle.pending = Some(tokio::spawn(async move {
            interpreter.interpret(&birth_date, &label).await
        }));
        cycle.fortune = Some(fortune.clone());
        cycle.racing_since = Some(Instant::now());

        tracing::info!(cycle = %id, fortune = %fortune.name, "Draw started");

        self.view.phase = DrawPhase::Racing;
        self.view.fortune = Some(fortune);
        self.publish();
        Ok(())
    }

    /// Finish the ceremony and join the held request
    ///
    /// Calling this before the ceremony duration has elapsed waits out the
    /// remainder first. A [`ResetSignal`] request at any point abandons the
    /// cycle and returns to `Input`.
    pub async fn on_animation_complete(&mut self) -> Result<(), DrawError> {
        self.require_phase("finish animation", &[DrawPhase::Racing])?;
        let phase = self.view.phase;
        let (id, racing_since, reset_generation, handle) = match self.cycle.as_mut() {
            Some(cycle) => match (cycle.racing_since, cycle.pending.take()) {
                (Some(since), Some(handle)) => (cycle.id, since, cycle.reset_generation, handle),
                _ => {
                    return Err(DrawError::InvalidTransition {
                        action: "finish animation",
                        phase,
                    })
                }
            },
            None => {
                return Err(DrawError::InvalidTransition {
                    action: "finish animation",
                    phase,
                })
            }
        };

        let mut reset_rx = self.reset_signal.subscribe();
        if *reset_rx.borrow_and_update() != reset_generation {
            handle.abort();
            self.reset();
            return Ok(());
        }

        // Ceremony floor
        let ceremony_end = racing_since + self.settings.ceremony_duration();
        tokio::select! {
            _ = tokio::time::sleep_until(ceremony_end) => {}
            Ok(()) = reset_rx.changed() => {
                handle.abort();
                self.reset();
                return Ok(());
            }
        }

        self.view.phase = DrawPhase::LoadingResult;
        self.view.loading_message = Some(pick_loading_message(&mut self.rng).to_string());
        self.publish();

        let interval = self.settings.loading_message_interval();
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        let mut handle = handle;
        let joined = loop {
            tokio::select! {
                biased;
                joined = &mut handle => break joined,
                Ok(()) = reset_rx.changed() => {
                    handle.abort();
                    self.reset();
                    return Ok(());
                }
                _ = ticker.tick() => {
                    self.view.loading_message = Some(pick_loading_message(&mut self.rng).to_string());
                    self.publish();
                }
            }
        };

        let outcome = joined.unwrap_or_else(|e| {
            Err(InterpretationError::LlmError(format!("interpretation task failed: {}", e)))
        });
        self.apply_outcome(id, outcome);
        Ok(())
    }

    /// Discard the cycle and return to an empty `Input`
    pub fn reset(&mut self) {
        if let Some(cycle) = self.cycle.take() {
            if let Some(handle) = cycle.pending {
                handle.abort();
            }
            tracing::info!(cycle = %cycle.id, "Draw reset");
        }
        self.view = DrawView::default();
        self.publish();
    }

    fn apply_outcome(
        &mut self,
        id: DrawCycleId,
        outcome: Result<InterpretationContent, InterpretationError>,
    ) {
        let Some(fortune) = self.cycle.as_ref().and_then(|cycle| cycle.fortune.clone()) else {
            tracing::warn!(cycle = %id, "Interpretation arrived without a fortune");
            return;
        };

        let result = match outcome {
            Ok(interpretation) => {
                tracing::info!(cycle = %id, "Interpretation ready");
                DrawResult::new(fortune, interpretation)
            }
            Err(e) => match self.settings.fallback_policy {
                FallbackPolicy::Lenient => {
                    tracing::warn!(cycle = %id, error = %e, "Interpretation failed, using fallback");
                    DrawResult::fallback(fortune)
                }
                FallbackPolicy::Strict => {
                    tracing::warn!(cycle = %id, error = %e, "Interpretation failed");
                    self.cycle = None;
                    self.view.phase = DrawPhase::Input;
                    self.view.fortune = None;
                    self.view.loading_message = None;
                    self.view.error = Some(INTERPRETATION_FAILED_MESSAGE.to_string());
                    self.publish();
                    return;
                }
            },
        };

        if let Some(cycle) = self.cycle.as_mut() {
            cycle.pending = None;
        }
        self.view.phase = DrawPhase::Result;
        self.view.loading_message = None;
        self.view.result = Some(result);
        self.publish();
    }

    fn require_phase(&self, action: &'static str, allowed: &[DrawPhase]) -> Result<(), DrawError> {
        if allowed.contains(&self.view.phase) {
            Ok(())
        } else {
            Err(DrawError::InvalidTransition {
                action,
                phase: self.view.phase,
            })
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.view.clone());
    }
}

/// Errors returned by orchestrator operations
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot {action} while in {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: DrawPhase,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock interpreter that counts calls and answers after a delay
    struct MockInterpreter {
        calls: AtomicUsize,
        completed: AtomicUsize,
        delay: Duration,
        reply: Result<InterpretationContent, InterpretationError>,
        last_birth_date: Mutex<Option<BirthDate>>,
    }

    impl MockInterpreter {
        fn replying(content: InterpretationContent, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
                delay,
                reply: Ok(content),
                last_birth_date: Mutex::new(None),
            })
        }

        fn failing(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
                delay,
                reply: Err(InterpretationError::LlmError("network unreachable".to_string())),
                last_birth_date: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl InterpretationPort for MockInterpreter {
        async fn interpret(
            &self,
            birth_date: &BirthDate,
            _fortune: &FortuneLabel,
        ) -> Result<InterpretationContent, InterpretationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_birth_date.lock().unwrap() = Some(*birth_date);
            tokio::time::sleep(self.delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn scenario_content() -> InterpretationContent {
        InterpretationContent {
            career: "A".to_string(),
            money: "B".to_string(),
            love: "C".to_string(),
            poem: "D".to_string(),
            ..Default::default()
        }
    }

    fn orchestrator(
        interpreter: Arc<MockInterpreter>,
        settings: DrawSettings,
    ) -> DrawOrchestrator<MockInterpreter, StdRng> {
        DrawOrchestrator::new(
            interpreter,
            FortuneCatalog::standard(),
            settings,
            StdRng::seed_from_u64(2026),
        )
    }

    fn ceremony() -> Duration {
        DrawSettings::default().ceremony_duration()
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_submit_starts_racing() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::from_secs(1));
        let mut draw = orchestrator(interpreter.clone(), DrawSettings::default());
        draw.view.error = Some("old error".to_string());

        draw.submit("15", "1", "1995").unwrap();

        assert_eq!(draw.phase(), DrawPhase::Racing);
        assert!(draw.view().error.is_none());
        assert!(draw.view().fortune.is_some());
        assert_eq!(draw.birth_date().map(|d| d.year()), Some(1995));
        tokio::task::yield_now().await;
        assert_eq!(interpreter.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submit_issues_no_request() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::ZERO);
        let mut draw = orchestrator(interpreter.clone(), DrawSettings::default());

        for (day, month, year) in [
            ("0", "1", "1995"),
            ("1", "13", "1995"),
            ("1", "1", "1800"),
            ("x", "1", "1995"),
            ("", "", ""),
            ("31", "12", "2026"),
        ] {
            let result = draw.submit(day, month, year);
            assert!(matches!(result, Err(DrawError::Validation(_))), "{day}/{month}/{year}");
            assert_eq!(draw.phase(), DrawPhase::Input);
            assert!(draw.view().error.as_deref().is_some_and(|e| !e.is_empty()));
        }

        tokio::task::yield_now().await;
        assert_eq!(interpreter.calls(), 0);
        assert_eq!(draw.view().input.year, "2026");
    }

    #[tokio::test(start_paused = true)]
    async fn test_instant_service_still_waits_for_ceremony() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::ZERO);
        let mut draw = orchestrator(interpreter, DrawSettings::default());
        let started = Instant::now();

        draw.submit("15", "1", "1995").unwrap();
        draw.on_animation_complete().await.unwrap();

        assert!(started.elapsed() >= ceremony());
        assert_eq!(draw.phase(), DrawPhase::Result);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolved_request_joins_without_delay() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::from_secs(1));
        let mut draw = orchestrator(interpreter, DrawSettings::default());

        draw.submit("15", "1", "1995").unwrap();
        let selected = draw.view().fortune.clone();
        tokio::time::sleep(ceremony()).await;

        let joined_at = Instant::now();
        draw.on_animation_complete().await.unwrap();

        assert_eq!(joined_at.elapsed(), Duration::ZERO);
        assert_eq!(draw.phase(), DrawPhase::Result);
        let result = draw.result().unwrap();
        assert_eq!(result.interpretation, scenario_content());
        assert_eq!(Some(result.fortune.clone()), selected);
        assert!(!result.is_fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_service_extends_loading() {
        let latency = Duration::from_secs(9);
        let interpreter = MockInterpreter::replying(scenario_content(), latency);
        let mut draw = orchestrator(interpreter, DrawSettings::default());
        let mut views = draw.subscribe();
        let started = Instant::now();

        draw.submit("15", "1", "1995").unwrap();
        tokio::time::sleep(ceremony()).await;
        draw.on_animation_complete().await.unwrap();

        assert!(started.elapsed() >= latency);
        assert!(started.elapsed() < latency + Duration::from_secs(1));
        assert_eq!(views.borrow_and_update().phase, DrawPhase::Result);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_phase_publishes_message() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::from_secs(20));
        let mut draw = orchestrator(interpreter, DrawSettings::default());
        let mut views = draw.subscribe();

        draw.submit("15", "1", "1995").unwrap();

        let watcher = tokio::spawn(async move {
            let mut loading_messages = Vec::new();
            while views.changed().await.is_ok() {
                let view = views.borrow_and_update().clone();
                if view.phase == DrawPhase::LoadingResult {
                    loading_messages.extend(view.loading_message);
                }
                if view.phase == DrawPhase::Result {
                    break;
                }
            }
            loading_messages
        });

        draw.on_animation_complete().await.unwrap();
        drop(draw);

        let messages = watcher.await.unwrap();
        assert!(!messages.is_empty());
        assert!(messages
            .iter()
            .all(|m| crate::application::services::ceremony::LOADING_MESSAGES.contains(&m.as_str())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_lenient_failure_uses_fallback() {
        let interpreter = MockInterpreter::failing(Duration::from_millis(500));
        let mut draw = orchestrator(interpreter, DrawSettings::default());

        draw.submit("15", "1", "1995").unwrap();
        draw.on_animation_complete().await.unwrap();

        assert_eq!(draw.phase(), DrawPhase::Result);
        assert!(draw.view().error.is_none());
        let result = draw.result().unwrap();
        assert!(result.is_fallback);
        assert_eq!(result.interpretation, InterpretationContent::fallback());
        assert!(result.interpretation.validate().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_strict_failure_returns_to_input() {
        let interpreter = MockInterpreter::failing(Duration::from_millis(500));
        let settings = DrawSettings {
            fallback_policy: FallbackPolicy::Strict,
            ..Default::default()
        };
        let mut draw = orchestrator(interpreter, settings);

        draw.submit("15", "1", "1995").unwrap();
        draw.on_animation_complete().await.unwrap();

        assert_eq!(draw.phase(), DrawPhase::Input);
        assert_eq!(draw.view().error.as_deref(), Some(INTERPRETATION_FAILED_MESSAGE));
        assert!(draw.result().is_none());
        assert!(draw.birth_date().is_none());
        // Re-enterable
        assert!(draw.submit("15", "1", "1995").is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_previous_cycle() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::ZERO);
        let mut draw = orchestrator(interpreter.clone(), DrawSettings::default());

        draw.submit("15", "1", "1995").unwrap();
        draw.on_animation_complete().await.unwrap();
        assert_eq!(draw.phase(), DrawPhase::Result);

        draw.reset();
        assert_eq!(draw.view(), &DrawView::default());
        assert!(draw.birth_date().is_none());
        assert!(draw.result().is_none());

        draw.submit("2", "9", "1980").unwrap();
        assert_eq!(draw.phase(), DrawPhase::Racing);
        assert!(draw.result().is_none());
        assert_eq!(draw.view().input.year, "1980");
        tokio::task::yield_now().await;
        assert_eq!(interpreter.calls(), 2);
        let seen = interpreter.last_birth_date.lock().unwrap().unwrap();
        assert_eq!((seen.day(), seen.month(), seen.year()), (2, 9, 1980));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_mid_race_cancels_request() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::from_secs(3));
        let mut draw = orchestrator(interpreter.clone(), DrawSettings::default());

        draw.submit("15", "1", "1995").unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        draw.reset();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(interpreter.completed.load(Ordering::SeqCst), 0);
        assert_eq!(draw.phase(), DrawPhase::Input);
        assert!(matches!(
            draw.on_animation_complete().await,
            Err(DrawError::InvalidTransition { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_signal_abandons_loading() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::from_secs(30));
        let mut draw = orchestrator(interpreter.clone(), DrawSettings::default());
        let signal = draw.reset_signal();

        draw.submit("15", "1", "1995").unwrap();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(7)).await;
            signal.request();
        });

        let started = Instant::now();
        draw.on_animation_complete().await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(8));
        assert_eq!(draw.view(), &DrawView::default());
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(interpreter.completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_signal_during_race_is_honoured() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::ZERO);
        let mut draw = orchestrator(interpreter, DrawSettings::default());

        draw.submit("15", "1", "1995").unwrap();
        draw.reset_signal().request();
        draw.on_animation_complete().await.unwrap();

        assert_eq!(draw.phase(), DrawPhase::Input);

        // A stale request does not leak into the next cycle
        draw.submit("15", "1", "1995").unwrap();
        draw.on_animation_complete().await.unwrap();
        assert_eq!(draw.phase(), DrawPhase::Result);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_request_never_completes_into_next_cycle() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::from_secs(3));
        let mut draw = orchestrator(interpreter.clone(), DrawSettings::default());

        draw.submit("15", "1", "1995").unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        draw.reset();

        draw.submit("2", "9", "1980").unwrap();
        draw.on_animation_complete().await.unwrap();

        assert_eq!(draw.phase(), DrawPhase::Result);
        assert_eq!(interpreter.calls(), 2);
        assert_eq!(interpreter.completed.load(Ordering::SeqCst), 1);
        assert_eq!(draw.birth_date().map(|d| d.year()), Some(1980));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_while_shuffling_returns_to_input() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::ZERO);
        let settings = DrawSettings {
            shuffle_enabled: true,
            ..Default::default()
        };
        let mut draw = orchestrator(interpreter.clone(), settings);

        draw.submit("15", "1", "1995").unwrap();
        draw.shuffle_tick().unwrap();
        draw.reset();

        assert_eq!(draw.view(), &DrawView::default());
        assert!(matches!(draw.shuffle_tick(), Err(DrawError::InvalidTransition { .. })));
        tokio::task::yield_now().await;
        assert_eq!(interpreter.calls(), 0);
        draw.submit("15", "1", "1995").unwrap();
        assert_eq!(draw.phase(), DrawPhase::Shuffling);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shuffling_variant() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::ZERO);
        let settings = DrawSettings {
            shuffle_enabled: true,
            ..Default::default()
        };
        let mut draw = orchestrator(interpreter.clone(), settings);

        draw.submit("15", "1", "1995").unwrap();
        assert_eq!(draw.phase(), DrawPhase::Shuffling);
        tokio::task::yield_now().await;
        assert_eq!(interpreter.calls(), 0);

        for _ in 0..5 {
            draw.shuffle_tick().unwrap();
        }
        let frozen = draw.view().fortune.clone().unwrap();
        draw.stop_shuffling().unwrap();
        assert_eq!(draw.phase(), DrawPhase::Racing);

        draw.on_animation_complete().await.unwrap();
        assert_eq!(draw.result().unwrap().fortune, frozen);
        assert_eq!(interpreter.calls(), 1);
    }

    #[tokio::test]
    async fn test_out_of_order_intents_are_rejected() {
        let interpreter = MockInterpreter::replying(scenario_content(), Duration::ZERO);
        let mut draw = orchestrator(interpreter, DrawSettings::default());

        assert!(matches!(draw.stop_shuffling(), Err(DrawError::InvalidTransition { .. })));
        assert!(matches!(draw.shuffle_tick(), Err(DrawError::InvalidTransition { .. })));
        assert!(matches!(
            draw.begin_draw(FortuneLabel::new("1", "Đại Cát")),
            Err(DrawError::InvalidTransition { .. })
        ));

        draw.submit("15", "1", "1995").unwrap();
        assert!(matches!(
            draw.submit("15", "1", "1995"),
            Err(DrawError::InvalidTransition { phase: DrawPhase::Racing, .. })
        ));
    }
}
