//! Generation runs: status, progress and statistics around one allocation pass.
//!
//! A run moves `pending -> running -> completed`, or to `failed` on a
//! configuration fault or a crashed worker. Allocation happens on a single
//! tokio task that yields after every demand and publishes the run snapshot
//! over a watch channel. Only one run may be active at a time; a second
//! `start` is rejected with [`GenerationError::RunInProgress`].

use crate::conflict;
use crate::data::{Catalog, ScheduleConflict, Timetable};
use crate::demand::expand_demands;
use crate::error::GenerationError;
use crate::settings::GenerationSettings;
use crate::solver::{AllocationInput, Allocator, ConflictClassification, shuffle_demands};
use chrono::{DateTime, Utc};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

/// Only meaningful once the run is completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatistics {
    pub total_lessons_required: usize,
    pub successful_allocations: usize,
    pub conflict_count: usize,
    /// Rough guess, a tenth of the placed lessons.
    pub estimated_teacher_gaps: usize,
    pub average_teacher_workload: f64,
    /// Percentage of required lessons that were placed.
    pub satisfaction_rate: u32,
}

impl GenerationStatistics {
    pub fn compute(successful: usize, conflicts: usize, teacher_count: usize) -> Self {
        let total = successful + conflicts;
        let satisfaction_rate = if total > 0 {
            (successful as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        Self {
            total_lessons_required: total,
            successful_allocations: successful,
            conflict_count: conflicts,
            estimated_teacher_gaps: (successful as f64 * 0.1).floor() as usize,
            average_teacher_workload: successful as f64 / teacher_count.max(1) as f64,
            satisfaction_rate,
        }
    }
}

/// Snapshot of one generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRun {
    pub id: Uuid,
    pub academic_year: Option<String>,
    pub status: RunStatus,
    /// 0..=100
    pub progress: u8,
    pub settings: GenerationSettings,
    pub statistics: GenerationStatistics,
    pub generated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub failure_reason: Option<String>,
}

impl GenerationRun {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            academic_year: None,
            status: RunStatus::Pending,
            progress: 0,
            settings,
            statistics: GenerationStatistics::default(),
            generated_at: Utc::now(),
            completed_at: None,
            failure_reason: None,
        }
    }

    fn begin(&mut self, academic_year: &str) {
        self.academic_year = Some(academic_year.to_owned());
        self.status = RunStatus::Running;
        self.progress = 0;
    }

    // Progress never moves backwards.
    fn advance(&mut self, progress: u8) {
        if self.status == RunStatus::Running {
            self.progress = self.progress.max(progress.min(100));
        }
    }

    fn complete(&mut self, statistics: GenerationStatistics) {
        self.status = RunStatus::Completed;
        self.progress = 100;
        self.statistics = statistics;
        self.completed_at = Some(Utc::now());
    }

    fn fail(&mut self, reason: String) {
        self.status = RunStatus::Failed;
        self.failure_reason = Some(reason);
        self.completed_at = Some(Utc::now());
    }
}

/// `round(done / total * 100)`; an empty queue counts as done.
pub fn progress_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.min(total) as f64 / total as f64 * 100.0).round() as u8
}

/// Where a run draws its shuffle order from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RngSource {
    #[default]
    Entropy,
    Seeded(u64),
}

impl RngSource {
    fn rng(self) -> StdRng {
        match self {
            RngSource::Entropy => StdRng::from_os_rng(),
            RngSource::Seeded(seed) => StdRng::seed_from_u64(seed),
        }
    }
}

/// Entry point for the surrounding application: starts runs, exposes the
/// latest run snapshot and the timetable of the last completed run.
#[derive(Debug)]
pub struct Generator {
    catalog: RwLock<Arc<Catalog>>,
    state: Arc<watch::Sender<Option<GenerationRun>>>,
    timetable: Arc<Mutex<Option<Timetable>>>,
    running: Arc<AtomicBool>,
    rng_source: RngSource,
    classification: ConflictClassification,
    checkpoint_delay: Duration,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            catalog: RwLock::new(Arc::new(Catalog::default())),
            state: Arc::new(state),
            timetable: Arc::new(Mutex::new(None)),
            running: Arc::new(AtomicBool::new(false)),
            rng_source: RngSource::default(),
            classification: ConflictClassification::default(),
            checkpoint_delay: Duration::ZERO,
        }
    }

    pub fn with_rng_source(mut self, rng_source: RngSource) -> Self {
        self.rng_source = rng_source;
        self
    }

    pub fn with_conflict_classification(mut self, classification: ConflictClassification) -> Self {
        self.classification = classification;
        self
    }

    /// Pause after each demand on top of the cooperative yield.
    pub fn with_checkpoint_delay(mut self, delay: Duration) -> Self {
        self.checkpoint_delay = delay;
        self
    }

    /// Replaces the catalog used by subsequent runs. A running run keeps the
    /// snapshot it started with.
    pub async fn load_catalog(&self, catalog: Catalog) {
        info!(
            "Catalog loaded: {} classes, {} time slots, {} classrooms",
            catalog.classes.len(),
            catalog.time_slots.len(),
            catalog.classrooms.len()
        );
        *self.catalog.write().await = Arc::new(catalog);
    }

    /// Latest run snapshot, `None` before the first run.
    pub fn observe(&self) -> Option<GenerationRun> {
        self.state.borrow().clone()
    }

    /// Receives every published run snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Option<GenerationRun>> {
        self.state.subscribe()
    }

    /// Waits for the current run to complete or fail.
    pub async fn finished(&self) -> Option<GenerationRun> {
        let mut rx = self.subscribe();
        let run = rx
            .wait_for(|run| run.as_ref().is_none_or(|r| r.status.is_finished()))
            .await
            .ok()?;
        run.clone()
    }

    /// Schedules and conflicts of the last completed run.
    pub async fn timetable(&self) -> Option<Timetable> {
        self.timetable.lock().await.clone()
    }

    pub async fn resolve_conflict(
        &self,
        conflict_id: &str,
    ) -> Result<ScheduleConflict, GenerationError> {
        let mut timetable = self.timetable.lock().await;
        let timetable = timetable.as_mut().ok_or(GenerationError::NoCompletedRun)?;
        conflict::resolve_conflict(&mut timetable.conflicts, conflict_id)
            .ok_or_else(|| GenerationError::ConflictNotFound(conflict_id.to_owned()))
    }

    /// Starts a run in the background and returns its first snapshot.
    ///
    /// Configuration faults do not surface as errors: the returned run is
    /// already `failed` and carries the reason.
    pub async fn start(&self, settings: GenerationSettings) -> Result<GenerationRun, GenerationError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(GenerationError::RunInProgress);
        }

        let catalog = self.catalog.read().await.clone();
        *self.timetable.lock().await = None;
        let mut run = GenerationRun::new(settings);
        info!("Starting generation run {}", run.id);

        let academic_year = match validate(&catalog) {
            Ok(year) => year,
            Err(e) => {
                error!("Generation run {} failed: {}", run.id, e);
                run.fail(e.to_string());
                self.state.send_replace(Some(run.clone()));
                self.running.store(false, Ordering::Release);
                return Ok(run);
            }
        };

        run.begin(&academic_year);
        self.state.send_replace(Some(run.clone()));

        let job = Job {
            catalog,
            academic_year,
            state: Arc::clone(&self.state),
            rng: self.rng_source.rng(),
            classification: self.classification,
            checkpoint_delay: self.checkpoint_delay,
        };
        let supervisor = Supervisor {
            run_id: run.id,
            state: Arc::clone(&self.state),
            timetable: Arc::clone(&self.timetable),
            running: Arc::clone(&self.running),
        };
        tokio::spawn(supervisor.supervise(tokio::spawn(job.execute())));

        Ok(run)
    }
}

/// Publishes the outcome of a worker task onto the run it was started for.
struct Supervisor {
    run_id: Uuid,
    state: Arc<watch::Sender<Option<GenerationRun>>>,
    timetable: Arc<Mutex<Option<Timetable>>>,
    running: Arc<AtomicBool>,
}

impl Supervisor {
    // Releases the single-run guard only after the final snapshot is out.
    async fn supervise(self, handle: JoinHandle<(Timetable, GenerationStatistics)>) {
        let run_id = self.run_id;
        match handle.await {
            Ok((result, statistics)) => {
                info!(
                    "Generation run {} completed: {} placed, {} conflicts, {}% satisfied",
                    run_id,
                    statistics.successful_allocations,
                    statistics.conflict_count,
                    statistics.satisfaction_rate
                );
                let mut timetable = self.timetable.lock().await;
                let published = self.state.send_if_modified(|run| match run {
                    Some(run) if run.id == run_id => {
                        run.complete(statistics);
                        true
                    }
                    _ => false,
                });
                if published {
                    *timetable = Some(result);
                }
            }
            Err(e) => {
                let e = GenerationError::WorkerAborted(e.to_string());
                error!("Generation run {} failed: {}", run_id, e);
                self.state.send_if_modified(|run| match run {
                    Some(run) if run.id == run_id => {
                        run.fail(e.to_string());
                        true
                    }
                    _ => false,
                });
            }
        }
        self.running.store(false, Ordering::Release);
    }
}

fn validate(catalog: &Catalog) -> Result<String, GenerationError> {
    let year = catalog
        .active_academic_year()
        .ok_or(GenerationError::NoActiveAcademicYear)?;
    if catalog.classes_in_year(year).is_empty() {
        return Err(GenerationError::EmptyClassCatalog(year.to_owned()));
    }
    Ok(year.to_owned())
}

/// Everything the worker task owns for the duration of a run.
struct Job {
    catalog: Arc<Catalog>,
    academic_year: String,
    state: Arc<watch::Sender<Option<GenerationRun>>>,
    rng: StdRng,
    classification: ConflictClassification,
    checkpoint_delay: Duration,
}

impl Job {
    async fn execute(mut self) -> (Timetable, GenerationStatistics) {
        let catalog = Arc::clone(&self.catalog);
        let input = AllocationInput::from_catalog(&catalog, &self.academic_year);
        let classes = catalog.classes_in_year(&self.academic_year);
        let mut demands = expand_demands(&classes, &catalog.class_subjects);
        shuffle_demands(&mut demands, &mut self.rng);
        info!(
            "Allocating {} lessons over {} slots and {} classrooms",
            demands.len(),
            input.time_slots.len(),
            input.classrooms.len()
        );

        let total = demands.len();
        let mut allocator = Allocator::new(&input, self.classification);
        for (index, demand) in demands.iter().enumerate() {
            allocator.place(demand);
            let progress = progress_percent(index + 1, total);
            self.state.send_modify(|run| {
                if let Some(run) = run {
                    run.advance(progress);
                }
            });
            self.checkpoint().await;
        }

        let statistics = GenerationStatistics::compute(
            allocator.schedules().len(),
            allocator.conflicts().len(),
            catalog.teaching_staff_count(),
        );
        (allocator.finish(), statistics)
    }

    async fn checkpoint(&self) {
        tokio::task::yield_now().await;
        if !self.checkpoint_delay.is_zero() {
            tokio::time::sleep(self.checkpoint_delay).await;
        }
    }
}
