use serde::{Deserialize, Serialize};

/// Preferences supplied with a generation request.
///
/// None of these fields influence allocation yet: the allocator only
/// enforces hard constraints and these are stored on the run for
/// traceability. They are the input for a future optimization pass.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    /// No-op. Longest run of back-to-back lessons for a teacher.
    pub max_consecutive_classes: u32,
    /// No-op.
    pub prefer_grouped_classes: bool,
    /// No-op. Avoid idle periods in teacher days.
    pub avoid_gaps: bool,
    /// No-op.
    pub balance_workload: bool,
    /// No-op. Spread demanding subjects across the week.
    pub distribute_cognitive_load: bool,
    /// No-op. Allow two consecutive lessons of one subject.
    pub allow_double_classes: bool,
    /// No-op. Minutes.
    pub break_duration: u32,
    /// No-op.
    pub max_daily_hours: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_consecutive_classes: 3,
            prefer_grouped_classes: false,
            avoid_gaps: true,
            balance_workload: true,
            distribute_cognitive_load: false,
            allow_double_classes: false,
            break_duration: 20,
            max_daily_hours: 6,
        }
    }
}
