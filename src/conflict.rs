//! Conflict records for lessons the allocator could not place.

use crate::data::{
    AffectedEntities, Catalog, ConflictKind, LessonDemand, ScheduleConflict, Severity,
};
use chrono::Utc;
use std::collections::HashMap;

const UNKNOWN: &str = "Unknown";

/// Display names for the ids referenced by a demand.
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    subjects: HashMap<String, String>,
    classes: HashMap<String, String>,
    teachers: HashMap<String, String>,
}

impl NameLookup {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            subjects: catalog
                .subjects
                .iter()
                .map(|s| (s.id.clone(), s.name.clone()))
                .collect(),
            classes: catalog
                .classes
                .iter()
                .map(|c| (c.id.clone(), c.name.clone()))
                .collect(),
            teachers: catalog
                .teachers
                .iter()
                .map(|t| (t.id.clone(), t.name.clone()))
                .collect(),
        }
    }

    fn name<'a>(map: &'a HashMap<String, String>, id: &str) -> &'a str {
        map.get(id).map(String::as_str).unwrap_or(UNKNOWN)
    }
}

/// Builds the conflict for an unplaceable demand.
pub fn record_conflict(
    demand: &LessonDemand,
    kind: ConflictKind,
    names: &NameLookup,
) -> ScheduleConflict {
    let description = format!(
        "Could not allocate subject {} for class {} with teacher {}.",
        NameLookup::name(&names.subjects, &demand.subject_id),
        NameLookup::name(&names.classes, &demand.class_id),
        NameLookup::name(&names.teachers, &demand.teacher_id),
    );

    ScheduleConflict {
        id: format!("conflict_{}", demand.instance_id),
        kind,
        description,
        schedule_ids: Vec::new(),
        severity: Severity::High,
        resolved: false,
        affected_entities: AffectedEntities {
            teacher_ids: vec![demand.teacher_id.clone()],
            class_ids: vec![demand.class_id.clone()],
            subject_ids: vec![demand.subject_id.clone()],
        },
        created_at: Utc::now(),
        resolved_at: None,
    }
}

/// Marks a conflict resolved. Returns the updated record, or `None` for an
/// unknown id. Resolving twice keeps the first timestamp.
pub fn resolve_conflict(
    conflicts: &mut [ScheduleConflict],
    conflict_id: &str,
) -> Option<ScheduleConflict> {
    let conflict = conflicts.iter_mut().find(|c| c.id == conflict_id)?;
    if !conflict.resolved {
        conflict.resolved = true;
        conflict.resolved_at = Some(Utc::now());
    }
    Some(conflict.clone())
}
