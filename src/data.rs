use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// Type aliases for clarity
pub type AcademicYearId = String;
pub type ClassId = String;
pub type SubjectId = String;
pub type TeacherId = String;
pub type ClassroomId = String;
pub type TimeSlotId = String;
/// 0 = Sunday .. 6 = Saturday, as stored by the entity store.
pub type DayOfWeek = u8;

/// An academic year; only one is active at a time.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYear {
    pub id: AcademicYearId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

/// A group of students following the same timetable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    #[serde(default)]
    pub name: String,
    pub academic_year: AcademicYearId,
    pub students_count: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    #[serde(default)]
    pub name: String,
}

/// Links a class to a subject and the teacher giving it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSubject {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    #[serde(default)]
    pub weekly_classes: Option<u32>,
    /// Legacy field, read only when `weekly_classes` is absent.
    #[serde(default)]
    pub weekly_hours: Option<u32>,
}

impl ClassSubject {
    /// Number of lessons this assignment needs each week.
    ///
    /// Zero counts as missing, mirroring how the entity store treats an
    /// unset counter.
    pub fn lessons_per_week(&self) -> u32 {
        self.weekly_classes
            .filter(|n| *n > 0)
            .or(self.weekly_hours.filter(|n| *n > 0))
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Teacher,
    Admin,
    Coordinator,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    #[serde(default)]
    pub name: String,
    pub role: Role,
}

/// What part of the day a restriction blocks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RestrictionKind {
    UnavailableDay,
    #[serde(rename_all = "camelCase")]
    TimeRange {
        #[serde(with = "clock")]
        start_time: NaiveTime,
        #[serde(with = "clock")]
        end_time: NaiveTime,
    },
}

/// A hard unavailability rule for one teacher on one day of the week.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRestriction {
    #[serde(default)]
    pub id: String,
    pub teacher_id: TeacherId,
    pub day_of_week: DayOfWeek,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(flatten)]
    pub kind: RestrictionKind,
}

impl TeacherRestriction {
    /// True when this restriction makes `slot` unusable for its teacher.
    pub fn blocks(&self, slot: &TimeSlot) -> bool {
        if !self.is_active || self.day_of_week != slot.day_of_week {
            return false;
        }
        match &self.kind {
            RestrictionKind::UnavailableDay => true,
            RestrictionKind::TimeRange {
                start_time,
                end_time,
            } => *start_time <= slot.start_time && *end_time >= slot.end_time,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub academic_year: AcademicYearId,
    pub day_of_week: DayOfWeek,
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub is_break: bool,
}

/// Represents a physical room with a given capacity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: ClassroomId,
    #[serde(default)]
    pub name: String,
    pub capacity: u32,
}

/// Snapshot of everything the entity store hands to the generator.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    /// Explicit active year; falls back to the first year flagged active.
    pub active_academic_year: Option<AcademicYearId>,
    pub academic_years: Vec<AcademicYear>,
    pub classes: Vec<Class>,
    pub subjects: Vec<Subject>,
    pub teachers: Vec<Teacher>,
    pub classrooms: Vec<Classroom>,
    pub time_slots: Vec<TimeSlot>,
    pub class_subjects: Vec<ClassSubject>,
    pub teacher_restrictions: Vec<TeacherRestriction>,
}

impl Catalog {
    pub fn active_academic_year(&self) -> Option<&str> {
        self.active_academic_year.as_deref().or_else(|| {
            self.academic_years
                .iter()
                .find(|y| y.is_active)
                .map(|y| y.id.as_str())
        })
    }

    pub fn classes_in_year(&self, year: &str) -> Vec<&Class> {
        self.classes
            .iter()
            .filter(|c| c.academic_year == year)
            .collect()
    }

    /// Non-break slots of `year`, in catalog order.
    pub fn allocatable_slots(&self, year: &str) -> Vec<&TimeSlot> {
        self.time_slots
            .iter()
            .filter(|ts| ts.academic_year == year && !ts.is_break)
            .collect()
    }

    pub fn active_restrictions(&self) -> Vec<&TeacherRestriction> {
        self.teacher_restrictions
            .iter()
            .filter(|r| r.is_active)
            .collect()
    }

    /// Staff members with the teacher role.
    pub fn teaching_staff_count(&self) -> usize {
        self.teachers
            .iter()
            .filter(|t| t.role == Role::Teacher)
            .count()
    }
}

/// One required weekly lesson instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LessonDemand {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    /// `{class}-{subject}-{ordinal}`, kept for traceability only.
    pub instance_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Active,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedBy {
    Automatic,
    Manual,
}

/// Represents a single, scheduled lesson.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub academic_year: AcademicYearId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub classroom_id: ClassroomId,
    pub time_slot_id: TimeSlotId,
    pub day_of_week: DayOfWeek,
    pub status: ScheduleStatus,
    pub is_double_class: bool,
    pub priority: u32,
    pub generated_by: GeneratedBy,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The legacy tag, applied to every placement failure by default.
    TeacherDoubleBooking,
    TeacherRestricted,
    ClassDoubleBooking,
    InsufficientCapacity,
    RoomUnavailable,
    NoAvailableSlot,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ConflictKind::TeacherDoubleBooking => "teacher_double_booking",
            ConflictKind::TeacherRestricted => "teacher_restricted",
            ConflictKind::ClassDoubleBooking => "class_double_booking",
            ConflictKind::InsufficientCapacity => "insufficient_capacity",
            ConflictKind::RoomUnavailable => "room_unavailable",
            ConflictKind::NoAvailableSlot => "no_available_slot",
        };
        f.write_str(tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedEntities {
    pub teacher_ids: Vec<TeacherId>,
    pub class_ids: Vec<ClassId>,
    pub subject_ids: Vec<SubjectId>,
}

/// A lesson that could not be placed under the hard constraints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConflict {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub description: String,
    pub schedule_ids: Vec<String>,
    pub severity: Severity,
    pub resolved: bool,
    pub affected_entities: AffectedEntities,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl fmt::Display for ScheduleConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.description)
    }
}

/// The output of a completed run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    pub schedules: Vec<Schedule>,
    pub conflicts: Vec<ScheduleConflict>,
}

fn default_true() -> bool {
    true
}

/// `HH:MM` wall-clock times, also accepting `HH:MM:SS` on input.
mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|e| D::Error::custom(format!("invalid time '{raw}': {e}")))
    }
}
