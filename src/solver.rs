//! Greedy first-fit allocation of lesson demands onto (time slot, room) pairs.
//!
//! # Algorithm
//!
//! 1. Shuffle the demand queue with the injected random source.
//! 2. For each demand, walk the time slots in catalog order, skipping slots
//!    where the teacher or the class is already booked in this run, or where
//!    an active teacher restriction covers the slot.
//! 3. For a usable slot, walk the classrooms in catalog order and take the
//!    first one that is free in that slot and seats the whole class.
//! 4. A demand with no usable (slot, room) pair becomes a conflict.
//!
//! Catalog order is the only tie-break. There is no scoring, no backtracking
//! and no use of the soft preferences in `GenerationSettings`.
//!
//! # Complexity
//! O(D * S * R) for D demands, S slots and R rooms.

use crate::conflict::{NameLookup, record_conflict};
use crate::data::{
    Catalog, Class, Classroom, ConflictKind, GeneratedBy, LessonDemand, Schedule,
    ScheduleConflict, ScheduleStatus, TeacherRestriction, TimeSlot, Timetable,
};
use chrono::Utc;
use itertools::Itertools;
use log::{trace, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};

/// How placement failures are tagged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictClassification {
    /// Every failure is reported as `teacher_double_booking`. Downstream
    /// reports depend on this tag, so it stays the default.
    #[default]
    Uniform,
    /// Failures carry a diagnosed cause.
    Detailed,
}

/// Year-scoped view of the catalog that the allocator reads from.
#[derive(Debug)]
pub struct AllocationInput<'a> {
    pub academic_year: &'a str,
    /// Non-break slots of the academic year, in catalog order.
    pub time_slots: Vec<&'a TimeSlot>,
    /// All rooms; rooms are shared across academic years.
    pub classrooms: &'a [Classroom],
    /// Active restrictions grouped by teacher id.
    pub restrictions: HashMap<&'a str, Vec<&'a TeacherRestriction>>,
    pub classes: HashMap<&'a str, &'a Class>,
    pub names: NameLookup,
}

impl<'a> AllocationInput<'a> {
    pub fn from_catalog(catalog: &'a Catalog, academic_year: &'a str) -> Self {
        Self {
            academic_year,
            time_slots: catalog.allocatable_slots(academic_year),
            classrooms: &catalog.classrooms,
            restrictions: catalog
                .active_restrictions()
                .into_iter()
                .map(|r| (r.teacher_id.as_str(), r))
                .into_group_map(),
            classes: catalog
                .classes_in_year(academic_year)
                .into_iter()
                .map(|c| (c.id.as_str(), c))
                .collect(),
            names: NameLookup::from_catalog(catalog),
        }
    }
}

/// Outcome of placing a single demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Placed { time_slot_id: String, classroom_id: String },
    Conflict(ConflictKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotRejection {
    TeacherBusy,
    ClassBusy,
    Restricted,
}

/// Why the slots examined for one demand were rejected.
#[derive(Debug, Default)]
struct Rejections {
    teacher_busy: usize,
    class_busy: usize,
    restricted: usize,
    reached_rooms: bool,
}

impl Rejections {
    fn count(&mut self, reason: SlotRejection) {
        match reason {
            SlotRejection::TeacherBusy => self.teacher_busy += 1,
            SlotRejection::ClassBusy => self.class_busy += 1,
            SlotRejection::Restricted => self.restricted += 1,
        }
    }
}

/// Holds the partial timetable of a run; the only allocation state.
#[derive(Debug)]
pub struct Allocator<'a> {
    input: &'a AllocationInput<'a>,
    classification: ConflictClassification,
    schedules: Vec<Schedule>,
    conflicts: Vec<ScheduleConflict>,
    teacher_busy: HashSet<(String, String)>,
    class_busy: HashSet<(String, String)>,
    room_busy: HashSet<(String, String)>,
}

impl<'a> Allocator<'a> {
    pub fn new(input: &'a AllocationInput<'a>, classification: ConflictClassification) -> Self {
        Self {
            input,
            classification,
            schedules: Vec::new(),
            conflicts: Vec::new(),
            teacher_busy: HashSet::new(),
            class_busy: HashSet::new(),
            room_busy: HashSet::new(),
        }
    }

    /// Places one demand, committing a schedule or recording a conflict.
    pub fn place(&mut self, demand: &LessonDemand) -> Placement {
        let input = self.input;
        let mut rejections = Rejections::default();

        for slot in &input.time_slots {
            if let Some(reason) = self.slot_rejection(slot, demand) {
                rejections.count(reason);
                continue;
            }
            rejections.reached_rooms = true;

            if let Some(room) = self.free_room(slot, demand) {
                self.commit(demand, slot, room);
                return Placement::Placed {
                    time_slot_id: slot.id.clone(),
                    classroom_id: room.id.clone(),
                };
            }
        }

        let kind = match self.classification {
            ConflictClassification::Uniform => ConflictKind::TeacherDoubleBooking,
            ConflictClassification::Detailed => self.diagnose(demand, &rejections),
        };
        warn!(
            "Could not place lesson {} (teacher {}, class {}): {}",
            demand.instance_id, demand.teacher_id, demand.class_id, kind
        );
        self.conflicts.push(record_conflict(demand, kind, &input.names));
        Placement::Conflict(kind)
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn conflicts(&self) -> &[ScheduleConflict] {
        &self.conflicts
    }

    pub fn finish(self) -> Timetable {
        Timetable {
            schedules: self.schedules,
            conflicts: self.conflicts,
        }
    }

    fn slot_rejection(&self, slot: &TimeSlot, demand: &LessonDemand) -> Option<SlotRejection> {
        let key = |other: &str| (slot.id.clone(), other.to_owned());
        if self.teacher_busy.contains(&key(&demand.teacher_id)) {
            return Some(SlotRejection::TeacherBusy);
        }
        if self.class_busy.contains(&key(&demand.class_id)) {
            return Some(SlotRejection::ClassBusy);
        }
        let restricted = self
            .input
            .restrictions
            .get(demand.teacher_id.as_str())
            .is_some_and(|rs| rs.iter().any(|r| r.blocks(slot)));
        if restricted {
            return Some(SlotRejection::Restricted);
        }
        None
    }

    fn free_room(&self, slot: &TimeSlot, demand: &LessonDemand) -> Option<&'a Classroom> {
        let input = self.input;
        input.classrooms.iter().find(|room| {
            !self
                .room_busy
                .contains(&(slot.id.clone(), room.id.clone()))
                && self.seats_class(room, demand)
        })
    }

    // An unknown class skips the capacity check.
    fn seats_class(&self, room: &Classroom, demand: &LessonDemand) -> bool {
        self.input
            .classes
            .get(demand.class_id.as_str())
            .is_none_or(|class| room.capacity >= class.students_count)
    }

    fn commit(&mut self, demand: &LessonDemand, slot: &TimeSlot, room: &Classroom) {
        trace!(
            "Placed lesson {} in slot {} room {}",
            demand.instance_id, slot.id, room.id
        );
        let now = Utc::now();
        self.teacher_busy
            .insert((slot.id.clone(), demand.teacher_id.clone()));
        self.class_busy
            .insert((slot.id.clone(), demand.class_id.clone()));
        self.room_busy.insert((slot.id.clone(), room.id.clone()));
        self.schedules.push(Schedule {
            id: format!("sched_{}_{}", demand.instance_id, slot.id),
            academic_year: self.input.academic_year.to_owned(),
            class_id: demand.class_id.clone(),
            subject_id: demand.subject_id.clone(),
            teacher_id: demand.teacher_id.clone(),
            classroom_id: room.id.clone(),
            time_slot_id: slot.id.clone(),
            day_of_week: slot.day_of_week,
            status: ScheduleStatus::Active,
            is_double_class: false,
            priority: 1,
            generated_by: GeneratedBy::Automatic,
            created_at: now,
            updated_at: now,
        });
    }

    fn diagnose(&self, demand: &LessonDemand, rejections: &Rejections) -> ConflictKind {
        if self.input.time_slots.is_empty() {
            return ConflictKind::NoAvailableSlot;
        }
        if rejections.reached_rooms {
            let any_room_fits = self
                .input
                .classrooms
                .iter()
                .any(|room| self.seats_class(room, demand));
            return if any_room_fits {
                ConflictKind::RoomUnavailable
            } else {
                ConflictKind::InsufficientCapacity
            };
        }
        if rejections.restricted == self.input.time_slots.len() {
            ConflictKind::TeacherRestricted
        } else if rejections.teacher_busy > 0 {
            ConflictKind::TeacherDoubleBooking
        } else if rejections.class_busy > 0 {
            ConflictKind::ClassDoubleBooking
        } else {
            ConflictKind::TeacherRestricted
        }
    }
}

/// Uniformly permutes the demand queue.
pub fn shuffle_demands<R: Rng + ?Sized>(demands: &mut [LessonDemand], rng: &mut R) {
    demands.shuffle(rng);
}

/// Shuffles `demands` and places them one by one.
///
/// Identical input can yield different timetables for different random
/// sources; every result still honors the hard constraints.
pub fn allocate<R: Rng + ?Sized>(
    mut demands: Vec<LessonDemand>,
    input: &AllocationInput<'_>,
    classification: ConflictClassification,
    rng: &mut R,
) -> Timetable {
    shuffle_demands(&mut demands, rng);
    let mut allocator = Allocator::new(input, classification);
    for demand in &demands {
        allocator.place(demand);
    }
    allocator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ClassSubject, RestrictionKind, Role, Subject, Teacher};
    use crate::demand::expand_demands;
    use chrono::NaiveTime;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const YEAR: &str = "2025";

    fn time(raw: &str) -> NaiveTime {
        NaiveTime::parse_from_str(raw, "%H:%M").unwrap()
    }

    fn slot(id: &str, day: u8, start: &str, end: &str) -> TimeSlot {
        TimeSlot {
            id: id.into(),
            academic_year: YEAR.into(),
            day_of_week: day,
            start_time: time(start),
            end_time: time(end),
            is_break: false,
        }
    }

    fn class(id: &str, students: u32) -> Class {
        Class {
            id: id.into(),
            name: id.to_uppercase(),
            academic_year: YEAR.into(),
            students_count: students,
        }
    }

    fn room(id: &str, capacity: u32) -> Classroom {
        Classroom {
            id: id.into(),
            name: id.into(),
            capacity,
        }
    }

    fn link(class_id: &str, subject_id: &str, teacher_id: &str, weekly: u32) -> ClassSubject {
        ClassSubject {
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
            weekly_classes: Some(weekly),
            weekly_hours: None,
        }
    }

    fn teacher(id: &str) -> Teacher {
        Teacher {
            id: id.into(),
            name: format!("Teacher {id}"),
            role: Role::Teacher,
        }
    }

    fn all_day(teacher_id: &str, day: u8) -> TeacherRestriction {
        TeacherRestriction {
            id: format!("r-{teacher_id}-{day}"),
            teacher_id: teacher_id.into(),
            day_of_week: day,
            is_active: true,
            kind: RestrictionKind::UnavailableDay,
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            active_academic_year: Some(YEAR.into()),
            subjects: vec![Subject {
                id: "math".into(),
                name: "Mathematics".into(),
            }],
            teachers: vec![teacher("t1"), teacher("t2")],
            ..Catalog::default()
        }
    }

    fn run(catalog: &Catalog, seed: u64, classification: ConflictClassification) -> Timetable {
        let input = AllocationInput::from_catalog(catalog, YEAR);
        let classes = catalog.classes_in_year(YEAR);
        let demands = expand_demands(&classes, &catalog.class_subjects);
        allocate(
            demands,
            &input,
            classification,
            &mut StdRng::seed_from_u64(seed),
        )
    }

    fn assert_hard_constraints(catalog: &Catalog, timetable: &Timetable) {
        let mut teacher_slots = HashSet::new();
        let mut class_slots = HashSet::new();
        let mut room_slots = HashSet::new();
        for s in &timetable.schedules {
            assert!(teacher_slots.insert((&s.time_slot_id, &s.teacher_id)));
            assert!(class_slots.insert((&s.time_slot_id, &s.class_id)));
            assert!(room_slots.insert((&s.time_slot_id, &s.classroom_id)));
            let room = catalog
                .classrooms
                .iter()
                .find(|r| r.id == s.classroom_id)
                .unwrap();
            if let Some(class) = catalog.classes.iter().find(|c| c.id == s.class_id) {
                assert!(room.capacity >= class.students_count);
            }
            let slot = catalog
                .time_slots
                .iter()
                .find(|t| t.id == s.time_slot_id)
                .unwrap();
            assert!(
                !catalog
                    .teacher_restrictions
                    .iter()
                    .any(|r| r.teacher_id == s.teacher_id && r.blocks(slot))
            );
        }
    }

    #[test]
    fn places_all_lessons_when_resources_suffice() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 30)];
        catalog.class_subjects = vec![link("c1", "math", "t1", 2)];
        catalog.time_slots = vec![
            slot("s1", 1, "07:30", "08:20"),
            slot("s2", 1, "08:20", "09:10"),
            slot("s3", 1, "09:30", "10:20"),
        ];
        catalog.classrooms = vec![room("r1", 35)];

        let timetable = run(&catalog, 7, ConflictClassification::Uniform);
        assert_eq!(timetable.schedules.len(), 2);
        assert!(timetable.conflicts.is_empty());
        assert_hard_constraints(&catalog, &timetable);
        // first-fit in catalog order
        let slots: HashSet<&str> = timetable
            .schedules
            .iter()
            .map(|s| s.time_slot_id.as_str())
            .collect();
        assert_eq!(slots, HashSet::from(["s1", "s2"]));
        assert!(
            timetable
                .schedules
                .iter()
                .all(|s| s.generated_by == GeneratedBy::Automatic
                    && s.status == ScheduleStatus::Active
                    && s.academic_year == YEAR)
        );
    }

    #[test]
    fn teacher_unavailable_every_day_always_conflicts() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 30)];
        catalog.class_subjects = vec![link("c1", "math", "t1", 1)];
        catalog.time_slots = vec![slot("s1", 1, "07:30", "08:20"), slot("s2", 2, "07:30", "08:20")];
        catalog.classrooms = vec![room("r1", 35)];
        catalog.teacher_restrictions = vec![all_day("t1", 1), all_day("t1", 2)];

        for seed in 0..8 {
            let timetable = run(&catalog, seed, ConflictClassification::Uniform);
            assert!(timetable.schedules.is_empty());
            assert_eq!(timetable.conflicts.len(), 1);
            assert_eq!(timetable.conflicts[0].kind, ConflictKind::TeacherDoubleBooking);
        }
    }

    #[test]
    fn shared_teacher_with_one_slot_yields_one_success_and_one_conflict() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 20), class("c2", 20)];
        catalog.class_subjects = vec![link("c1", "math", "t1", 1), link("c2", "math", "t1", 1)];
        catalog.time_slots = vec![slot("s1", 1, "07:30", "08:20")];
        catalog.classrooms = vec![room("r1", 30), room("r2", 30)];

        let mut winners = HashSet::new();
        for seed in 0..64 {
            let timetable = run(&catalog, seed, ConflictClassification::Uniform);
            assert_eq!(timetable.schedules.len(), 1);
            assert_eq!(timetable.conflicts.len(), 1);
            assert_hard_constraints(&catalog, &timetable);
            winners.insert(timetable.schedules[0].class_id.clone());
        }
        // the shuffle decides which class wins
        assert_eq!(winners.len(), 2);
    }

    #[test]
    fn undersized_rooms_turn_every_demand_into_a_conflict() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 30), class("c2", 40)];
        catalog.class_subjects = vec![link("c1", "math", "t1", 2), link("c2", "math", "t2", 1)];
        catalog.time_slots = vec![slot("s1", 1, "07:30", "08:20"), slot("s2", 1, "08:20", "09:10")];
        catalog.classrooms = vec![room("r1", 10), room("r2", 25)];

        let timetable = run(&catalog, 3, ConflictClassification::Uniform);
        assert!(timetable.schedules.is_empty());
        assert_eq!(timetable.conflicts.len(), 3);
    }

    #[test]
    fn time_range_restriction_pushes_lesson_to_a_later_slot() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 30)];
        catalog.class_subjects = vec![link("c1", "math", "t1", 1)];
        catalog.time_slots = vec![slot("s1", 1, "07:30", "08:20"), slot("s2", 1, "09:30", "10:20")];
        catalog.classrooms = vec![room("r1", 30)];
        catalog.teacher_restrictions = vec![TeacherRestriction {
            id: "r".into(),
            teacher_id: "t1".into(),
            day_of_week: 1,
            is_active: true,
            kind: RestrictionKind::TimeRange {
                start_time: time("07:00"),
                end_time: time("09:00"),
            },
        }];

        let timetable = run(&catalog, 0, ConflictClassification::Uniform);
        assert_eq!(timetable.schedules.len(), 1);
        assert_eq!(timetable.schedules[0].time_slot_id, "s2");
    }

    #[test]
    fn search_continues_when_first_free_slot_has_no_room() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 30), class("c2", 30)];
        // c1 fills r1 in s1, leaving c2's teacher free in s1 but no room
        catalog.class_subjects = vec![link("c1", "math", "t1", 1), link("c2", "math", "t2", 1)];
        catalog.time_slots = vec![slot("s1", 1, "07:30", "08:20"), slot("s2", 1, "08:20", "09:10")];
        catalog.classrooms = vec![room("r1", 30)];

        for seed in 0..8 {
            let timetable = run(&catalog, seed, ConflictClassification::Uniform);
            assert_eq!(timetable.schedules.len(), 2);
            assert_hard_constraints(&catalog, &timetable);
        }
    }

    #[test]
    fn unknown_class_skips_capacity_check() {
        let catalog = Catalog {
            classrooms: vec![room("r1", 1)],
            time_slots: vec![slot("s1", 1, "07:30", "08:20")],
            ..catalog()
        };
        let input = AllocationInput::from_catalog(&catalog, YEAR);
        let mut allocator = Allocator::new(&input, ConflictClassification::Uniform);
        let placement = allocator.place(&LessonDemand {
            class_id: "ghost".into(),
            subject_id: "math".into(),
            teacher_id: "t1".into(),
            instance_id: "ghost-math-0".into(),
        });
        assert_eq!(
            placement,
            Placement::Placed {
                time_slot_id: "s1".into(),
                classroom_id: "r1".into()
            }
        );
    }

    #[test]
    fn break_slots_and_other_years_are_never_used() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 30)];
        catalog.class_subjects = vec![link("c1", "math", "t1", 2)];
        let mut recess = slot("break", 1, "09:10", "09:30");
        recess.is_break = true;
        let mut old = slot("old", 1, "07:30", "08:20");
        old.academic_year = "2024".into();
        catalog.time_slots = vec![recess, old, slot("s1", 1, "07:30", "08:20")];
        catalog.classrooms = vec![room("r1", 30)];

        let timetable = run(&catalog, 1, ConflictClassification::Uniform);
        assert_eq!(timetable.schedules.len(), 1);
        assert_eq!(timetable.schedules[0].time_slot_id, "s1");
        assert_eq!(timetable.conflicts.len(), 1);
    }

    #[test]
    fn invariants_hold_across_random_orderings() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 25), class("c2", 32), class("c3", 18)];
        catalog.class_subjects = vec![
            link("c1", "math", "t1", 3),
            link("c1", "art", "t2", 2),
            link("c2", "math", "t1", 3),
            link("c2", "art", "t2", 2),
            link("c3", "math", "t1", 2),
        ];
        catalog.time_slots = (0..6)
            .map(|i| slot(&format!("s{i}"), 1 + i / 3, "07:30", "08:20"))
            .collect();
        catalog.classrooms = vec![room("small", 20), room("large", 35)];
        catalog.teacher_restrictions = vec![all_day("t2", 2)];

        let required = 12;
        for seed in 0..32 {
            let timetable = run(&catalog, seed, ConflictClassification::Uniform);
            assert_eq!(timetable.schedules.len() + timetable.conflicts.len(), required);
            assert_hard_constraints(&catalog, &timetable);
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_timetable() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 20), class("c2", 20)];
        catalog.class_subjects = vec![link("c1", "math", "t1", 2), link("c2", "math", "t1", 2)];
        catalog.time_slots = vec![slot("s1", 1, "07:30", "08:20"), slot("s2", 1, "08:20", "09:10")];
        catalog.classrooms = vec![room("r1", 30)];

        let ids = |t: &Timetable| t.schedules.iter().map(|s| s.id.clone()).collect::<Vec<_>>();
        let first = run(&catalog, 99, ConflictClassification::Uniform);
        let second = run(&catalog, 99, ConflictClassification::Uniform);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn expander_order_does_not_survive_into_the_timetable() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 20)];
        catalog.class_subjects = vec![link("c1", "math", "t1", 1), link("c1", "art", "t2", 1)];
        catalog.time_slots = vec![slot("s1", 1, "07:30", "08:20"), slot("s2", 1, "08:20", "09:10")];
        catalog.classrooms = vec![room("r1", 30)];

        let first_slot_subjects: HashSet<String> = (0..64)
            .map(|seed| run(&catalog, seed, ConflictClassification::Uniform))
            .filter_map(|t| {
                t.schedules
                    .into_iter()
                    .find(|s| s.time_slot_id == "s1")
                    .map(|s| s.subject_id)
            })
            .collect();
        assert_eq!(first_slot_subjects.len(), 2);
    }

    #[test]
    fn detailed_classification_reports_the_cause() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 30)];
        catalog.time_slots = vec![slot("s1", 1, "07:30", "08:20")];
        catalog.classrooms = vec![room("r1", 10)];
        catalog.class_subjects = vec![link("c1", "math", "t1", 1)];

        let timetable = run(&catalog, 0, ConflictClassification::Detailed);
        assert_eq!(timetable.conflicts[0].kind, ConflictKind::InsufficientCapacity);

        catalog.classrooms = vec![room("r1", 30)];
        catalog.teacher_restrictions = vec![all_day("t1", 1)];
        let timetable = run(&catalog, 0, ConflictClassification::Detailed);
        assert_eq!(timetable.conflicts[0].kind, ConflictKind::TeacherRestricted);

        catalog.teacher_restrictions.clear();
        catalog.class_subjects = vec![link("c1", "math", "t1", 2)];
        let timetable = run(&catalog, 0, ConflictClassification::Detailed);
        assert_eq!(timetable.conflicts[0].kind, ConflictKind::TeacherDoubleBooking);

        catalog.class_subjects = vec![link("c1", "math", "t1", 1), link("c1", "art", "t2", 1)];
        let timetable = run(&catalog, 0, ConflictClassification::Detailed);
        assert_eq!(timetable.conflicts[0].kind, ConflictKind::ClassDoubleBooking);

        catalog.time_slots.clear();
        let timetable = run(&catalog, 0, ConflictClassification::Detailed);
        assert!(
            timetable
                .conflicts
                .iter()
                .all(|c| c.kind == ConflictKind::NoAvailableSlot)
        );
    }

    #[test]
    fn detailed_classification_flags_occupied_rooms() {
        let mut catalog = catalog();
        catalog.classes = vec![class("c1", 30), class("c2", 30)];
        catalog.class_subjects = vec![link("c1", "math", "t1", 1), link("c2", "art", "t2", 1)];
        catalog.time_slots = vec![slot("s1", 1, "07:30", "08:20")];
        catalog.classrooms = vec![room("r1", 30)];

        let timetable = run(&catalog, 5, ConflictClassification::Detailed);
        assert_eq!(timetable.conflicts.len(), 1);
        assert_eq!(timetable.conflicts[0].kind, ConflictKind::RoomUnavailable);
    }
}
