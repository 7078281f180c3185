//! Expansion of class-subject assignments into individual weekly lessons.
//!
//! Emission order is class-major, then subject-minor, following catalog
//! order. The allocator shuffles the queue before placing anything, so this
//! order does not carry over into the generated timetable.

use crate::data::{Class, ClassSubject, LessonDemand};
use log::trace;

/// Builds one [`LessonDemand`] per required weekly lesson of `classes`.
///
/// Assignments pointing at classes outside `classes` are ignored.
pub fn expand_demands(classes: &[&Class], class_subjects: &[ClassSubject]) -> Vec<LessonDemand> {
    let mut demands = Vec::new();
    for class in classes {
        let assignments: Vec<&ClassSubject> = class_subjects
            .iter()
            .filter(|cs| cs.class_id == class.id)
            .collect();
        trace!("Class {}: {} subject assignments", class.id, assignments.len());

        for assignment in assignments {
            for ordinal in 0..assignment.lessons_per_week() {
                demands.push(LessonDemand {
                    class_id: class.id.clone(),
                    subject_id: assignment.subject_id.clone(),
                    teacher_id: assignment.teacher_id.clone(),
                    instance_id: format!("{}-{}-{}", class.id, assignment.subject_id, ordinal),
                });
            }
        }
    }
    demands
}
