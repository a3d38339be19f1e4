use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Status, Student};
use crate::store::{RecordStore, StorageBackend};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseCount {
    pub course: String,
    pub count: usize,
    pub percent: f64,
}

/// Aggregate counts over the student list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrollmentStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Courses in the order they first appear in the list.
    pub by_course: Vec<CourseCount>,
}

impl EnrollmentStats {
    pub fn from_students(students: &[Student]) -> Self {
        let total = students.len();
        let active = students
            .iter()
            .filter(|s| s.status == Status::Active)
            .count();

        let mut counts: Vec<(String, usize)> = Vec::new();
        for student in students {
            match counts.iter_mut().find(|(course, _)| *course == student.course) {
                Some((_, n)) => *n += 1,
                None => counts.push((student.course.clone(), 1)),
            }
        }

        let by_course = counts
            .into_iter()
            .map(|(course, count)| CourseCount {
                course,
                count,
                percent: percent(count, total),
            })
            .collect();

        Self {
            total,
            active,
            inactive: total - active,
            by_course,
        }
    }

    pub fn active_percent(&self) -> f64 {
        percent(self.active, self.total)
    }

    pub fn inactive_percent(&self) -> f64 {
        percent(self.inactive, self.total)
    }

    /// Largest per-course count, used to scale charts.
    pub fn max_course_count(&self) -> usize {
        self.by_course.iter().map(|c| c.count).max().unwrap_or(0)
    }
}

/// Share of `part` in `total`, rounded to one decimal place. Zero when `total` is zero.
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / total as f64).round() / 10.0
}

pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(EnrollmentStats::from_students(store.students())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{empty_store, new_student, sample_store};

    #[test]
    fn counts_sample_data() {
        let store = sample_store();
        let stats = run(&store).unwrap().stats.unwrap();

        assert_eq!(stats.total, 5);
        assert_eq!(stats.active, 4);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.active_percent(), 80.0);
        assert_eq!(stats.by_course.len(), 5);
        assert_eq!(stats.by_course[0].course, "Computer Science");
        assert_eq!(stats.by_course[0].percent, 20.0);
    }

    #[test]
    fn groups_repeated_courses_in_first_seen_order() {
        let mut store = empty_store();
        store.add(new_student("A", "History", Status::Active)).unwrap();
        store.add(new_student("B", "Physics", Status::Inactive)).unwrap();
        store.add(new_student("C", "History", Status::Active)).unwrap();

        let stats = EnrollmentStats::from_students(store.students());
        assert_eq!(stats.by_course[0].course, "History");
        assert_eq!(stats.by_course[0].count, 2);
        assert_eq!(stats.by_course[0].percent, 66.7);
        assert_eq!(stats.by_course[1].percent, 33.3);
        assert_eq!(stats.max_course_count(), 2);
    }

    #[test]
    fn empty_list_has_zero_percentages() {
        let stats = EnrollmentStats::from_students(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.active_percent(), 0.0);
        assert!(stats.by_course.is_empty());
        assert_eq!(stats.max_course_count(), 0);
    }
}
