//! Fixed demo data used to seed an empty roster.

use crate::model::{Status, Student};
use chrono::NaiveDate;

fn student(
    id: &str,
    name: &str,
    email: &str,
    course: &str,
    status: Status,
    (y, m, d): (i32, u32, u32),
) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        course: course.to_string(),
        status,
        enrollment_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
    }
}

/// The five-record sample set.
pub fn sample_students() -> Vec<Student> {
    vec![
        student(
            "STU-123456789",
            "John Doe",
            "john.doe@example.com",
            "Computer Science",
            Status::Active,
            (2023, 9, 1),
        ),
        student(
            "STU-234567890",
            "Jane Smith",
            "jane.smith@example.com",
            "Mathematics",
            Status::Active,
            (2023, 8, 15),
        ),
        student(
            "STU-345678901",
            "Michael Johnson",
            "michael.j@example.com",
            "Physics",
            Status::Inactive,
            (2023, 7, 20),
        ),
        student(
            "STU-456789012",
            "Emily Davis",
            "emily.d@example.com",
            "Biology",
            Status::Active,
            (2023, 9, 10),
        ),
        student(
            "STU-567890123",
            "David Wilson",
            "david.w@example.com",
            "Business Administration",
            Status::Active,
            (2023, 8, 5),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_ids_are_unique() {
        let students = sample_students();
        let ids: HashSet<_> = students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), students.len());
    }

    #[test]
    fn sample_dates_are_valid() {
        let default = NaiveDate::default();
        assert!(sample_students()
            .iter()
            .all(|s| s.enrollment_date != default));
    }
}
