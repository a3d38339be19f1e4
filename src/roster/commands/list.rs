use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Status, Student};
use crate::store::{RecordStore, StorageBackend};

/// Display-only narrowing of the student list. Never touches stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub query: Option<String>,
    pub course: Option<String>,
    pub status: Option<Status>,
}

impl ListFilter {
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().map_or(true, str::is_empty)
            && self.course.is_none()
            && self.status.is_none()
    }

    fn keeps(&self, student: &Student) -> bool {
        let course_ok = self
            .course
            .as_deref()
            .map_or(true, |c| student.course.eq_ignore_ascii_case(c));
        let status_ok = self.status.map_or(true, |s| student.status == s);
        course_ok && status_ok
    }
}

pub fn run<B: StorageBackend>(store: &RecordStore<B>, filter: &ListFilter) -> Result<CmdResult> {
    // An empty query means the unfiltered list, not a search for "".
    let base = match filter.query.as_deref() {
        Some(q) if !q.is_empty() => store.search(q),
        _ => store.students().to_vec(),
    };

    let listed = base.into_iter().filter(|s| filter.keeps(s)).collect();
    Ok(CmdResult::default().with_listed_students(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::sample_store;

    fn names(result: &CmdResult) -> Vec<&str> {
        result.listed_students.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn lists_everything_in_insertion_order() {
        let store = sample_store();
        let result = run(&store, &ListFilter::default()).unwrap();
        assert_eq!(
            names(&result),
            vec![
                "John Doe",
                "Jane Smith",
                "Michael Johnson",
                "Emily Davis",
                "David Wilson"
            ]
        );
    }

    #[test]
    fn filters_by_course_ignoring_case() {
        let store = sample_store();
        let filter = ListFilter {
            course: Some("physics".into()),
            ..Default::default()
        };
        let result = run(&store, &filter).unwrap();
        assert_eq!(names(&result), vec!["Michael Johnson"]);
    }

    #[test]
    fn combines_query_and_status() {
        let store = sample_store();
        let filter = ListFilter {
            query: Some("example.com".into()),
            status: Some(Status::Inactive),
            ..Default::default()
        };
        let result = run(&store, &filter).unwrap();
        assert_eq!(names(&result), vec!["Michael Johnson"]);
    }

    #[test]
    fn empty_query_is_unfiltered() {
        let store = sample_store();
        let filter = ListFilter {
            query: Some(String::new()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert_eq!(run(&store, &filter).unwrap().listed_students.len(), 5);
    }
}
