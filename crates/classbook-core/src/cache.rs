//! In-memory mirror of the last successful store listing.

use std::collections::HashSet;

use crate::model::Student;

/// Ordered student list, replaced wholesale on every refresh.
///
/// There is no insert/update/remove: all mutation goes
/// through the remote store followed by [`StudentCollection::replace_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentCollection {
    students: Vec<Student>,
}

impl StudentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly fetched listing, keeping the store's order.
    ///
    /// Ids must be unique; if the store repeats one, only the first
    /// occurrence is kept.
    pub fn replace_all(&mut self, students: Vec<Student>) {
        let mut seen = HashSet::with_capacity(students.len());
        let total = students.len();
        let students: Vec<Student> = students
            .into_iter()
            .filter(|s| seen.insert(s.id))
            .collect();
        if students.len() != total {
            tracing::warn!(
                dropped = total - students.len(),
                "store listing contained duplicate ids"
            );
        }
        self.students = students;
    }

    /// Read-only snapshot.
    pub fn get(&self) -> &[Student] {
        &self.students
    }

    pub fn find(&self, id: i64) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Student> {
        vec![
            Student::new(3, "Cy", 7.25),
            Student::new(1, "Ana", 12.5),
            Student::new(2, "Bo", 4.0),
        ]
    }

    #[test]
    fn starts_empty() {
        let cache = StudentCollection::new();
        assert!(cache.is_empty());
        assert!(cache.get().is_empty());
    }

    #[test]
    fn replace_then_get_preserves_order_and_fields() {
        let mut cache = StudentCollection::new();
        cache.replace_all(sample());
        assert_eq!(cache.get(), sample().as_slice());
    }

    #[test]
    fn replace_discards_previous_contents() {
        let mut cache = StudentCollection::new();
        cache.replace_all(sample());
        cache.replace_all(vec![Student::new(9, "Di", 15.0)]);
        assert_eq!(cache.len(), 1);
        assert!(cache.find(1).is_none());
        assert_eq!(cache.find(9).unwrap().name, "Di");
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let mut cache = StudentCollection::new();
        cache.replace_all(vec![
            Student::new(1, "Ana", 12.5),
            Student::new(1, "Ana (dup)", 3.0),
            Student::new(2, "Bo", 4.0),
        ]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.find(1).unwrap().name, "Ana");
    }
}
