//! Class-level aggregate statistics.
//!
//! All functions are pure reductions over a snapshot of the collection.
//! Results are rounded to two decimals, matching how the figures are shown.
//! An empty collection has no mean, max, or min: the functions return
//! [`StatsError::EmptyCollection`] and [`ClassStats::compute`] returns `None`.

use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::model::{Status, Student};

/// Round half away from zero to two decimal places. Values too large to
/// scale are already whole and come back unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

/// Arithmetic mean of all averages.
pub fn mean(students: &[Student]) -> Result<f64, StatsError> {
    if students.is_empty() {
        return Err(StatsError::EmptyCollection);
    }
    let total: f64 = students.iter().map(|s| s.average).sum();
    Ok(round2(total / students.len() as f64))
}

/// Highest average.
pub fn max(students: &[Student]) -> Result<f64, StatsError> {
    students
        .iter()
        .map(|s| s.average)
        .reduce(f64::max)
        .map(round2)
        .ok_or(StatsError::EmptyCollection)
}

/// Lowest average.
pub fn min(students: &[Student]) -> Result<f64, StatsError> {
    students
        .iter()
        .map(|s| s.average)
        .reduce(f64::min)
        .map(round2)
        .ok_or(StatsError::EmptyCollection)
}

/// Classify a single average. See [`Status::classify`].
pub fn classify(average: f64) -> Status {
    Status::classify(average)
}

/// Mean, max, and min of a non-empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl ClassStats {
    pub fn compute(students: &[Student]) -> Option<Self> {
        Some(Self {
            count: students.len(),
            mean: mean(students).ok()?,
            max: max(students).ok()?,
            min: min(students).ok()?,
        })
    }
}

/// How many students fall in each classification band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub passed: usize,
    pub retake: usize,
    pub excluded: usize,
}

impl StatusBreakdown {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Passed => self.passed,
            Status::Retake => self.retake,
            Status::Excluded => self.excluded,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.retake + self.excluded
    }
}

pub fn status_breakdown(students: &[Student]) -> StatusBreakdown {
    students
        .iter()
        .fold(StatusBreakdown::default(), |mut acc, s| {
            match s.status() {
                Status::Passed => acc.passed += 1,
                Status::Retake => acc.retake += 1,
                Status::Excluded => acc.excluded += 1,
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class() -> Vec<Student> {
        vec![
            Student::new(1, "Ana", 12.5),
            Student::new(2, "Bo", 4.0),
            Student::new(3, "Cy", 7.25),
        ]
    }

    #[test]
    fn example_class() {
        let students = class();
        assert_eq!(mean(&students).unwrap(), 7.92);
        assert_eq!(max(&students).unwrap(), 12.5);
        assert_eq!(min(&students).unwrap(), 4.0);

        let statuses: Vec<Status> = students.iter().map(Student::status).collect();
        assert_eq!(
            statuses,
            vec![Status::Passed, Status::Excluded, Status::Retake]
        );
    }

    #[test]
    fn empty_collection_is_an_error() {
        assert_eq!(mean(&[]), Err(StatsError::EmptyCollection));
        assert_eq!(max(&[]), Err(StatsError::EmptyCollection));
        assert_eq!(min(&[]), Err(StatsError::EmptyCollection));
        assert_eq!(ClassStats::compute(&[]), None);
    }

    #[test]
    fn single_student() {
        let students = vec![Student::new(1, "Solo", 13.333)];
        let stats = ClassStats::compute(&students).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 13.33);
        assert_eq!(stats.max, 13.33);
        assert_eq!(stats.min, 13.33);
    }

    #[test]
    fn mean_lies_between_min_and_max() {
        let classes: Vec<Vec<f64>> = vec![
            vec![0.0, 20.0],
            vec![0.1, 0.1, 0.1],
            vec![19.99, 3.33, 7.77, 11.11, 15.5],
            vec![-2.0, 25.0, 9.999],
            vec![10.0; 40],
        ];
        for averages in classes {
            let students: Vec<Student> = averages
                .iter()
                .enumerate()
                .map(|(i, &a)| Student::new(i as i64, format!("s{i}"), a))
                .collect();
            let stats = ClassStats::compute(&students).unwrap();
            let expected = round2(averages.iter().sum::<f64>() / averages.len() as f64);
            assert_eq!(stats.mean, expected);
            assert!(
                stats.min <= stats.mean && stats.mean <= stats.max,
                "{stats:?} for {averages:?}"
            );
        }
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(7.916_666), 7.92);
        assert_eq!(round2(4.0), 4.0);
        assert_eq!(round2(-1.236), -1.24);
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(-1e307), -1e307);
    }

    #[test]
    fn huge_averages_stay_finite() {
        let students = vec![Student::new(1, "Big", 1e307), Student::new(2, "Small", 1.0)];
        assert_eq!(max(&students).unwrap(), 1e307);
        assert_eq!(min(&students).unwrap(), 1.0);
        let mean = mean(&students).unwrap();
        assert!(mean.is_finite());
        assert_eq!(mean, 5e306);
    }

    #[test]
    fn breakdown_counts_each_band() {
        let mut students = class();
        students.push(Student::new(4, "Di", 10.0));
        let breakdown = status_breakdown(&students);
        assert_eq!(breakdown.passed, 2);
        assert_eq!(breakdown.retake, 1);
        assert_eq!(breakdown.excluded, 1);
        assert_eq!(breakdown.total(), 4);
        assert_eq!(breakdown.get(Status::Retake), 1);
    }

    #[test]
    fn classify_matches_status() {
        assert_eq!(classify(4.99), Status::Excluded);
        assert_eq!(classify(5.0), Status::Retake);
        assert_eq!(classify(9.99), Status::Retake);
        assert_eq!(classify(10.0), Status::Passed);
    }
}
