use std::collections::{BTreeMap, BTreeSet};

use log::warn;
use serde::Deserialize;

/// a single catalog entry, immutable after load
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub id: u32,
    pub name: String,
    pub faculty: String,
    pub points: u32,
}

/// the course catalog and its derived faculty set
///
/// populated once by [`CourseCatalog::load`]; never mutated afterwards
#[derive(Debug, Default)]
pub struct CourseCatalog {
    courses: BTreeMap<u32, Course>,
    faculties: BTreeSet<String>,
}

impl CourseCatalog {
    /// build the catalog from parsed course records
    ///
    /// duplicate ids within the batch are skipped and logged, the first
    /// occurrence wins
    pub fn load(records: Vec<Course>) -> Self {
        let mut courses: BTreeMap<u32, Course> = BTreeMap::new();
        let mut faculties = BTreeSet::new();
        for course in records {
            if courses.contains_key(&course.id) {
                warn!("skipping duplicate course id {}", course.id);
                continue;
            }
            faculties.insert(course.faculty.clone());
            courses.insert(course.id, course);
        }
        CourseCatalog { courses, faculties }
    }

    pub fn get(&self, id: u32) -> Option<&Course> {
        self.courses.get(&id)
    }

    pub fn list(&self) -> Vec<&Course> {
        self.courses.values().collect()
    }

    /// distinct faculty names across all loaded courses
    pub fn faculties(&self) -> &BTreeSet<String> {
        &self.faculties
    }

    pub fn has_faculty(&self, name: &str) -> bool {
        self.faculties.contains(name)
    }

    pub fn is_loaded(&self) -> bool {
        !self.courses.is_empty()
    }
}
