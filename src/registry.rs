use std::collections::BTreeSet;
use std::path::Path;

mod course;
mod enrollment;
mod err;
mod loader;
mod person;
mod query;
mod store;

pub use course::Course;
pub use err::RegistryError;
pub use person::{Person, Role, StudentRecord, TeacherRecord};

use course::CourseCatalog;
use enrollment::EnrollmentEngine;
use query::QueryService;
use store::PersonStore;

/// the whole registry: course catalog, person store and the operations
/// over them
///
/// the enrollment engine and the query service borrow the catalog and the
/// store, they never copy their data
pub struct University {
    name: String,
    catalog: CourseCatalog,
    store: PersonStore,
}

impl University {
    pub fn new(name: &str) -> Self {
        University {
            name: name.to_string(),
            catalog: CourseCatalog::default(),
            store: PersonStore::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// load the course catalog from a json file, once
    pub fn load_courses(&mut self, path: &Path) -> Result<(), RegistryError> {
        if self.catalog.is_loaded() {
            return Err(RegistryError::DuplicateError(
                "course catalog is already loaded".to_string(),
            ));
        }
        self.catalog = loader::load_courses(path)?;
        Ok(())
    }

    /// batch-ingest students from a csv file, returns the number loaded
    pub fn load_students(&mut self, path: &Path) -> Result<usize, RegistryError> {
        loader::load_students(path, &mut self.store, &self.catalog)
    }

    /// batch-ingest teachers from a csv file, returns the number loaded
    pub fn load_teachers(&mut self, path: &Path) -> Result<usize, RegistryError> {
        loader::load_teachers(path, &mut self.store, &self.catalog)
    }

    pub fn add_student(&mut self, record: StudentRecord) -> Result<(), RegistryError> {
        self.store.add_student(record, &self.catalog)
    }

    pub fn add_teacher(&mut self, record: TeacherRecord) -> Result<(), RegistryError> {
        self.store.add_teacher(record, &self.catalog)
    }

    /// delete a person holding zero enrolled courses
    pub fn remove_person(&mut self, person_id: &str) -> Result<(), RegistryError> {
        self.store.remove(person_id)
    }

    pub fn change_faculty(
        &mut self,
        person_id: &str,
        new_faculty: &str,
    ) -> Result<(), RegistryError> {
        EnrollmentEngine::new(&self.catalog).change_faculty(&mut self.store, person_id, new_faculty)
    }

    pub fn add_course(&mut self, person_id: &str, course_id: u32) -> Result<(), RegistryError> {
        EnrollmentEngine::new(&self.catalog).add_course(&mut self.store, person_id, course_id)
    }

    pub fn remove_course(&mut self, person_id: &str, course_id: u32) -> Result<(), RegistryError> {
        EnrollmentEngine::new(&self.catalog).remove_course(&mut self.store, person_id, course_id)
    }

    pub fn get_person_by_id(&self, person_id: &str) -> Option<&Person> {
        self.store.get(person_id)
    }

    /// the catalog entries a person is enrolled in, ascending by course id
    pub fn get_courses(&self, person_id: &str) -> Result<Vec<&Course>, RegistryError> {
        let person = self.store.get(person_id).ok_or_else(|| {
            RegistryError::NotFoundError(format!("person with id {}", person_id))
        })?;
        Ok(person
            .courses()
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .collect())
    }

    pub fn list_courses(&self) -> Vec<&Course> {
        self.catalog.list()
    }

    pub fn get_faculties(&self) -> &BTreeSet<String> {
        self.catalog.faculties()
    }

    pub fn top_students_by_points(&self, n: usize) -> Vec<String> {
        QueryService::new(&self.catalog, &self.store).top_students_by_points(n)
    }

    pub fn unique_student_locations(&self) -> Vec<String> {
        QueryService::new(&self.catalog, &self.store).unique_student_locations()
    }

    pub fn teachers_started_on_or_after(
        &self,
        date_str: &str,
    ) -> Result<Vec<(String, String)>, RegistryError> {
        QueryService::new(&self.catalog, &self.store).teachers_started_on_or_after(date_str)
    }

    pub fn count_students(&self) -> usize {
        self.store.count_students()
    }

    pub fn count_teachers(&self) -> usize {
        self.store.count_teachers()
    }
}
