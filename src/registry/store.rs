use std::collections::BTreeMap;

use super::course::CourseCatalog;
use super::err::RegistryError;
use super::person::{Person, StudentRecord, TeacherRecord};

/// the two keyed person collections
///
/// identity numbers are unique across the union of both maps
#[derive(Debug, Default)]
pub struct PersonStore {
    students: BTreeMap<String, Person>,
    teachers: BTreeMap<String, Person>,
}

impl PersonStore {
    /// register a student
    pub fn add_student(
        &mut self,
        record: StudentRecord,
        catalog: &CourseCatalog,
    ) -> Result<(), RegistryError> {
        if self.contains(&record.identity_number) {
            return Err(RegistryError::DuplicateError(format!(
                "person with id {} already exists",
                record.identity_number
            )));
        }
        if !catalog.has_faculty(&record.faculty) {
            return Err(RegistryError::ValidationError(format!(
                "faculty {:?} is not in the catalog",
                record.faculty
            )));
        }
        let student = Person::student(record)?;
        self.students
            .insert(student.identity_number().to_string(), student);
        Ok(())
    }

    /// register a teacher
    pub fn add_teacher(
        &mut self,
        record: TeacherRecord,
        catalog: &CourseCatalog,
    ) -> Result<(), RegistryError> {
        if self.contains(&record.identity_number) {
            return Err(RegistryError::DuplicateError(format!(
                "person with id {} already exists",
                record.identity_number
            )));
        }
        if !catalog.has_faculty(&record.faculty) {
            return Err(RegistryError::ValidationError(format!(
                "faculty {:?} is not in the catalog",
                record.faculty
            )));
        }
        let teacher = Person::teacher(record)?;
        self.teachers
            .insert(teacher.identity_number().to_string(), teacher);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.students.contains_key(id) || self.teachers.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Person> {
        self.students.get(id).or_else(|| self.teachers.get(id))
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Person> {
        if let Some(student) = self.students.get_mut(id) {
            return Some(student);
        }
        self.teachers.get_mut(id)
    }

    /// delete a person
    ///
    /// only allowed while the person holds zero enrolled courses
    pub fn remove(&mut self, id: &str) -> Result<(), RegistryError> {
        let person = self
            .get(id)
            .ok_or_else(|| RegistryError::NotFoundError(format!("person with id {}", id)))?;
        if !person.courses().is_empty() {
            return Err(RegistryError::PolicyViolation(format!(
                "person {} still has {} enrolled courses",
                id,
                person.courses().len()
            )));
        }
        self.students.remove(id).or_else(|| self.teachers.remove(id));
        Ok(())
    }

    pub fn students(&self) -> impl Iterator<Item = &Person> {
        self.students.values()
    }

    pub fn teachers(&self) -> impl Iterator<Item = &Person> {
        self.teachers.values()
    }

    pub fn count_students(&self) -> usize {
        self.students.len()
    }

    pub fn count_teachers(&self) -> usize {
        self.teachers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::course::Course;

    fn catalog() -> CourseCatalog {
        CourseCatalog::load(vec![
            Course {
                id: 6000,
                name: "Painting".to_string(),
                faculty: "Arts".to_string(),
                points: 10,
            },
            Course {
                id: 1100,
                name: "Anatomy".to_string(),
                faculty: "Health".to_string(),
                points: 8,
            },
        ])
    }

    fn student_record(id: &str, name: &str) -> StudentRecord {
        StudentRecord {
            identity_number: id.to_string(),
            full_name: name.to_string(),
            faculty: "Arts".to_string(),
            start_date: "2008".to_string(),
            address: "Rio Branco, Bulgaria, 6196762".to_string(),
        }
    }

    fn teacher_record(id: &str, name: &str) -> TeacherRecord {
        TeacherRecord {
            identity_number: id.to_string(),
            full_name: name.to_string(),
            faculty: "Health".to_string(),
            start_date: "05/02/2003".to_string(),
        }
    }

    #[test]
    fn test_add_and_get_student() {
        let catalog = catalog();
        let mut store = PersonStore::default();
        store
            .add_student(student_record("883720579", "Sandie Leifeste"), &catalog)
            .unwrap();
        let sandie = store.get("883720579").unwrap();
        assert_eq!(sandie.full_name, "Sandie Leifeste");
        assert!(sandie.courses().is_empty());
        assert_eq!(store.count_students(), 1);
        assert_eq!(store.count_teachers(), 0);
    }

    #[test]
    fn test_identity_unique_across_roles() {
        let catalog = catalog();
        let mut store = PersonStore::default();
        store
            .add_student(student_record("883720579", "Sandie Leifeste"), &catalog)
            .unwrap();
        // same id as the student, different role
        let result = store.add_teacher(teacher_record("883720579", "Luci Erskine"), &catalog);
        assert!(matches!(result, Err(RegistryError::DuplicateError(_))));
        assert_eq!(store.count_teachers(), 0);
    }

    #[test]
    fn test_unknown_faculty_is_rejected() {
        let catalog = catalog();
        let mut store = PersonStore::default();
        let mut record = student_record("883720579", "Sandie Leifeste");
        record.faculty = "Astrology".to_string();
        let result = store.add_student(record, &catalog);
        assert!(matches!(result, Err(RegistryError::ValidationError(_))));
    }

    #[test]
    fn test_malformed_dates_are_rejected() {
        let catalog = catalog();
        let mut store = PersonStore::default();

        let mut record = student_record("883720579", "Sandie Leifeste");
        record.start_date = "05/02/2003".to_string();
        assert!(matches!(
            store.add_student(record, &catalog),
            Err(RegistryError::FormatError(_))
        ));

        let mut record = teacher_record("329622030", "Luci Erskine");
        record.start_date = "2003".to_string();
        assert!(matches!(
            store.add_teacher(record, &catalog),
            Err(RegistryError::FormatError(_))
        ));
    }

    #[test]
    fn test_remove_person() {
        let catalog = catalog();
        let mut store = PersonStore::default();
        store
            .add_teacher(teacher_record("329622030", "Luci Erskine"), &catalog)
            .unwrap();
        store
            .add_teacher(teacher_record("971169962", "Rosene Fillbert"), &catalog)
            .unwrap();
        assert_eq!(store.count_teachers(), 2);
        store.remove("971169962").unwrap();
        assert_eq!(store.count_teachers(), 1);
        assert!(store.get("971169962").is_none());
        assert!(matches!(
            store.remove("971169962"),
            Err(RegistryError::NotFoundError(_))
        ));
    }

    #[test]
    fn test_remove_person_with_courses_is_rejected() {
        let catalog = catalog();
        let mut store = PersonStore::default();
        store
            .add_student(student_record("883720579", "Sandie Leifeste"), &catalog)
            .unwrap();
        store.get_mut("883720579").unwrap().courses.insert(6000);
        assert!(matches!(
            store.remove("883720579"),
            Err(RegistryError::PolicyViolation(_))
        ));
        // the person is still registered
        assert!(store.get("883720579").is_some());
    }
}
