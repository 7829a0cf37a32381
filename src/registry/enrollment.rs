use std::collections::BTreeSet;

use super::course::{Course, CourseCatalog};
use super::err::RegistryError;
use super::person::Role;
use super::store::PersonStore;

/// maximum accumulated course points for a student
pub const MAX_STUDENT_POINTS: u32 = 30;
/// maximum enrolled courses for a teacher
pub const MAX_TEACHER_COURSES: usize = 12;
/// maximum distinct faculties for a teacher
pub const MAX_TEACHER_FACULTIES: usize = 3;

/// validates and applies enrollment operations against the store
///
/// every mutating operation is check-then-act: all rules are evaluated
/// before the single mutation, so a failed call leaves the store untouched
pub struct EnrollmentEngine<'a> {
    catalog: &'a CourseCatalog,
}

impl<'a> EnrollmentEngine<'a> {
    pub fn new(catalog: &'a CourseCatalog) -> Self {
        Self { catalog }
    }

    /// enroll a person into a catalog course
    pub fn add_course(
        &self,
        store: &mut PersonStore,
        person_id: &str,
        course_id: u32,
    ) -> Result<(), RegistryError> {
        let course = self
            .catalog
            .get(course_id)
            .ok_or_else(|| RegistryError::NotFoundError(format!("course with id {}", course_id)))?;
        let person = store.get_mut(person_id).ok_or_else(|| {
            RegistryError::NotFoundError(format!("person with id {}", person_id))
        })?;

        if person.courses.contains(&course_id) {
            return Err(RegistryError::DuplicateError(format!(
                "person {} is already enrolled in course {}",
                person_id, course_id
            )));
        }

        let points = person.enrolled_points(self.catalog);
        match &person.role {
            Role::Student { faculty, .. } => check_student_policy(faculty, points, course)?,
            Role::Teacher { faculties, .. } => {
                check_teacher_policy(faculties, person.courses.len(), course)?
            }
        }

        person.courses.insert(course_id);
        if let Role::Teacher { faculties, .. } = &mut person.role {
            if !faculties.contains(&course.faculty) {
                faculties.push(course.faculty.clone());
            }
        }
        Ok(())
    }

    /// drop a course from a person's enrollment
    ///
    /// removing a catalog course the person is not enrolled in is a no-op
    pub fn remove_course(
        &self,
        store: &mut PersonStore,
        person_id: &str,
        course_id: u32,
    ) -> Result<(), RegistryError> {
        if self.catalog.get(course_id).is_none() {
            return Err(RegistryError::NotFoundError(format!(
                "course with id {}",
                course_id
            )));
        }
        let person = store.get_mut(person_id).ok_or_else(|| {
            RegistryError::NotFoundError(format!("person with id {}", person_id))
        })?;

        if !person.courses.remove(&course_id) {
            return Ok(());
        }

        if matches!(person.role, Role::Teacher { .. }) {
            // keep only the faculties still represented among the remaining
            // enrolled courses, preserving first-appearance order
            let represented: BTreeSet<&str> = person
                .courses
                .iter()
                .filter_map(|id| self.catalog.get(*id))
                .map(|course| course.faculty.as_str())
                .collect();
            if let Role::Teacher { faculties, .. } = &mut person.role {
                faculties.retain(|faculty| represented.contains(faculty.as_str()));
            }
        }
        Ok(())
    }

    /// reassign a student to another faculty
    ///
    /// only valid while the student holds zero enrolled courses
    pub fn change_faculty(
        &self,
        store: &mut PersonStore,
        person_id: &str,
        new_faculty: &str,
    ) -> Result<(), RegistryError> {
        let person = store
            .get_mut(person_id)
            .filter(|person| person.is_student())
            .ok_or_else(|| {
                RegistryError::NotFoundError(format!("student with id {}", person_id))
            })?;
        if !self.catalog.has_faculty(new_faculty) {
            return Err(RegistryError::ValidationError(format!(
                "faculty {:?} is not in the catalog",
                new_faculty
            )));
        }
        let course_count = person.courses.len();
        match &mut person.role {
            Role::Student { faculty, .. } => {
                if faculty.as_str() == new_faculty {
                    return Ok(());
                }
                if course_count > 0 {
                    return Err(RegistryError::PolicyViolation(format!(
                        "student {} still has {} courses from faculty {:?}",
                        person_id, course_count, faculty
                    )));
                }
                *faculty = new_faculty.to_string();
                Ok(())
            }
            Role::Teacher { .. } => unreachable!("filtered to students above"),
        }
    }
}

/// a student may only take courses of its own faculty, up to the points cap
fn check_student_policy(
    faculty: &str,
    points: u32,
    course: &Course,
) -> Result<(), RegistryError> {
    if course.faculty != faculty {
        return Err(RegistryError::PolicyViolation(format!(
            "course {} belongs to faculty {:?}, student is in {:?}",
            course.id, course.faculty, faculty
        )));
    }
    if points + course.points > MAX_STUDENT_POINTS {
        return Err(RegistryError::PolicyViolation(format!(
            "course {} would raise points to {} (cap is {})",
            course.id,
            points + course.points,
            MAX_STUDENT_POINTS
        )));
    }
    Ok(())
}

/// a teacher is capped on both course count and faculty breadth
fn check_teacher_policy(
    faculties: &[String],
    course_count: usize,
    course: &Course,
) -> Result<(), RegistryError> {
    if !faculties.iter().any(|f| f == &course.faculty)
        && faculties.len() >= MAX_TEACHER_FACULTIES
    {
        return Err(RegistryError::PolicyViolation(format!(
            "course {} would add a {}th faculty (cap is {})",
            course.id,
            faculties.len() + 1,
            MAX_TEACHER_FACULTIES
        )));
    }
    if course_count >= MAX_TEACHER_COURSES {
        return Err(RegistryError::PolicyViolation(format!(
            "teacher already has {} courses (cap is {})",
            course_count, MAX_TEACHER_COURSES
        )));
    }
    Ok(())
}
