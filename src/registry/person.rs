use std::collections::BTreeSet;

use regex::Regex;
use serde::Deserialize;
use time::{macros::format_description, Date};

use super::course::CourseCatalog;
use super::err::RegistryError;

/// input record for student registration, also the csv row shape
#[derive(Debug, Deserialize)]
pub struct StudentRecord {
    pub identity_number: String,
    pub full_name: String,
    pub faculty: String,
    pub start_date: String,
    pub address: String,
}

/// input record for teacher registration, also the csv row shape
#[derive(Debug, Deserialize)]
pub struct TeacherRecord {
    pub identity_number: String,
    pub full_name: String,
    pub faculty: String,
    pub start_date: String,
}

/// role-specific fields of a registered person
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Student {
        /// the single assigned faculty
        faculty: String,
        /// 4-digit start year
        start_date: String,
        /// "city, country, zip"
        address: String,
    },
    Teacher {
        /// distinct faculties, order of first appearance
        faculties: Vec<String>,
        /// dd/mm/yyyy
        start_date: String,
    },
}

/// a registered person with its enrollment set
///
/// enrolled courses are kept as catalog ids only; the catalog owns the
/// course records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    identity_number: String,
    pub full_name: String,
    pub(crate) courses: BTreeSet<u32>,
    pub(crate) role: Role,
}

impl Person {
    /// build a student from a validated record
    ///
    /// checks the identity number and start year formats; faculty existence
    /// is checked by the store against the catalog
    pub fn student(record: StudentRecord) -> Result<Self, RegistryError> {
        validate_identity_number(&record.identity_number)?;
        validate_start_year(&record.start_date)?;
        Ok(Person {
            identity_number: record.identity_number,
            full_name: record.full_name,
            courses: BTreeSet::new(),
            role: Role::Student {
                faculty: record.faculty,
                start_date: record.start_date,
                address: record.address,
            },
        })
    }

    /// build a teacher from a validated record
    ///
    /// the registration faculty becomes the first member of the faculty set
    pub fn teacher(record: TeacherRecord) -> Result<Self, RegistryError> {
        validate_identity_number(&record.identity_number)?;
        parse_date(&record.start_date)?;
        Ok(Person {
            identity_number: record.identity_number,
            full_name: record.full_name,
            courses: BTreeSet::new(),
            role: Role::Teacher {
                faculties: vec![record.faculty],
                start_date: record.start_date,
            },
        })
    }

    /// immutable after creation
    pub fn identity_number(&self) -> &str {
        &self.identity_number
    }

    pub fn courses(&self) -> &BTreeSet<u32> {
        &self.courses
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_student(&self) -> bool {
        matches!(self.role, Role::Student { .. })
    }

    /// sum of points of the enrolled courses
    ///
    /// derived on demand so it can never drift from the enrollment set
    pub fn enrolled_points(&self, catalog: &CourseCatalog) -> u32 {
        self.courses
            .iter()
            .filter_map(|id| catalog.get(*id))
            .map(|course| course.points)
            .sum()
    }
}

/// check that the identity number is exactly 9 ascii digits
pub fn validate_identity_number(id: &str) -> Result<(), RegistryError> {
    let re = Regex::new(r"^\d{9}$")?;
    if !re.is_match(id) {
        return Err(RegistryError::FormatError(format!(
            "identity number must be exactly 9 digits, got {:?}",
            id
        )));
    }
    Ok(())
}

/// check that a student start date is a 4-digit year
pub fn validate_start_year(date: &str) -> Result<(), RegistryError> {
    let re = Regex::new(r"^\d{4}$")?;
    if !re.is_match(date) {
        return Err(RegistryError::FormatError(format!(
            "start date must be a 4-digit year, got {:?}",
            date
        )));
    }
    Ok(())
}

/// parse a dd/mm/yyyy date string
pub fn parse_date(date: &str) -> Result<Date, RegistryError> {
    let format = format_description!("[day]/[month]/[year]");
    Date::parse(date, &format).map_err(|_| {
        RegistryError::FormatError(format!("date must be dd/mm/yyyy, got {:?}", date))
    })
}
