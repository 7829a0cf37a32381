use std::collections::BTreeSet;

use log::warn;
use time::Date;

use super::course::CourseCatalog;
use super::err::RegistryError;
use super::person::{parse_date, Role};
use super::store::PersonStore;

/// read-only reporting over the store
pub struct QueryService<'a> {
    catalog: &'a CourseCatalog,
    store: &'a PersonStore,
}

impl<'a> QueryService<'a> {
    pub fn new(catalog: &'a CourseCatalog, store: &'a PersonStore) -> Self {
        Self { catalog, store }
    }

    /// names of the top n students by accumulated points
    ///
    /// ties are broken by full name, descending lexicographic, so the
    /// ranking is reproducible
    pub fn top_students_by_points(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<(u32, &str)> = self
            .store
            .students()
            .map(|student| (student.enrolled_points(self.catalog), student.full_name.as_str()))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(a.1)));
        ranked
            .into_iter()
            .take(n)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// deduplicated "city zip" pairs over all student addresses, sorted
    /// ascending; empty when there are no students
    pub fn unique_student_locations(&self) -> Vec<String> {
        let mut locations = BTreeSet::new();
        for student in self.store.students() {
            let address = match student.role() {
                Role::Student { address, .. } => address,
                _ => continue,
            };
            // addresses follow the "city, country, zip" convention
            let mut parts = address.splitn(3, ',').map(str::trim);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(city), Some(_country), Some(zip)) => {
                    locations.insert(format!("{} {}", city, zip));
                }
                _ => warn!(
                    "skipping malformed address {:?} for student {}",
                    address,
                    student.identity_number()
                ),
            }
        }
        locations.into_iter().collect()
    }

    /// (name, start_date) of teachers who started on or after the given
    /// dd/mm/yyyy date, sorted by date then name
    pub fn teachers_started_on_or_after(
        &self,
        date_str: &str,
    ) -> Result<Vec<(String, String)>, RegistryError> {
        let threshold = parse_date(date_str)?;
        let mut rows: Vec<(Date, String, String)> = Vec::new();
        for teacher in self.store.teachers() {
            let start_date = match teacher.role() {
                Role::Teacher { start_date, .. } => start_date,
                _ => continue,
            };
            // stored dates were validated at registration
            let date = parse_date(start_date)?;
            if date >= threshold {
                rows.push((date, teacher.full_name.clone(), start_date.clone()));
            }
        }
        rows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        Ok(rows.into_iter().map(|(_, name, date)| (name, date)).collect())
    }
}
