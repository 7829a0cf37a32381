use std::fs::File;
use std::path::Path;

use log::{info, warn};

use super::course::{Course, CourseCatalog};
use super::err::RegistryError;
use super::person::{StudentRecord, TeacherRecord};
use super::store::PersonStore;

/// build the catalog from a json array of course records
pub fn load_courses(path: &Path) -> Result<CourseCatalog, RegistryError> {
    let file = File::open(path)?;
    let records: Vec<Course> = serde_json::from_reader(file)?;
    info!("loaded {} courses from {}", records.len(), path.display());
    Ok(CourseCatalog::load(records))
}

/// ingest a student csv file
///
/// rows with an already-registered identity number are skipped and logged;
/// malformed rows and unknown faculties abort the batch
pub fn load_students(
    path: &Path,
    store: &mut PersonStore,
    catalog: &CourseCatalog,
) -> Result<usize, RegistryError> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut loaded = 0;
    let mut skipped = 0;
    for row in rdr.deserialize() {
        let record: StudentRecord = row?;
        match store.add_student(record, catalog) {
            Ok(()) => loaded += 1,
            Err(RegistryError::DuplicateError(msg)) => {
                warn!("skipping student row: {}", msg);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    info!(
        "loaded {} students ({} duplicates skipped) from {}",
        loaded,
        skipped,
        path.display()
    );
    Ok(loaded)
}

/// ingest a teacher csv file, same skip-on-duplicate policy as students
pub fn load_teachers(
    path: &Path,
    store: &mut PersonStore,
    catalog: &CourseCatalog,
) -> Result<usize, RegistryError> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut loaded = 0;
    let mut skipped = 0;
    for row in rdr.deserialize() {
        let record: TeacherRecord = row?;
        match store.add_teacher(record, catalog) {
            Ok(()) => loaded += 1,
            Err(RegistryError::DuplicateError(msg)) => {
                warn!("skipping teacher row: {}", msg);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    info!(
        "loaded {} teachers ({} duplicates skipped) from {}",
        loaded,
        skipped,
        path.display()
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const COURSES_JSON: &str = r#"[
        {"id": 6000, "name": "Painting", "faculty": "Arts", "points": 10},
        {"id": 1100, "name": "Anatomy", "faculty": "Health", "points": 8},
        {"id": 2600, "name": "Didactics", "faculty": "Education", "points": 4}
    ]"#;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    #[test]
    fn test_load_courses() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "courses.json", COURSES_JSON);
        let catalog = load_courses(&path).unwrap();
        assert_eq!(catalog.list().len(), 3);
        assert_eq!(catalog.faculties().len(), 3);
        assert_eq!(catalog.get(6000).unwrap().points, 10);
    }

    #[test]
    fn test_load_courses_bad_json() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "courses.json", "{not json");
        assert!(matches!(
            load_courses(&path),
            Err(RegistryError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_load_students_skips_duplicates() {
        let dir = tempdir().unwrap();
        let catalog = load_courses(&write_file(dir.path(), "courses.json", COURSES_JSON)).unwrap();
        let csv_path = write_file(
            dir.path(),
            "students.csv",
            "identity_number,full_name,faculty,start_date,address\n\
             883720579,Sandie Leifeste,Arts,2008,\"Rio Branco, Bulgaria, 6196762\"\n\
             883720579,Sandie Again,Arts,2009,\"Rio Branco, Bulgaria, 6196762\"\n\
             718929205,Cindelyn Han,Health,2007,\"Shanghai, Egypt, 8440710\"\n",
        );

        let mut store = PersonStore::default();
        let loaded = load_students(&csv_path, &mut store, &catalog).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(store.count_students(), 2);
        // the first occurrence won
        assert_eq!(store.get("883720579").unwrap().full_name, "Sandie Leifeste");
    }

    #[test]
    fn test_load_students_malformed_id_aborts() {
        let dir = tempdir().unwrap();
        let catalog = load_courses(&write_file(dir.path(), "courses.json", COURSES_JSON)).unwrap();
        let csv_path = write_file(
            dir.path(),
            "students.csv",
            "identity_number,full_name,faculty,start_date,address\n\
             883720579,Sandie Leifeste,Arts,2008,\"Rio Branco, Bulgaria, 6196762\"\n\
             12345,Short Id,Arts,2008,\"Rio Branco, Bulgaria, 6196762\"\n",
        );

        let mut store = PersonStore::default();
        let result = load_students(&csv_path, &mut store, &catalog);
        assert!(matches!(result, Err(RegistryError::FormatError(_))));
        // rows before the malformed one were ingested
        assert_eq!(store.count_students(), 1);
    }

    #[test]
    fn test_load_teachers() {
        let dir = tempdir().unwrap();
        let catalog = load_courses(&write_file(dir.path(), "courses.json", COURSES_JSON)).unwrap();
        let csv_path = write_file(
            dir.path(),
            "teachers.csv",
            "identity_number,full_name,faculty,start_date\n\
             329622030,Luci Erskine,Education,05/02/2003\n\
             971169962,Rosene Fillbert,Education,21/04/2013\n\
             329622030,Luci Duplicate,Education,05/02/2003\n",
        );

        let mut store = PersonStore::default();
        let loaded = load_teachers(&csv_path, &mut store, &catalog).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(store.count_teachers(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let mut store = PersonStore::default();
        let catalog = CourseCatalog::default();
        let result = load_students(&dir.path().join("absent.csv"), &mut store, &catalog);
        assert!(matches!(result, Err(RegistryError::FileReadError(_))));
    }
}
