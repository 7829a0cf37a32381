use std::env;
use std::path::PathBuf;
use std::process;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

mod registry;

use registry::{RegistryError, University};

fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("Failed to init the logger");

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), RegistryError> {
    // data directory from the first argument, default "data"
    let data_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let mut uni = University::new("my_uny");
    uni.load_courses(&data_dir.join("courses.json"))?;
    uni.load_students(&data_dir.join("students.csv"))?;
    uni.load_teachers(&data_dir.join("teachers.csv"))?;

    info!(
        "{}: {} courses, {} students, {} teachers",
        uni.name(),
        uni.list_courses().len(),
        uni.count_students(),
        uni.count_teachers()
    );

    println!("faculties:");
    for faculty in uni.get_faculties() {
        println!("  {}", faculty);
    }

    println!("top 10 students by points:");
    for name in uni.top_students_by_points(10) {
        println!("  {}", name);
    }

    println!("unique student locations:");
    for location in uni.unique_student_locations() {
        println!("  {}", location);
    }

    println!("teachers started on or after 01/01/1990:");
    for (name, date) in uni.teachers_started_on_or_after("01/01/1990")? {
        println!("  {} ({})", name, date);
    }

    Ok(())
}
