use std::fs;

use chrono::{Local, TimeDelta, TimeZone};
use tempplot::logger::{log_file_name, Logger, LOG_HEADER};
use tempplot::Sample;

#[test]
fn creates_missing_directory_and_writes_header() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("nested").join("temp_logs");
    let start = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();

    let logger = Logger::open(&dir, start).unwrap();
    assert_eq!(logger.path(), dir.join("log_2024-3-7-9-5-2.csv"));
    assert_eq!(
        fs::read_to_string(logger.path()).unwrap(),
        format!("{LOG_HEADER}\n")
    );
}

#[test]
fn existing_directory_and_files_are_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let start = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
    let taken = dir.path().join(log_file_name(start));
    fs::write(&taken, "previous session\n").unwrap();

    let first = Logger::open(dir.path(), start).unwrap();
    let second = Logger::open(dir.path(), start).unwrap();

    assert_eq!(fs::read_to_string(&taken).unwrap(), "previous session\n");
    assert_eq!(first.path(), dir.path().join("log_2024-3-7-9-5-2_1.csv"));
    assert_eq!(second.path(), dir.path().join("log_2024-3-7-9-5-2_2.csv"));
}

#[test]
fn records_are_visible_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let t0 = Local::now();
    let mut logger = Logger::open(dir.path(), t0).unwrap();

    logger.write(&Sample::new(23.5, 24.1, 55.0, t0)).unwrap();
    logger
        .write(&Sample::new(
            23.75,
            24.0,
            56.0,
            t0 + TimeDelta::milliseconds(61_250),
        ))
        .unwrap();

    // Read while the logger is still open.
    let text = fs::read_to_string(logger.path()).unwrap();
    assert_eq!(
        text,
        "time,temp_a,temp_b\n00:00.000,23.5,24.1\n01:01.250,23.75,24\n"
    );
}

#[test]
fn elapsed_is_relative_to_first_record() {
    let dir = tempfile::tempdir().unwrap();
    let session = Local::now();
    let mut logger = Logger::open(dir.path(), session).unwrap();

    // First sample arrives well after the session started.
    let first = session + TimeDelta::seconds(30);
    logger.write(&Sample::new(1.0, 2.0, 3.0, first)).unwrap();
    logger
        .write(&Sample::new(1.0, 2.0, 3.0, first + TimeDelta::milliseconds(100)))
        .unwrap();

    let text = fs::read_to_string(logger.path()).unwrap();
    let times: Vec<&str> = text
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(times, vec!["00:00.000", "00:00.100"]);
}
