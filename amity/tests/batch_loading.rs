//! Integration tests for loading people from files.

mod common;

use tempfile::tempdir;

use amity::{BatchFile, Error, Role};

use common::{campus, write_people_file};

const PEOPLE: &str = "\
OLUWAFEMI SULE FELLOW Y
DOMINIC WALTERS STAFF
SIMON PATTERSON FELLOW Y
MARI LAWRENCE FELLOW Y
LEIGH RILEY STAFF
TANA LOPEZ FELLOW Y
KELLY McGUIRE STAFF N
";

#[test]
fn test_load_people_file() {
    let dir = tempdir().unwrap();
    let path = write_people_file(dir.path(), PEOPLE);
    let mut amity = campus(&["Blue", "Red"], &["Green"]);

    let ids = amity
        .load_people(BatchFile::open(&path).unwrap().records().unwrap())
        .unwrap();
    let ids: Vec<_> = ids.iter().map(ToString::to_string).collect();
    assert_eq!(
        ids,
        vec!["FL001", "ST001", "FL002", "FL003", "ST002", "FL004", "ST003"]
    );

    assert_eq!(amity.people(Some(Role::Staff)).count(), 3);
    assert_eq!(amity.people(Some(Role::Fellow)).count(), 4);
    assert_eq!(amity.room("Green").unwrap().occupants().len(), 4);
    assert!(amity.unallocated().is_empty());
    assert_eq!(
        amity.person(&"ST003".parse().unwrap()).unwrap().name(),
        "KELLY McGUIRE"
    );
}

#[test]
fn test_malformed_file_mutates_nothing() {
    let dir = tempdir().unwrap();
    let path = write_people_file(
        dir.path(),
        "JANE DOE FELLOW Y\nJOHN ROE JANITOR\nMARY MAJOR STAFF\n",
    );
    let mut amity = campus(&["Blue"], &["Green"]);
    let before = amity.snapshot();

    let err = amity
        .load_people(BatchFile::open(&path).unwrap().records().unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::BatchFormat { line: 2, .. }));
    assert_eq!(amity.snapshot(), before);
}

#[test]
fn test_batch_file_is_restartable() {
    let dir = tempdir().unwrap();
    let path = write_people_file(dir.path(), PEOPLE);
    let batch = BatchFile::open(&path).unwrap();

    let first: Vec<_> = batch.records().unwrap().collect::<Result<_, _>>().unwrap();
    let second: Vec<_> = batch.records().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(first.len(), 7);
    assert_eq!(first, second);
}

#[test]
fn test_overflow_reported_as_unallocated() {
    let dir = tempdir().unwrap();
    let path = write_people_file(dir.path(), PEOPLE);
    let mut amity = campus(&["Blue"], &[]);

    amity
        .load_people(BatchFile::open(&path).unwrap().records().unwrap())
        .unwrap();

    assert!(amity.room("Blue").unwrap().is_full());
    let without_office = amity.people(None).filter(|p| p.office().is_none()).count();
    assert_eq!(without_office, 1);
    // Strict rule: no fellow has a living space
    assert_eq!(amity.unallocated().fellows.len(), 4);
}
