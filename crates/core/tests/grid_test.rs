use chrono::NaiveTime;
use pretty_assertions::assert_eq;
use rstest::rstest;
use timetable_core::{
    errors::TimetableError,
    grid::{build_grid, check_free, find_occupant, insert, remove, Cell, ConflictPolicy, GridBounds},
    models::schedule::{Coordinate, DayOfWeek, ScheduleSlot},
};
use uuid::Uuid;

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S").expect("Invalid test time")
}

fn slot(id: &str, day: DayOfWeek, hour: u8, lesson: &str) -> ScheduleSlot {
    ScheduleSlot {
        id: id.to_string(),
        lesson_id: None,
        classroom_id: None,
        day_of_week: day,
        lesson_order: hour,
        start_time: time("08:00:00"),
        end_time: time("08:45:00"),
        lesson_name: Some(lesson.to_string()),
        lesson_code: None,
        teacher_name: None,
    }
}

fn random_slot(day: DayOfWeek, hour: u8) -> ScheduleSlot {
    slot(&Uuid::new_v4().to_string(), day, hour, "Lesson")
}

#[test]
fn test_single_monday_math_slot() {
    let slots = vec![slot("s1", DayOfWeek::Monday, 1, "Math")];
    let grid = build_grid(&slots, &GridBounds::default()).expect("Failed to build grid");

    assert_eq!(grid.cell_count(), 40);
    assert_eq!(grid.occupied_count(), 1);

    let cell = grid.lookup(DayOfWeek::Monday, 1).expect("Lookup failed");
    assert_eq!(cell.slot().and_then(|s| s.lesson_name.as_deref()), Some("Math"));

    let empty = grid.cells().iter().filter(|cell| cell.is_empty()).count();
    assert_eq!(empty, 39);
}

#[test]
fn test_empty_input_gives_empty_grid() {
    let grid = build_grid(&[], &GridBounds::default()).expect("Failed to build grid");

    assert_eq!(grid.cell_count(), 40);
    assert!(grid.cells().iter().all(|cell| *cell == Cell::Empty));
    assert!(grid.shadowed().is_empty());
}

#[rstest]
#[case(vec![DayOfWeek::Monday], vec![1])]
#[case(vec![DayOfWeek::Monday, DayOfWeek::Wednesday], vec![1, 2, 3])]
#[case(DayOfWeek::ALL.to_vec(), (1..=8).collect())]
#[case(vec![DayOfWeek::Friday, DayOfWeek::Tuesday], vec![6, 2])]
fn test_one_cell_per_coordinate(#[case] days: Vec<DayOfWeek>, #[case] hours: Vec<u8>) {
    let bounds = GridBounds::new(days.clone(), hours.clone()).expect("Invalid bounds");
    let grid = build_grid(&[], &bounds).expect("Failed to build grid");

    assert_eq!(grid.cell_count(), days.len() * hours.len());
    for day in &days {
        for hour in &hours {
            assert!(grid.lookup(*day, *hour).is_ok());
        }
    }
}

#[test]
fn test_every_slot_is_found_at_its_coordinate() {
    let slots: Vec<ScheduleSlot> = DayOfWeek::ALL
        .iter()
        .enumerate()
        .map(|(i, day)| random_slot(*day, i as u8 + 1))
        .collect();
    let grid = build_grid(&slots, &GridBounds::default()).expect("Failed to build grid");

    for s in &slots {
        let cell = grid.lookup(s.day_of_week, s.lesson_order).expect("Lookup failed");
        assert_eq!(cell, Cell::Occupied(s));
    }
    assert_eq!(grid.occupied_count(), slots.len());
}

#[test]
fn test_rows_follow_hour_order() {
    let slots = vec![
        slot("a", DayOfWeek::Tuesday, 3, "History"),
        slot("b", DayOfWeek::Friday, 1, "Art"),
    ];
    let grid = build_grid(&slots, &GridBounds::default()).expect("Failed to build grid");

    let rows: Vec<(u8, usize)> = grid
        .rows()
        .map(|(hour, cells)| (hour, cells.len()))
        .collect();
    assert_eq!(rows, (1..=8).map(|h| (h, 5)).collect::<Vec<_>>());

    let (_, first_row) = grid.rows().next().expect("Missing first row");
    assert_eq!(first_row[4].slot().map(|s| s.id.as_str()), Some("b"));

    let (_, third_row) = grid.rows().nth(2).expect("Missing third row");
    assert_eq!(third_row[1].slot().map(|s| s.id.as_str()), Some("a"));
}

#[test]
fn test_building_twice_is_identical() {
    let slots = vec![
        slot("s1", DayOfWeek::Monday, 1, "Math"),
        slot("s2", DayOfWeek::Thursday, 5, "Physics"),
    ];
    let bounds = GridBounds::default();

    let first = build_grid(&slots, &bounds).expect("Failed to build grid");
    let second = build_grid(&slots, &bounds).expect("Failed to build grid");

    assert_eq!(first, second);
}

#[rstest]
#[case(DayOfWeek::Monday, 9)]
#[case(DayOfWeek::Friday, 0)]
fn test_out_of_range_hour_fails_the_build(#[case] day: DayOfWeek, #[case] hour: u8) {
    let slots = vec![slot("s1", DayOfWeek::Monday, 1, "Math"), slot("bad", day, hour, "Late")];

    let result = build_grid(&slots, &GridBounds::default());

    match result {
        Err(TimetableError::InvalidCoordinate { day: d, hour: h }) => {
            assert_eq!((d, h), (day, hour));
        }
        other => panic!("Expected InvalidCoordinate, got {:?}", other),
    }
}

#[test]
fn test_day_outside_bounds_fails_the_build() {
    let bounds = GridBounds::new(vec![DayOfWeek::Monday], vec![1, 2]).expect("Invalid bounds");
    let slots = vec![slot("s1", DayOfWeek::Tuesday, 1, "Math")];

    assert!(matches!(
        build_grid(&slots, &bounds),
        Err(TimetableError::InvalidCoordinate { day: DayOfWeek::Tuesday, hour: 1 })
    ));
}

#[test]
fn test_lookup_outside_bounds() {
    let grid = build_grid(&[], &GridBounds::default()).expect("Failed to build grid");

    assert!(matches!(
        grid.lookup(DayOfWeek::Wednesday, 12),
        Err(TimetableError::InvalidCoordinate { .. })
    ));
}

#[test]
fn test_duplicate_coordinate_keeps_first_slot() {
    let slots = vec![
        slot("first", DayOfWeek::Monday, 1, "Math"),
        slot("second", DayOfWeek::Monday, 1, "Music"),
    ];
    let grid = build_grid(&slots, &GridBounds::default()).expect("Failed to build grid");

    let cell = grid.lookup(DayOfWeek::Monday, 1).expect("Lookup failed");
    assert_eq!(cell.slot().map(|s| s.id.as_str()), Some("first"));
    assert_eq!(grid.occupied_count(), 1);
    assert_eq!(grid.shadowed().len(), 1);
    assert_eq!(grid.shadowed()[0].id, "second");
}

#[rstest]
#[case(vec![], vec![1])]
#[case(vec![DayOfWeek::Monday], vec![])]
#[case(vec![DayOfWeek::Monday, DayOfWeek::Monday], vec![1])]
#[case(vec![DayOfWeek::Monday], vec![2, 2])]
#[case(vec![DayOfWeek::Monday], vec![0, 1])]
fn test_invalid_bounds(#[case] days: Vec<DayOfWeek>, #[case] hours: Vec<u8>) {
    assert!(matches!(
        GridBounds::new(days, hours),
        Err(TimetableError::Validation(_))
    ));
}

#[test]
fn test_lessons_per_day_bounds() {
    let bounds = GridBounds::with_lessons_per_day(6).expect("Invalid bounds");

    assert_eq!(bounds.days(), &DayOfWeek::ALL);
    assert_eq!(bounds.hours(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(bounds.cell_count(), 30);
    assert!(!bounds.contains(Coordinate::new(DayOfWeek::Monday, 7)));
}

#[test]
fn test_insert_into_free_coordinate() {
    let bounds = GridBounds::default();
    let mut slots = vec![slot("s1", DayOfWeek::Monday, 1, "Math")];

    insert(
        &mut slots,
        slot("s2", DayOfWeek::Monday, 2, "Biology"),
        &bounds,
        ConflictPolicy::Reject,
    )
    .expect("Insert failed");

    let grid = build_grid(&slots, &bounds).expect("Failed to build grid");
    assert_eq!(grid.occupied_count(), 2);
}

#[test]
fn test_insert_conflict_is_rejected_by_default() {
    let bounds = GridBounds::default();
    let mut slots = vec![slot("s1", DayOfWeek::Monday, 1, "Math")];

    let result = insert(
        &mut slots,
        slot("s2", DayOfWeek::Monday, 1, "Music"),
        &bounds,
        ConflictPolicy::default(),
    );

    match result {
        Err(TimetableError::Conflict { day, hour, existing }) => {
            assert_eq!(day, DayOfWeek::Monday);
            assert_eq!(hour, 1);
            assert_eq!(existing, "s1");
        }
        other => panic!("Expected Conflict, got {:?}", other),
    }
    assert_eq!(slots.len(), 1);
}

#[test]
fn test_insert_conflict_allowed_shadows_new_slot() {
    let bounds = GridBounds::default();
    let mut slots = vec![slot("s1", DayOfWeek::Monday, 1, "Math")];

    insert(
        &mut slots,
        slot("s2", DayOfWeek::Monday, 1, "Music"),
        &bounds,
        ConflictPolicy::Allow,
    )
    .expect("Insert failed");

    let grid = build_grid(&slots, &bounds).expect("Failed to build grid");
    let cell = grid.lookup(DayOfWeek::Monday, 1).expect("Lookup failed");
    assert_eq!(cell.slot().map(|s| s.id.as_str()), Some("s1"));
    assert_eq!(grid.shadowed().len(), 1);
}

#[test]
fn test_insert_outside_bounds() {
    let mut slots = Vec::new();

    let result = insert(
        &mut slots,
        slot("s1", DayOfWeek::Friday, 9, "Math"),
        &GridBounds::default(),
        ConflictPolicy::Allow,
    );

    assert!(matches!(result, Err(TimetableError::InvalidCoordinate { .. })));
    assert!(slots.is_empty());
}

#[test]
fn test_remove_then_rebuild_frees_the_cell() {
    let bounds = GridBounds::default();
    let mut slots = vec![
        slot("s1", DayOfWeek::Monday, 1, "Math"),
        slot("s2", DayOfWeek::Wednesday, 4, "Chemistry"),
    ];
    let before = build_grid(&slots, &bounds)
        .expect("Failed to build grid")
        .occupied_count();

    let removed = remove(&mut slots, "s2").expect("Remove failed");
    assert_eq!(removed.id, "s2");

    let grid = build_grid(&slots, &bounds).expect("Failed to build grid");
    assert_eq!(grid.lookup(DayOfWeek::Wednesday, 4).expect("Lookup failed"), Cell::Empty);
    assert_eq!(grid.occupied_count(), before - 1);
}

#[test]
fn test_remove_missing_id() {
    let mut slots = vec![slot("s1", DayOfWeek::Monday, 1, "Math")];

    let result = remove(&mut slots, "nope");

    assert!(matches!(result, Err(TimetableError::NotFound(_))));
    assert_eq!(slots.len(), 1);
}

#[test]
fn test_check_free_follows_policy() {
    let slots = vec![slot("s1", DayOfWeek::Monday, 1, "Math")];
    let taken = Coordinate::new(DayOfWeek::Monday, 1);
    let free = Coordinate::new(DayOfWeek::Monday, 2);

    assert!(check_free(&slots, free, ConflictPolicy::Reject).is_ok());
    assert!(check_free(&slots, taken, ConflictPolicy::Allow).is_ok());
    match check_free(&slots, taken, ConflictPolicy::Reject) {
        Err(TimetableError::Conflict { day, hour, existing }) => {
            assert_eq!((day, hour, existing.as_str()), (DayOfWeek::Monday, 1, "s1"));
        }
        other => panic!("Expected Conflict, got {:?}", other),
    }
}

#[test]
fn test_find_occupant_returns_first_match() {
    let slots = vec![
        slot("a", DayOfWeek::Thursday, 2, "Math"),
        slot("b", DayOfWeek::Thursday, 2, "Music"),
    ];

    let occupant = find_occupant(&slots, Coordinate::new(DayOfWeek::Thursday, 2));
    assert_eq!(occupant.map(|s| s.id.as_str()), Some("a"));
    assert!(find_occupant(&slots, Coordinate::new(DayOfWeek::Thursday, 3)).is_none());
}

#[rstest]
#[case("reject", ConflictPolicy::Reject)]
#[case("ALLOW", ConflictPolicy::Allow)]
#[case(" allow ", ConflictPolicy::Allow)]
fn test_conflict_policy_parsing(#[case] input: &str, #[case] expected: ConflictPolicy) {
    assert_eq!(input.parse::<ConflictPolicy>().expect("Parse failed"), expected);
}
