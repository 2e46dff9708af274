#![forbid(unsafe_code)]
use chrono::{Datelike, NaiveDate};
use releve::{
    allocate, audit, find_replacement, performance_weight, rank_candidates, seed, Absence,
    AbsenceStatus, AssignedSlot, Group, ShiftKind, Worker, WorkerId,
};
use std::collections::{HashMap, HashSet};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn absence(worker: &Worker, start: NaiveDate, end: NaiveDate, status: AbsenceStatus) -> Absence {
    let mut a = Absence::new(worker, start, end, chrono::Utc::now());
    a.status = status;
    a
}

fn ids(slots: &[AssignedSlot]) -> Vec<(ShiftKind, Option<Group>, &str)> {
    slots
        .iter()
        .map(|s| (s.shift, s.group, s.worker_id.as_str()))
        .collect()
}

#[test]
fn weight_bands() {
    assert_eq!(performance_weight(0.0), 0.2);
    assert_eq!(performance_weight(9.99), 0.2);
    assert_eq!(performance_weight(10.0), 0.6);
    assert_eq!(performance_weight(24.9), 0.6);
    assert_eq!(performance_weight(25.0), 1.0);
    assert_eq!(performance_weight(29.9), 1.0);
    assert_eq!(performance_weight(30.0), 1.25);
    assert_eq!(performance_weight(120.0), 1.25);
}

#[test]
fn night_and_single_day_slot() {
    // 2025-03-01 est un samedi
    let a = Worker::new("A", Group::Vip)
        .with_id("a")
        .with_shifts([ShiftKind::Night])
        .with_score(30.0);
    let b = Worker::new("B", Group::Vip)
        .with_id("b")
        .with_shifts([ShiftKind::Day])
        .with_score(28.0);

    let day = date(2025, 3, 1);
    let slots = allocate(&[a, b], &[], day, day);

    assert_eq!(
        ids(&slots),
        vec![
            (ShiftKind::Night, None, "a"),
            (ShiftKind::Day, Some(Group::Vip), "b"),
        ]
    );
    assert!(slots.iter().all(|s| s.date == day));
}

#[test]
fn higher_weight_ranks_first() {
    let c = Worker::new("C", Group::Vip)
        .with_id("c")
        .with_shifts([ShiftKind::Day])
        .with_score(20.0);
    let a = Worker::new("A", Group::Vip)
        .with_id("a")
        .with_shifts([ShiftKind::Day])
        .with_score(32.0);
    let workers = vec![c, a];

    let ranked = rank_candidates(
        &workers,
        &[],
        date(2025, 3, 3),
        ShiftKind::Day,
        Some(Group::Vip),
        &HashSet::new(),
    );
    let order: Vec<(&str, f64)> = ranked
        .iter()
        .map(|c| (c.worker.id.as_str(), c.weight))
        .collect();
    assert_eq!(order, vec![("a", 1.25), ("c", 0.6)]);

    let slots = allocate(&workers, &[], date(2025, 3, 3), date(2025, 3, 3));
    assert_eq!(ids(&slots), vec![(ShiftKind::Day, Some(Group::Vip), "a")]);
}

#[test]
fn ties_keep_input_order() {
    let first = Worker::new("First", Group::Mid)
        .with_id("first")
        .with_shifts([ShiftKind::Swing])
        .with_score(26.0);
    let second = Worker::new("Second", Group::Mid)
        .with_id("second")
        .with_shifts([ShiftKind::Swing])
        .with_score(29.0);
    let day = date(2025, 3, 4);

    let forward = vec![first.clone(), second.clone()];
    let ranked = rank_candidates(&forward, &[], day, ShiftKind::Swing, Some(Group::Mid), &HashSet::new());
    assert_eq!(ranked[0].worker.id.as_str(), "first");

    let backward = vec![second, first];
    let ranked = rank_candidates(&backward, &[], day, ShiftKind::Swing, Some(Group::Mid), &HashSet::new());
    assert_eq!(ranked[0].worker.id.as_str(), "second");
}

#[test]
fn ranking_filters() {
    let day = date(2025, 3, 1); // samedi
    let used = Worker::new("Used", Group::Vip).with_id("used").with_shifts([ShiftKind::Day]);
    let away = Worker::new("Away", Group::Vip).with_id("away").with_shifts([ShiftKind::Day]);
    let spare = Worker::new("Spare", Group::Vip)
        .with_id("spare")
        .with_shifts([ShiftKind::Day])
        .fill_in();
    let nights = Worker::new("Nights", Group::Vip).with_id("nights").with_shifts([ShiftKind::Night]);
    let weekend_off = Worker::new("Off", Group::Vip)
        .with_id("off")
        .with_shifts([ShiftKind::Day])
        .with_days_off([6]);
    let other_group = Worker::new("Mid", Group::Mid).with_id("mid").with_shifts([ShiftKind::Day]);
    let ok = Worker::new("Ok", Group::Vip).with_id("ok").with_shifts([ShiftKind::Day]);

    let absences = vec![absence(&away, day, day, AbsenceStatus::Approved)];
    let workers = vec![used, away, spare, nights, weekend_off, other_group, ok];
    let taken: HashSet<WorkerId> = HashSet::from([WorkerId::new("used")]);

    let ranked = rank_candidates(&workers, &absences, day, ShiftKind::Day, Some(Group::Vip), &taken);
    let names: Vec<&str> = ranked.iter().map(|c| c.worker.id.as_str()).collect();
    assert_eq!(names, vec!["ok"]);

    // la nuit ignore le groupe
    let ranked = rank_candidates(&workers, &absences, day, ShiftKind::Night, None, &taken);
    let names: Vec<&str> = ranked.iter().map(|c| c.worker.id.as_str()).collect();
    assert_eq!(names, vec!["nights"]);
}

#[test]
fn approved_absence_leaves_slot_open() {
    let w = Worker::new("W", Group::Mid)
        .with_id("w")
        .with_shifts([ShiftKind::Day])
        .with_score(27.0);
    let day = date(2025, 3, 5);
    let absences = vec![absence(&w, date(2025, 3, 4), date(2025, 3, 6), AbsenceStatus::Approved)];

    let slots = allocate(&[w], &absences, day, day);
    assert!(slots.is_empty());
}

#[test]
fn pending_and_denied_absences_are_ignored() {
    let w = Worker::new("W", Group::Mid)
        .with_id("w")
        .with_shifts([ShiftKind::Day]);
    let day = date(2025, 3, 5);
    let absences = vec![
        absence(&w, day, day, AbsenceStatus::Pending),
        absence(&w, day, day, AbsenceStatus::Denied),
    ];

    let slots = allocate(&[w], &absences, day, day);
    assert_eq!(ids(&slots), vec![(ShiftKind::Day, Some(Group::Mid), "w")]);
}

#[test]
fn fill_in_only_used_as_last_resort() {
    let day = date(2025, 3, 3);
    let spare = Worker::new("Spare", Group::Mid)
        .with_id("spare")
        .with_shifts([ShiftKind::Night])
        .with_score(50.0)
        .fill_in();
    let weak = Worker::new("Weak", Group::Vip)
        .with_id("weak")
        .with_shifts([ShiftKind::Night])
        .with_score(5.0);

    let slots = allocate(&[spare.clone(), weak], &[], day, day);
    assert_eq!(ids(&slots), vec![(ShiftKind::Night, None, "weak")]);

    let slots = allocate(&[spare], &[], day, day);
    assert_eq!(ids(&slots), vec![(ShiftKind::Night, None, "spare")]);
}

#[test]
fn fill_in_covers_any_group_once_per_day() {
    let day = date(2025, 3, 3);
    let spare = Worker::new("Spare", Group::Mid)
        .with_id("spare")
        .with_shifts([ShiftKind::Day, ShiftKind::Swing])
        .fill_in();

    // le renfort prend le premier créneau vide (jour VIP) puis n'est plus disponible
    let slots = allocate(&[spare.clone()], &[], day, day);
    assert_eq!(ids(&slots), vec![(ShiftKind::Day, Some(Group::Vip), "spare")]);

    let spare_nights = Worker {
        shifts: vec![ShiftKind::Night, ShiftKind::Day],
        ..spare
    };
    let slots = allocate(&[spare_nights], &[], day, day);
    assert_eq!(ids(&slots), vec![(ShiftKind::Night, None, "spare")]);
}

#[test]
fn fallback_respects_days_off_and_absence() {
    let saturday = date(2025, 3, 1);
    let spare_off = Worker::new("SpareOff", Group::Mid)
        .with_id("spare-off")
        .with_shifts([ShiftKind::Night])
        .with_days_off([6])
        .fill_in();
    let spare_away = Worker::new("SpareAway", Group::Mid)
        .with_id("spare-away")
        .with_shifts([ShiftKind::Night])
        .fill_in();
    let absences = vec![absence(&spare_away, saturday, saturday, AbsenceStatus::Approved)];

    let slots = allocate(&[spare_off, spare_away], &absences, saturday, saturday);
    assert!(slots.is_empty());
}

#[test]
fn every_day_of_the_range_is_visited() {
    let night = Worker::new("Night", Group::Vip)
        .with_id("n")
        .with_shifts([ShiftKind::Night]);
    let slots = allocate(&[night], &[], date(2025, 2, 27), date(2025, 3, 2));

    let dates: Vec<NaiveDate> = slots.iter().map(|s| s.date).collect();
    assert_eq!(
        dates,
        vec![date(2025, 2, 27), date(2025, 2, 28), date(2025, 3, 1), date(2025, 3, 2)]
    );
}

#[test]
fn inverted_range_is_empty() {
    let w = Worker::new("W", Group::Vip).with_shifts([ShiftKind::Night]);
    assert!(allocate(&[w], &[], date(2025, 3, 2), date(2025, 3, 1)).is_empty());
}

#[test]
fn range_ending_on_last_representable_date() {
    let w = Worker::new("W", Group::Vip)
        .with_id("w")
        .with_shifts([ShiftKind::Night]);
    let end = NaiveDate::MAX;
    let start = end.pred_opt().unwrap();

    let slots = allocate(&[w], &[], start, end);
    let dates: Vec<NaiveDate> = slots.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![start, end]);
}

#[test]
fn slots_follow_daily_shift_order() {
    let day = date(2025, 3, 3);
    let all = [ShiftKind::Night, ShiftKind::Day, ShiftKind::Swing];
    let workers: Vec<Worker> = [Group::Vip, Group::Mid, Group::Pitching]
        .into_iter()
        .flat_map(|g| {
            (0..3).map(move |i| {
                Worker::new(format!("{g}-{i}"), g)
                    .with_id(format!("{}-{i}", g.label()))
                    .with_shifts(all)
            })
        })
        .collect();

    let slots = allocate(&workers, &[], day, day);
    let order: Vec<(ShiftKind, Option<Group>)> = slots.iter().map(|s| (s.shift, s.group)).collect();
    assert_eq!(
        order,
        vec![
            (ShiftKind::Night, None),
            (ShiftKind::Day, Some(Group::Vip)),
            (ShiftKind::Day, Some(Group::Mid)),
            (ShiftKind::Day, Some(Group::Pitching)),
            (ShiftKind::Swing, Some(Group::Vip)),
            (ShiftKind::Swing, Some(Group::Mid)),
            (ShiftKind::Swing, Some(Group::Pitching)),
        ]
    );
    assert_eq!(ShiftKind::ALL.to_vec(), all.to_vec());
}

#[test]
fn default_team_month_holds_invariants() {
    let workers = seed::default_workers();
    let jenny = workers.iter().find(|w| w.name == "Jenny").unwrap();
    let absences = vec![absence(jenny, date(2025, 3, 10), date(2025, 3, 12), AbsenceStatus::Approved)];
    let (start, end) = (date(2025, 3, 1), date(2025, 3, 31));

    let slots = allocate(&workers, &absences, start, end);

    assert!(!slots.is_empty());
    assert!(slots.len() <= 7 * 31);
    assert!(audit(&workers, &absences, &slots).is_empty());

    let mut per_date: HashMap<NaiveDate, usize> = HashMap::new();
    for slot in &slots {
        *per_date.entry(slot.date).or_default() += 1;
        assert_eq!(slot.group.is_some(), slot.shift != ShiftKind::Night);
        let worker = workers.iter().find(|w| w.id == slot.worker_id).unwrap();
        let weekday = slot.date.weekday().num_days_from_sunday() as u8;
        assert!(!worker.days_off.contains(&weekday));
        if let Some(group) = slot.group {
            assert!(worker.group == group || worker.fill_in_only);
        }
    }
    assert!(per_date.values().all(|n| *n <= 7));
    assert!(slots
        .iter()
        .filter(|s| s.date >= date(2025, 3, 10) && s.date <= date(2025, 3, 12))
        .all(|s| s.worker_id != jenny.id));
}

#[test]
fn allocation_is_deterministic() {
    let workers = seed::default_workers();
    let (start, end) = (date(2025, 4, 1), date(2025, 4, 15));
    assert_eq!(
        allocate(&workers, &[], start, end),
        allocate(&workers, &[], start, end)
    );
}

#[test]
fn replacement_skips_departing_worker() {
    let x = Worker::new("X", Group::Vip)
        .with_id("x")
        .with_shifts([ShiftKind::Day])
        .with_score(40.0);
    let y = Worker::new("Y", Group::Vip)
        .with_id("y")
        .with_shifts([ShiftKind::Day])
        .with_score(20.0);
    let workers = vec![x.clone(), y];
    let slot = AssignedSlot::grouped(date(2025, 3, 3), ShiftKind::Day, Group::Vip, x.id.clone());

    let found = find_replacement(&workers, &[], &slot, &x.id).unwrap();
    assert_eq!(found.id.as_str(), "y");
}

#[test]
fn replacement_ignores_other_assignments_that_day() {
    let day = date(2025, 3, 3);
    let x = Worker::new("X", Group::Mid)
        .with_id("x")
        .with_shifts([ShiftKind::Day]);
    let y = Worker::new("Y", Group::Mid)
        .with_id("y")
        .with_shifts([ShiftKind::Day, ShiftKind::Swing]);
    let workers = vec![x.clone(), y];

    // Y tient déjà le créneau du soir, mais seul X est exclu
    let slot = AssignedSlot::grouped(day, ShiftKind::Day, Group::Mid, x.id.clone());
    let found = find_replacement(&workers, &[], &slot, &x.id).unwrap();
    assert_eq!(found.id.as_str(), "y");
}

#[test]
fn replacement_falls_back_to_fill_in() {
    let day = date(2025, 3, 3);
    let x = Worker::new("X", Group::Vip)
        .with_id("x")
        .with_shifts([ShiftKind::Night]);
    let away = Worker::new("Away", Group::Pitching)
        .with_id("away")
        .with_shifts([ShiftKind::Night])
        .fill_in();
    let spare = Worker::new("Spare", Group::Pitching)
        .with_id("spare")
        .with_shifts([ShiftKind::Night])
        .fill_in();
    let absences = vec![
        absence(&x, day, day, AbsenceStatus::Approved),
        absence(&away, day, day, AbsenceStatus::Approved),
    ];
    let slot = AssignedSlot::night(day, x.id.clone());

    let workers = vec![x.clone(), away, spare];
    let found = find_replacement(&workers, &absences, &slot, &x.id).unwrap();
    assert_eq!(found.id.as_str(), "spare");

    assert!(find_replacement(&workers[..2], &absences, &slot, &x.id).is_none());
}

#[test]
fn replacement_never_returns_excluded_fill_in() {
    let day = date(2025, 3, 3);
    let spare = Worker::new("Spare", Group::Mid)
        .with_id("spare")
        .with_shifts([ShiftKind::Swing])
        .fill_in();
    let slot = AssignedSlot::grouped(day, ShiftKind::Swing, Group::Mid, spare.id.clone());

    assert!(find_replacement(&[spare.clone()], &[], &slot, &spare.id).is_none());
}

#[test]
fn replacement_without_group_defaults_to_first_tier() {
    let day = date(2025, 3, 3);
    let vip = Worker::new("Vip", Group::Vip)
        .with_id("vip")
        .with_shifts([ShiftKind::Day]);
    let mid = Worker::new("Mid", Group::Mid)
        .with_id("mid")
        .with_shifts([ShiftKind::Day])
        .with_score(35.0);
    let slot = AssignedSlot {
        date: day,
        shift: ShiftKind::Day,
        group: None,
        worker_id: WorkerId::new("gone"),
    };

    let roster = [mid, vip];
    let found = find_replacement(&roster, &[], &slot, &WorkerId::new("gone")).unwrap();
    assert_eq!(found.id.as_str(), "vip");
}

#[test]
fn audit_flags_broken_schedule() {
    let day = date(2025, 3, 1); // samedi
    let a = Worker::new("A", Group::Vip)
        .with_id("a")
        .with_shifts([ShiftKind::Night, ShiftKind::Day])
        .with_days_off([6]);
    let b = Worker::new("B", Group::Mid).with_id("b").with_shifts([ShiftKind::Day]);
    let absences = vec![absence(&b, day, day, AbsenceStatus::Approved)];
    let slots = vec![
        AssignedSlot::night(day, a.id.clone()),
        AssignedSlot::grouped(day, ShiftKind::Day, Group::Vip, a.id.clone()),
        AssignedSlot::grouped(day, ShiftKind::Day, Group::Vip, b.id.clone()),
        AssignedSlot::grouped(day, ShiftKind::Swing, Group::Mid, WorkerId::new("ghost")),
    ];

    let kinds: Vec<&str> = audit(&[a, b], &absences, &slots)
        .iter()
        .map(|v| v.kind.as_str())
        .collect();
    assert_eq!(
        kinds,
        vec!["day-off", "double", "day-off", "duplicate", "absence", "group", "unknown"]
    );
}
