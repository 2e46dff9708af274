use crate::model::{Group, ShiftKind, Worker, WorkerId};
use chrono::{DateTime, TimeZone, Utc};

use ShiftKind::{Day, Night, Swing};

fn seeded_at() -> DateTime<Utc> {
    Utc.timestamp_opt(1_577_836_800, 0)
        .single()
        .unwrap_or_default()
}

fn worker(
    id: &str,
    name: &str,
    shifts: &[ShiftKind],
    days_off: &[u8],
    score: f64,
    group: Group,
    notes: &str,
) -> Worker {
    Worker {
        id: WorkerId::new(id),
        name: name.to_string(),
        email: None,
        shifts: shifts.to_vec(),
        days_off: days_off.to_vec(),
        score,
        group,
        fill_in_only: false,
        notes: notes.to_string(),
        created_at: seeded_at(),
        updated_at: seeded_at(),
    }
}

/// Équipe par défaut, identifiants stables.
pub fn default_workers() -> Vec<Worker> {
    vec![
        worker("c-adebayo", "Adebayo", &[Swing], &[0, 6], 32.0, Group::Vip, "Chat lead, 4pm–12am M–F"),
        worker("c-sheila", "Sheila", &[Day], &[6], 28.0, Group::Mid, "Off Saturdays, only 8am–4pm"),
        worker("c-yorkshare", "Yorkshare", &[Swing], &[3], 27.0, Group::Mid, "Off Wednesday, 4pm–12am"),
        worker("c-mary", "Mary", &[Day], &[3, 4], 26.0, Group::Mid, "Off Wed/Thu, 8am–4pm"),
        worker("c-mae", "Mae", &[Night, Day, Swing], &[2, 3], 29.0, Group::Mid, "Off Tue/Wed, flexible all 3 shifts"),
        worker("c-monah", "Monah", &[Swing], &[6], 27.0, Group::Mid, "Off Saturday, only 4pm–12am"),
        worker("c-jenny", "Jenny", &[Night], &[], 30.0, Group::Vip, "Only 12am–8am shift"),
        worker("c-akans", "Akans", &[Day], &[0, 2, 5], 25.0, Group::Pitching, "Off Sun/Tue/Fri, only 8am–4pm"),
        worker("c-owen", "Owen", &[Night, Swing], &[], 28.0, Group::Mid, "Overnights on Saturdays, otherwise 4pm–12am"),
        Worker {
            fill_in_only: true,
            ..worker("c-life", "Life", &[Night, Day, Swing], &[], 25.0, Group::Mid, "Fill in only when required")
        },
    ]
}
