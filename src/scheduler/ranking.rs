use super::util;
use crate::model::{Absence, Group, ShiftKind, Worker, WorkerId};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Candidat classé pour un créneau.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub worker: &'a Worker,
    pub weight: f64,
}

/// Poids de performance dérivé des ventes par heure.
///
/// `< 10` → 0.2, `< 25` → 0.6, `>= 30` → 1.25, sinon (25..30) → 1.0.
pub fn performance_weight(score: f64) -> f64 {
    if score < 10.0 {
        0.2
    } else if score < 25.0 {
        0.6
    } else if score >= 30.0 {
        1.25
    } else {
        1.0
    }
}

/// Candidats réguliers éligibles pour (date, type, groupe), meilleurs en tête.
///
/// Les égalités conservent l'ordre de `workers` : le tri est stable.
/// Une liste vide signifie qu'aucun candidat régulier n'existe.
pub fn rank_candidates<'a>(
    workers: &'a [Worker],
    absences: &[Absence],
    date: NaiveDate,
    shift: ShiftKind,
    group: Option<Group>,
    used: &HashSet<WorkerId>,
) -> Vec<Candidate<'a>> {
    let mut out: Vec<Candidate<'a>> = workers
        .iter()
        .filter(|w| !used.contains(&w.id))
        .filter(|w| !util::on_approved_absence(absences, &w.id, date))
        .filter(|w| !w.fill_in_only)
        .filter(|w| util::works_shift(w, shift))
        .filter(|w| util::works_weekday(w, date))
        .filter(|w| !shift.is_grouped() || Some(w.group) == group)
        .map(|worker| Candidate {
            worker,
            weight: performance_weight(worker.score),
        })
        .collect();

    out.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    out
}
