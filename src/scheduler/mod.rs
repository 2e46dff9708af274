//! Moteur d'attribution : classement des candidats, remplissage jour par jour,
//! renforts et remplacements.
//!
//! Tout est pur : aucune E/S, aucune horloge, aucun état partagé. À entrées
//! identiques (ordre de l'équipe compris) la sortie est identique.

mod checks;
mod fill;
mod ranking;
mod replacement;
mod types;
mod util;

pub use ranking::{performance_weight, rank_candidates, Candidate};
pub use types::{SchedError, Violation, ViolationKind};

use crate::model::{Absence, AssignedSlot, Worker, WorkerId};
use chrono::NaiveDate;

/// Génère les créneaux de `start` à `end` inclus.
///
/// Par jour : nuit, puis jour groupes 1 à 3, puis soir groupes 1 à 3. Un créneau
/// sans personne éligible est simplement absent du résultat. Une période
/// inversée donne un résultat vide.
pub fn allocate(
    workers: &[Worker],
    absences: &[Absence],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<AssignedSlot> {
    fill::allocate(workers, absences, start, end)
}

/// Cherche un remplaçant pour un seul créneau, sans regénérer le planning.
///
/// Seul `exclude` est écarté : les autres attributions du même jour ne sont pas
/// prises en compte.
pub fn find_replacement<'a>(
    workers: &'a [Worker],
    absences: &[Absence],
    slot: &AssignedSlot,
    exclude: &WorkerId,
) -> Option<&'a Worker> {
    replacement::find_replacement(workers, absences, slot, exclude)
}

/// Vérifie un planning contre les règles d'attribution.
pub fn audit(workers: &[Worker], absences: &[Absence], slots: &[AssignedSlot]) -> Vec<Violation> {
    checks::audit(workers, absences, slots)
}
