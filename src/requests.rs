use crate::model::{Absence, AbsenceId, AbsenceStatus, ScheduleId, Store, WorkerId};
use crate::scheduler::{self, SchedError};
use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Deny,
}

/// Créneau réattribué suite à un congé approuvé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    pub schedule: ScheduleId,
    pub index: usize,
    pub from: WorkerId,
    pub to: WorkerId,
}

#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub absence: Absence,
    pub reassigned: Vec<Reassignment>,
    /// Créneaux (planning, index) restés sans remplaçant ; l'absent y figure toujours.
    pub unresolved: Vec<(ScheduleId, usize)>,
}

/// Enregistre une demande de congé en attente.
pub fn submit_absence<'a>(
    store: &'a mut Store,
    worker_id: &WorkerId,
    start: NaiveDate,
    end: NaiveDate,
    reason: Option<String>,
    now: DateTime<Utc>,
) -> Result<&'a Absence, SchedError> {
    let worker = store
        .find_worker(worker_id)
        .ok_or_else(|| SchedError::UnknownWorker(worker_id.as_str().to_string()))?;

    let mut absence = Absence::new(worker, start, end, now);
    absence.reason = reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    tracing::info!(
        absence = absence.id.as_str(),
        worker = worker_id.as_str(),
        %start,
        %end,
        "absence request submitted"
    );
    store.absences.push(absence);
    Ok(&store.absences[store.absences.len() - 1])
}

/// Accepte ou refuse une demande en attente.
///
/// Sur acceptation, chaque créneau des plannings enregistrés tenu par l'absent
/// pendant la période est confié au meilleur remplaçant disponible.
pub fn review_absence(
    store: &mut Store,
    id: &AbsenceId,
    decision: Decision,
    reviewer: &str,
    now: DateTime<Utc>,
) -> Result<ReviewOutcome, SchedError> {
    let absence = store
        .absences
        .iter_mut()
        .find(|a| &a.id == id)
        .ok_or_else(|| SchedError::UnknownAbsence(id.as_str().to_string()))?;
    if absence.status != AbsenceStatus::Pending {
        return Err(SchedError::AlreadyReviewed(id.as_str().to_string()));
    }

    absence.status = match decision {
        Decision::Approve => AbsenceStatus::Approved,
        Decision::Deny => AbsenceStatus::Denied,
    };
    absence.updated_at = now;
    absence.reviewed_at = Some(now);
    absence.reviewed_by = Some(reviewer.to_string());
    let absence = absence.clone();

    tracing::info!(
        absence = absence.id.as_str(),
        status = absence.status.as_str(),
        reviewer,
        "absence request reviewed"
    );

    let mut outcome = ReviewOutcome {
        absence,
        reassigned: Vec::new(),
        unresolved: Vec::new(),
    };
    if decision == Decision::Deny {
        return Ok(outcome);
    }

    let departing = &outcome.absence;
    for schedule in store.schedules.iter_mut() {
        let mut changed = false;
        for (index, slot) in schedule.slots.iter_mut().enumerate() {
            if slot.worker_id != departing.worker_id || !departing.covers(slot.date) {
                continue;
            }
            match scheduler::find_replacement(&store.workers, &store.absences, slot, &departing.worker_id) {
                Some(replacement) => {
                    outcome.reassigned.push(Reassignment {
                        schedule: schedule.id.clone(),
                        index,
                        from: slot.worker_id.clone(),
                        to: replacement.id.clone(),
                    });
                    slot.worker_id = replacement.id.clone();
                    changed = true;
                }
                None => {
                    tracing::warn!(
                        schedule = schedule.id.as_str(),
                        date = %slot.date,
                        shift = %slot.shift,
                        "no replacement found, slot kept as is"
                    );
                    outcome.unresolved.push((schedule.id.clone(), index));
                }
            }
        }
        if changed {
            schedule.updated_at = now;
        }
    }

    Ok(outcome)
}
