use crate::model::{Absence, AssignedSlot, Schedule, ScheduleId, Worker, WorkerId};
use crate::scheduler::{self, SchedError};
use crate::seed;
use anyhow::Context;
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

/// Période par défaut selon la date du jour.
///
/// - à partir du 20 : du 1er au 15 du mois suivant ;
/// - du 7 au 19 : du 16 à la fin du mois courant ;
/// - avant le 7 : du 1er au 15 du mois suivant.
pub fn default_period(today: NaiveDate) -> anyhow::Result<(NaiveDate, NaiveDate)> {
    let first_of_month = today.with_day(1).context("invalid first day of month")?;
    let first_of_next = first_of_month
        .checked_add_months(Months::new(1))
        .context("date overflow")?;

    if (7..20).contains(&today.day()) {
        let start = today.with_day(16).context("invalid 16th of month")?;
        let end = first_of_next.pred_opt().context("date underflow")?;
        return Ok((start, end));
    }

    let end = first_of_next.with_day(15).context("invalid 15th of month")?;
    Ok((first_of_next, end))
}

/// Génère un planning complet pour [start, end].
///
/// Sans équipe enregistrée, l'équipe par défaut de [`seed::default_workers`] est utilisée.
pub fn build_schedule(
    workers: &[Worker],
    absences: &[Absence],
    start: NaiveDate,
    end: NaiveDate,
    now: DateTime<Utc>,
) -> Result<Schedule, SchedError> {
    if end < start {
        return Err(SchedError::InvalidDateRange);
    }

    let slots = if workers.is_empty() {
        tracing::info!("no worker on record, using default team");
        scheduler::allocate(&seed::default_workers(), absences, start, end)
    } else {
        scheduler::allocate(workers, absences, start, end)
    };

    Ok(Schedule {
        id: ScheduleId::random(),
        start_date: start,
        end_date: end,
        slots,
        created_at: now,
        updated_at: now,
    })
}

/// Réattribue manuellement le créneau `index` d'un planning.
pub fn set_slot_worker(
    schedule: &mut Schedule,
    index: usize,
    worker: WorkerId,
    now: DateTime<Utc>,
) -> Result<&AssignedSlot, SchedError> {
    let len = schedule.slots.len();
    let slot = schedule
        .slots
        .get_mut(index)
        .ok_or(SchedError::InvalidSlotIndex { index, len })?;
    slot.worker_id = worker;
    schedule.updated_at = now;
    Ok(&schedule.slots[index])
}
