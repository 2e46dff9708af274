use super::{ranking, util};
use crate::model::{Absence, AssignedSlot, Group, ShiftKind, Worker, WorkerId};
use chrono::NaiveDate;
use std::collections::HashSet;

pub(super) fn allocate(
    workers: &[Worker],
    absences: &[Absence],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<AssignedSlot> {
    let mut slots = Vec::new();
    let mut open = 0usize;

    let mut next = (start <= end).then_some(start);
    while let Some(date) = next {
        let mut used: HashSet<WorkerId> = HashSet::new();
        let before = slots.len();

        for shift in ShiftKind::ALL {
            if !shift.is_grouped() {
                match pick_night(workers, absences, date, &used) {
                    Some(worker) => {
                        used.insert(worker.id.clone());
                        slots.push(AssignedSlot::night(date, worker.id.clone()));
                    }
                    None => {
                        open += 1;
                        tracing::debug!(%date, %shift, "no eligible worker, slot left open");
                    }
                }
                continue;
            }
            for group in Group::ALL {
                match pick_grouped(workers, absences, date, shift, group, &used) {
                    Some(worker) => {
                        used.insert(worker.id.clone());
                        slots.push(AssignedSlot::grouped(date, shift, group, worker.id.clone()));
                    }
                    None => {
                        open += 1;
                        tracing::debug!(%date, %shift, %group, "no eligible worker, slot left open");
                    }
                }
            }
        }

        tracing::trace!(%date, filled = slots.len() - before, "date processed");
        // succ_opt() vaut None au-delà de NaiveDate::MAX
        next = date.succ_opt().filter(|d| *d <= end);
    }

    tracing::info!(%start, %end, filled = slots.len(), open, "allocation done");
    slots
}

fn pick_night<'a>(
    workers: &'a [Worker],
    absences: &[Absence],
    date: NaiveDate,
    used: &HashSet<WorkerId>,
) -> Option<&'a Worker> {
    let ranked = ranking::rank_candidates(workers, absences, date, ShiftKind::Night, None, used);
    if let Some(top) = ranked.first() {
        return Some(top.worker);
    }
    util::first_fill_in(workers, absences, date, ShiftKind::Night, |w| w.fill_in_only)
}

fn pick_grouped<'a>(
    workers: &'a [Worker],
    absences: &[Absence],
    date: NaiveDate,
    shift: ShiftKind,
    group: Group,
    used: &HashSet<WorkerId>,
) -> Option<&'a Worker> {
    let ranked = ranking::rank_candidates(workers, absences, date, shift, Some(group), used);
    if let Some(top) = ranked.first() {
        return Some(top.worker);
    }
    util::first_fill_in(workers, absences, date, shift, |w| {
        (w.fill_in_only || w.group == group) && !used.contains(&w.id)
    })
}
