use super::{util, Violation, ViolationKind};
use crate::model::{Absence, AssignedSlot, Group, ShiftKind, Worker, WorkerId};
use chrono::NaiveDate;
use std::collections::HashSet;

pub(super) fn audit(
    workers: &[Worker],
    absences: &[Absence],
    slots: &[AssignedSlot],
) -> Vec<Violation> {
    let mut out = Vec::new();
    let mut positions: HashSet<(NaiveDate, ShiftKind, Option<Group>)> = HashSet::new();
    let mut booked: HashSet<(NaiveDate, &WorkerId)> = HashSet::new();

    for slot in slots {
        let mut flag = |kind: ViolationKind| {
            out.push(Violation {
                date: slot.date,
                shift: slot.shift,
                group: slot.group,
                worker: slot.worker_id.clone(),
                kind,
            })
        };

        if !positions.insert((slot.date, slot.shift, slot.group)) {
            flag(ViolationKind::DuplicateSlot);
        }
        if !booked.insert((slot.date, &slot.worker_id)) {
            flag(ViolationKind::DoubleBooking);
        }

        let Some(worker) = workers.iter().find(|w| w.id == slot.worker_id) else {
            flag(ViolationKind::UnknownWorker);
            continue;
        };

        if util::on_approved_absence(absences, &worker.id, slot.date) {
            flag(ViolationKind::OnAbsence);
        }
        if !util::works_weekday(worker, slot.date) {
            flag(ViolationKind::DayOff);
        }
        if slot.shift.is_grouped() && Some(worker.group) != slot.group && !worker.fill_in_only {
            flag(ViolationKind::WrongGroup);
        }
    }

    out
}
