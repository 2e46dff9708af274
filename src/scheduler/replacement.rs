use super::{ranking, util};
use crate::model::{Absence, AssignedSlot, Group, Worker, WorkerId};
use std::collections::HashSet;

pub(super) fn find_replacement<'a>(
    workers: &'a [Worker],
    absences: &[Absence],
    slot: &AssignedSlot,
    exclude: &WorkerId,
) -> Option<&'a Worker> {
    // seul le partant est exclu : les autres créneaux du jour ne sont pas consultés
    let used: HashSet<WorkerId> = HashSet::from([exclude.clone()]);
    let group = slot
        .shift
        .is_grouped()
        .then(|| slot.group.unwrap_or(Group::Vip));

    let ranked = ranking::rank_candidates(workers, absences, slot.date, slot.shift, group, &used);
    if let Some(top) = ranked.first() {
        return Some(top.worker);
    }

    util::first_fill_in(workers, absences, slot.date, slot.shift, |w| {
        w.fill_in_only && &w.id != exclude
    })
}
