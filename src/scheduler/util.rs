use crate::model::{Absence, ShiftKind, Worker, WorkerId};
use chrono::{Datelike, NaiveDate};

/// Jour de la semaine, 0 = dimanche.
pub(crate) fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub(crate) fn works_shift(worker: &Worker, shift: ShiftKind) -> bool {
    worker.shifts.contains(&shift)
}

pub(crate) fn works_weekday(worker: &Worker, date: NaiveDate) -> bool {
    !worker.days_off.contains(&weekday_number(date))
}

/// Seuls les congés approuvés comptent ; pending/denied sont ignorés.
pub(crate) fn on_approved_absence(absences: &[Absence], worker: &WorkerId, date: NaiveDate) -> bool {
    absences
        .iter()
        .any(|a| a.is_approved() && &a.worker_id == worker && a.covers(date))
}

/// Premier renfort (ordre d'entrée) disponible pour `shift` à `date` et accepté par `accept`.
///
/// Vérifie congé, type de créneau et jour de repos ; le reste est laissé à `accept`.
pub(super) fn first_fill_in<'a, F>(
    workers: &'a [Worker],
    absences: &[Absence],
    date: NaiveDate,
    shift: ShiftKind,
    accept: F,
) -> Option<&'a Worker>
where
    F: Fn(&Worker) -> bool,
{
    workers.iter().find(|w| {
        accept(w)
            && works_shift(w, shift)
            && works_weekday(w, date)
            && !on_approved_absence(absences, &w.id, date)
    })
}
