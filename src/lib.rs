#![forbid(unsafe_code)]
//! Relève — répartition d'une équipe sur des créneaux nuit/jour/soir (sans BD).
//!
//! - Classement des candidats par performance (ventes par heure).
//! - Un créneau de nuit et trois créneaux par groupe en jour et en soir.
//! - Renforts en dernier recours, remplacements après un congé approuvé.
//! - Stockage fichier (JSON/CSV) ; le moteur lui-même est pur.

pub mod io;
pub mod model;
pub mod notification;
pub mod planning;
pub mod requests;
pub mod scheduler;
pub mod seed;
pub mod storage;

pub use model::{
    Absence, AbsenceId, AbsenceStatus, AssignedSlot, Group, Schedule, ScheduleId, ShiftKind,
    Store, Worker, WorkerId,
};
pub use notification::{prepare_absence_notice, Notice, NoticeRenderer, TextNotice};
pub use planning::{build_schedule, default_period, set_slot_worker};
pub use requests::{review_absence, submit_absence, Decision, Reassignment, ReviewOutcome};
pub use scheduler::{
    allocate, audit, find_replacement, performance_weight, rank_candidates, Candidate, SchedError,
    Violation, ViolationKind,
};
pub use storage::{JsonStorage, Storage};
