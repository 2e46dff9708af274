use crate::model::{Group, ShiftKind, WorkerId};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    DuplicateSlot,          // deux créneaux pour le même (type, groupe) le même jour
    DoubleBooking,          // même personne deux fois dans la journée
    OnAbsence,              // congé approuvé couvrant la date
    DayOff,                 // jour de repos hebdomadaire
    WrongGroup,             // ni membre du groupe, ni renfort
    UnknownWorker,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::DuplicateSlot => "duplicate",
            ViolationKind::DoubleBooking => "double",
            ViolationKind::OnAbsence => "absence",
            ViolationKind::DayOff => "day-off",
            ViolationKind::WrongGroup => "group",
            ViolationKind::UnknownWorker => "unknown",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub date: NaiveDate,
    pub shift: ShiftKind,
    pub group: Option<Group>,
    pub worker: WorkerId,
    pub kind: ViolationKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid date range: end must not be before start")]
    InvalidDateRange,
    #[error("unknown worker: {0}")]
    UnknownWorker(String),
    #[error("unknown absence request: {0}")]
    UnknownAbsence(String),
    #[error("unknown schedule: {0}")]
    UnknownSchedule(String),
    #[error("absence request already reviewed: {0}")]
    AlreadyReviewed(String),
    #[error("invalid slot index {index} (schedule has {len} slots)")]
    InvalidSlotIndex { index: usize, len: usize },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
