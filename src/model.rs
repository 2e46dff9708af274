use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour Worker
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(format!("w-{}", Uuid::new_v4()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Absence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsenceId(String);

impl AbsenceId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(format!("to-{}", Uuid::new_v4()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Schedule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleId(String);

impl ScheduleId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(format!("s-{}", Uuid::new_v4()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Type de créneau : trois blocs de 8h couvrant une journée (heure CST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    /// 00:00–08:00
    Night,
    /// 08:00–16:00
    Day,
    /// 16:00–24:00
    Swing,
}

impl ShiftKind {
    /// Ordre de traitement d'une journée.
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Night, ShiftKind::Day, ShiftKind::Swing];

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKind::Night => "night",
            ShiftKind::Day => "day",
            ShiftKind::Swing => "swing",
        }
    }

    /// Libellé horaire affiché.
    pub fn label(self) -> &'static str {
        match self {
            ShiftKind::Night => "12am–8am CST",
            ShiftKind::Day => "8am–4pm CST",
            ShiftKind::Swing => "4pm–12am CST",
        }
    }

    /// Les créneaux de nuit ne sont pas rattachés à un groupe.
    pub fn is_grouped(self) -> bool {
        !matches!(self, ShiftKind::Night)
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "night" => Ok(ShiftKind::Night),
            "day" => Ok(ShiftKind::Day),
            "swing" => Ok(ShiftKind::Swing),
            other => Err(format!("unknown shift kind: {other}")),
        }
    }
}

/// Groupe de comptes (tier 1 à 3) pour les créneaux jour/soir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Vip,
    Mid,
    Pitching,
}

impl Group {
    pub const ALL: [Group; 3] = [Group::Vip, Group::Mid, Group::Pitching];

    pub fn label(self) -> &'static str {
        match self {
            Group::Vip => "VIP",
            Group::Mid => "Mid",
            Group::Pitching => "Pitching",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "vip" => Ok(Group::Vip),
            "2" | "mid" => Ok(Group::Mid),
            "3" | "pitching" => Ok(Group::Pitching),
            other => Err(format!("unknown group: {other}")),
        }
    }
}

/// Membre de l'équipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Types de créneaux acceptés (un ou plusieurs).
    pub shifts: Vec<ShiftKind>,
    /// Jours de repos hebdomadaires (0 = dimanche … 6 = samedi).
    #[serde(default)]
    pub days_off: Vec<u8>,
    /// Ventes par heure, mises à jour chaque semaine.
    pub score: f64,
    pub group: Group,
    /// Uniquement en renfort quand personne d'autre n'est disponible.
    #[serde(default)]
    pub fill_in_only: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Worker {
    pub fn new<N: Into<String>>(name: N, group: Group) -> Self {
        let now = Utc::now();
        Self {
            id: WorkerId::random(),
            name: name.into(),
            email: None,
            shifts: Vec::new(),
            days_off: Vec::new(),
            score: 25.0,
            group,
            fill_in_only: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id<S: AsRef<str>>(mut self, id: S) -> Self {
        self.id = WorkerId::new(id);
        self
    }

    pub fn with_shifts<I: IntoIterator<Item = ShiftKind>>(mut self, shifts: I) -> Self {
        self.shifts = shifts.into_iter().collect();
        self
    }

    pub fn with_days_off<I: IntoIterator<Item = u8>>(mut self, days: I) -> Self {
        self.days_off = days.into_iter().collect();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn fill_in(mut self) -> Self {
        self.fill_in_only = true;
        self
    }

    pub fn with_notes<N: Into<String>>(mut self, notes: N) -> Self {
        self.notes = notes.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsenceStatus {
    Pending,
    Approved,
    Denied,
}

impl AbsenceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AbsenceStatus::Pending => "pending",
            AbsenceStatus::Approved => "approved",
            AbsenceStatus::Denied => "denied",
        }
    }
}

/// Demande de congé (dates incluses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    pub id: AbsenceId,
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub status: AbsenceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
}

impl Absence {
    /// Nouvelle demande en attente.
    pub fn new(worker: &Worker, start_date: NaiveDate, end_date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            id: AbsenceId::random(),
            worker_id: worker.id.clone(),
            worker_name: worker.name.clone(),
            start_date,
            end_date,
            reason: None,
            status: AbsenceStatus::Pending,
            created_at: now,
            updated_at: now,
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    /// Vrai si `date` tombe dans [start_date, end_date].
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_approved(&self) -> bool {
        self.status == AbsenceStatus::Approved
    }
}

/// Créneau attribué : `group` est présent si et seulement si le créneau n'est pas de nuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignedSlot {
    pub date: NaiveDate,
    pub shift: ShiftKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
    pub worker_id: WorkerId,
}

impl AssignedSlot {
    pub fn night(date: NaiveDate, worker_id: WorkerId) -> Self {
        Self {
            date,
            shift: ShiftKind::Night,
            group: None,
            worker_id,
        }
    }

    /// Créneau jour/soir ; pour la nuit le groupe est ignoré.
    pub fn grouped(date: NaiveDate, shift: ShiftKind, group: Group, worker_id: WorkerId) -> Self {
        Self {
            date,
            shift,
            group: shift.is_grouped().then_some(group),
            worker_id,
        }
    }
}

/// Planning généré pour une période.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub slots: Vec<AssignedSlot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Document persisté : équipe, demandes de congé et plannings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Store {
    #[serde(default)]
    pub workers: Vec<Worker>,
    #[serde(default)]
    pub absences: Vec<Absence>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

impl Store {
    pub fn find_worker(&self, id: &WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| &w.id == id)
    }
    pub fn find_worker_mut(&mut self, id: &WorkerId) -> Option<&mut Worker> {
        self.workers.iter_mut().find(|w| &w.id == id)
    }
    pub fn find_worker_by_name<'a>(&'a self, name: &str) -> Option<&'a Worker> {
        self.workers
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name))
    }
    pub fn find_absence(&self, id: &AbsenceId) -> Option<&Absence> {
        self.absences.iter().find(|a| &a.id == id)
    }
    pub fn find_schedule(&self, id: &ScheduleId) -> Option<&Schedule> {
        self.schedules.iter().find(|s| &s.id == id)
    }
    pub fn find_schedule_mut(&mut self, id: &ScheduleId) -> Option<&mut Schedule> {
        self.schedules.iter_mut().find(|s| &s.id == id)
    }

    pub fn add_worker(&mut self, worker: Worker) -> &Worker {
        self.workers.push(worker);
        &self.workers[self.workers.len() - 1]
    }

    pub fn remove_worker(&mut self, id: &WorkerId) -> Option<Worker> {
        let pos = self.workers.iter().position(|w| &w.id == id)?;
        Some(self.workers.remove(pos))
    }

    /// Plannings dont le début ou la fin tombe dans [start, end].
    pub fn schedules_overlapping(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Schedule> {
        self.schedules
            .iter()
            .filter(|s| {
                (start <= s.start_date && s.start_date <= end)
                    || (start <= s.end_date && s.end_date <= end)
            })
            .collect()
    }

    /// Remplace un planning existant couvrant exactement la même période.
    pub fn upsert_schedule(&mut self, schedule: Schedule) -> &Schedule {
        self.schedules
            .retain(|s| !(s.start_date == schedule.start_date && s.end_date == schedule.end_date));
        self.schedules.push(schedule);
        &self.schedules[self.schedules.len() - 1]
    }
}
