#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use releve::{
    io,
    model::{Group, Schedule, ScheduleId, Store, Worker, WorkerId},
    notification::{prepare_absence_notice, TextNotice},
    planning,
    requests::{self, Decision},
    scheduler::{self, SchedError},
    seed,
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition des créneaux (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du store
    #[arg(long, global = true, default_value = "releve.json")]
    store: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Charger l'équipe par défaut
    Seed {
        /// Remplace l'équipe existante
        #[arg(long)]
        force: bool,
    },

    /// Importer l'équipe depuis un CSV
    ImportWorkers {
        #[arg(long)]
        csv: String,
    },

    /// Ajouter un membre
    AddWorker {
        #[arg(long)]
        name: String,
        /// liste "night;day;swing"
        #[arg(long)]
        shifts: String,
        /// liste "0;6" (0 = dimanche)
        #[arg(long, default_value = "")]
        days_off: String,
        #[arg(long, default_value_t = 25.0)]
        score: f64,
        /// 1|2|3 ou vip|mid|pitching
        #[arg(long, default_value = "mid")]
        group: Group,
        #[arg(long)]
        fill_in_only: bool,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Modifier un membre (identifiant ou nom)
    UpdateWorker {
        #[arg(long)]
        worker: String,
        #[arg(long)]
        shifts: Option<String>,
        #[arg(long)]
        days_off: Option<String>,
        #[arg(long)]
        score: Option<f64>,
        #[arg(long)]
        group: Option<Group>,
        #[arg(long)]
        fill_in_only: Option<bool>,
        /// Chaîne vide pour effacer
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Retirer un membre (identifiant ou nom)
    RemoveWorker {
        #[arg(long)]
        worker: String,
    },

    /// Lister l'équipe
    Workers,

    /// Générer un planning (période par défaut selon la date du jour)
    Generate {
        /// AAAA-MM-JJ
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,
        /// AAAA-MM-JJ
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
    },

    /// Lister les plannings, ou les créneaux d'un planning
    List {
        #[arg(long)]
        schedule_id: Option<String>,
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
        #[arg(long)]
        out_json: Option<String>,
        /// Export CSV des créneaux (nécessite --schedule-id)
        #[arg(long, requires = "schedule_id")]
        out_csv: Option<String>,
    },

    /// Réattribuer un créneau à la main
    SetSlot {
        #[arg(long)]
        schedule_id: String,
        #[arg(long)]
        index: usize,
        #[arg(long)]
        worker: String,
    },

    /// Déposer une demande de congé
    RequestOff {
        #[arg(long)]
        worker: String,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        reason: Option<String>,
        /// Destinataire de l'avis
        #[arg(long, default_value = "scheduler@example.com")]
        notify_to: String,
        /// Fichier de sortie de l'avis (texte brut) ; sinon stdout
        #[arg(long)]
        notice_out: Option<String>,
    },

    /// Accepter ou refuser une demande de congé
    Review {
        #[arg(long)]
        id: String,
        #[arg(long, conflicts_with = "deny", required_unless_present = "deny")]
        approve: bool,
        #[arg(long)]
        deny: bool,
        #[arg(long, default_value = "admin")]
        by: String,
    },

    /// Vérifier un planning (le plus récent par défaut)
    Check {
        #[arg(long)]
        schedule_id: Option<String>,
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.store)?;
    let mut store = storage.load_or_default()?;
    let now = Utc::now();

    let code = match cli.cmd {
        Commands::Seed { force } => {
            if store.workers.is_empty() || force {
                store.workers = seed::default_workers();
                storage.save(&store)?;
                println!("{} worker(s) seeded", store.workers.len());
            } else {
                println!("team already present ({} worker(s)), use --force", store.workers.len());
            }
            0
        }
        Commands::ImportWorkers { csv } => {
            let workers = io::import_workers_csv(csv)?;
            println!("{} worker(s) imported", workers.len());
            store.workers.extend(workers);
            storage.save(&store)?;
            0
        }
        Commands::AddWorker {
            name,
            shifts,
            days_off,
            score,
            group,
            fill_in_only,
            email,
            notes,
        } => {
            let mut worker = Worker::new(name, group)
                .with_shifts(io::parse_shifts(&shifts)?)
                .with_days_off(io::parse_days_off(&days_off)?)
                .with_score(score)
                .with_notes(notes.unwrap_or_default());
            worker.fill_in_only = fill_in_only;
            worker.email = email;
            let id = store.add_worker(worker).id.clone();
            storage.save(&store)?;
            println!("{}", id.as_str());
            0
        }
        Commands::UpdateWorker {
            worker,
            shifts,
            days_off,
            score,
            group,
            fill_in_only,
            email,
            notes,
        } => {
            let id = resolve_worker(&store, &worker)?;
            let target = store
                .find_worker_mut(&id)
                .ok_or_else(|| anyhow!("unknown worker: {}", worker))?;
            if let Some(raw) = shifts {
                target.shifts = io::parse_shifts(&raw)?;
            }
            if let Some(raw) = days_off {
                target.days_off = io::parse_days_off(&raw)?;
            }
            if let Some(score) = score {
                target.score = score;
            }
            if let Some(group) = group {
                target.group = group;
            }
            if let Some(flag) = fill_in_only {
                target.fill_in_only = flag;
            }
            if let Some(email) = email {
                let email = email.trim();
                target.email = (!email.is_empty()).then(|| email.to_string());
            }
            if let Some(notes) = notes {
                target.notes = notes.trim().to_string();
            }
            target.updated_at = now;
            storage.save(&store)?;
            0
        }
        Commands::RemoveWorker { worker } => {
            let id = resolve_worker(&store, &worker)?;
            store.remove_worker(&id);
            storage.save(&store)?;
            0
        }
        Commands::Workers => {
            for w in &store.workers {
                let shifts: Vec<&str> = w.shifts.iter().map(|s| s.as_str()).collect();
                println!(
                    "{} | {} | {} | {} | sph {} | off {:?}{}{}",
                    w.id.as_str(),
                    w.name,
                    w.group,
                    shifts.join(","),
                    w.score,
                    w.days_off,
                    if w.fill_in_only { " | fill-in" } else { "" },
                    w.email.as_deref().map(|e| format!(" | {e}")).unwrap_or_default()
                );
            }
            0
        }
        Commands::Generate { start, end } => {
            let (start, end) = match (start, end) {
                (Some(start), Some(end)) => (start, end),
                _ => planning::default_period(now.date_naive())?,
            };
            let schedule =
                planning::build_schedule(&store.workers, &store.absences, start, end, now)?;
            let open = expected_slots(start, end).saturating_sub(schedule.slots.len());
            let schedule = store.upsert_schedule(schedule);
            println!(
                "{} | {} → {} | {} slot(s), {} open",
                schedule.id.as_str(),
                schedule.start_date,
                schedule.end_date,
                schedule.slots.len(),
                open
            );
            storage.save(&store)?;
            0
        }
        Commands::List {
            schedule_id,
            from,
            to,
            out_json,
            out_csv,
        } => {
            if let Some(path) = out_json {
                io::export_store_json(path, &store)?;
            }
            match schedule_id {
                Some(raw) => {
                    let schedule = find_schedule(&store, &raw)?;
                    if let Some(path) = out_csv {
                        io::export_schedule_csv(path, schedule, &store.workers)?;
                    }
                    // impression compacte
                    for (idx, slot) in schedule.slots.iter().enumerate() {
                        let name = store
                            .find_worker(&slot.worker_id)
                            .map(|w| w.name.as_str())
                            .unwrap_or(slot.worker_id.as_str());
                        println!(
                            "{idx:>3} | {} | {:<12} | {:<8} | {}",
                            slot.date,
                            slot.shift.label(),
                            slot.group.map(|g| g.label()).unwrap_or("-"),
                            name
                        );
                    }
                }
                None => {
                    let schedules: Vec<&Schedule> = match (from, to) {
                        (Some(from), Some(to)) => store.schedules_overlapping(from, to),
                        _ => store.schedules.iter().collect(),
                    };
                    for s in schedules {
                        println!(
                            "{} | {} → {} | {} slot(s)",
                            s.id.as_str(),
                            s.start_date,
                            s.end_date,
                            s.slots.len()
                        );
                    }
                }
            }
            0
        }
        Commands::SetSlot {
            schedule_id,
            index,
            worker,
        } => {
            let worker = resolve_worker(&store, &worker)?;
            let schedule = store
                .find_schedule_mut(&ScheduleId::new(&schedule_id))
                .ok_or_else(|| SchedError::UnknownSchedule(schedule_id.clone()))?;
            planning::set_slot_worker(schedule, index, worker, now)?;
            storage.save(&store)?;
            0
        }
        Commands::RequestOff {
            worker,
            start,
            end,
            reason,
            notify_to,
            notice_out,
        } => {
            let worker = resolve_worker(&store, &worker)?;
            let id = requests::submit_absence(&mut store, &worker, start, end, reason, now)?
                .id
                .clone();
            storage.save(&store)?;

            let notice = prepare_absence_notice(&store, &id, &notify_to, &TextNotice)?;
            match notice_out {
                Some(path) => std::fs::write(path, &notice.body)?,
                None => println!("To: {}\nSubject: {}\n\n{}", notice.recipient, notice.subject, notice.body),
            }
            println!("{}", id.as_str());
            0
        }
        Commands::Review {
            id,
            approve,
            deny,
            by,
        } => {
            let decision = match (approve, deny) {
                (true, false) => Decision::Approve,
                (false, true) => Decision::Deny,
                _ => bail!("use exactly one of --approve / --deny"),
            };
            let outcome = requests::review_absence(
                &mut store,
                &releve::AbsenceId::new(&id),
                decision,
                &by,
                now,
            )?;
            storage.save(&store)?;
            println!(
                "{} {}: {} slot(s) reassigned, {} without replacement",
                outcome.absence.id.as_str(),
                outcome.absence.status.as_str(),
                outcome.reassigned.len(),
                outcome.unresolved.len()
            );
            0
        }
        Commands::Check {
            schedule_id,
            report,
        } => {
            let schedule = match schedule_id {
                Some(raw) => find_schedule(&store, &raw)?,
                None => store
                    .schedules
                    .iter()
                    .max_by_key(|s| s.created_at)
                    .ok_or_else(|| anyhow!("no schedule in store"))?,
            };
            let violations = scheduler::audit(&store.workers, &store.absences, &schedule.slots);
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["date", "shift", "group", "worker_id", "kind"])?;
                    for v in &violations {
                        let date = v.date.to_string();
                        w.write_record([
                            date.as_str(),
                            v.shift.as_str(),
                            v.group.map(|g| g.label()).unwrap_or(""),
                            v.worker.as_str(),
                            v.kind.as_str(),
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}

/// Identifiant exact, sinon nom (insensible à la casse).
fn resolve_worker(store: &Store, key: &str) -> Result<WorkerId> {
    let id = WorkerId::new(key);
    if store.find_worker(&id).is_some() {
        return Ok(id);
    }
    store
        .find_worker_by_name(key)
        .map(|w| w.id.clone())
        .ok_or_else(|| anyhow!("unknown worker: {}", key))
}

fn find_schedule<'a>(store: &'a Store, raw: &str) -> Result<&'a Schedule> {
    store
        .find_schedule(&ScheduleId::new(raw))
        .ok_or_else(|| SchedError::UnknownSchedule(raw.to_string()).into())
}

/// 7 créneaux par jour : 1 nuit + 3 jour + 3 soir.
fn expected_slots(start: NaiveDate, end: NaiveDate) -> usize {
    let days = (end - start).num_days() + 1;
    usize::try_from(days.max(0)).unwrap_or(0) * 7
}
