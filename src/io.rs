use crate::model::{Group, Schedule, ShiftKind, Store, Worker};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Import de l'équipe depuis CSV: header `name,shifts,days_off,score,group[,fill_in_only][,notes][,email]`
///
/// `shifts` et `days_off` sont des listes séparées par `;` (ex. `day;swing`, `0;6`).
pub fn import_workers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Worker>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid worker row (empty name)");
        }
        let shifts = parse_shifts(rec.get(1).context("missing shifts")?)
            .with_context(|| format!("invalid shifts value for {name}"))?;
        let days_off = parse_days_off(rec.get(2).unwrap_or(""))
            .with_context(|| format!("invalid days_off value for {name}"))?;
        let score: f64 = rec
            .get(3)
            .context("missing score")?
            .trim()
            .parse()
            .with_context(|| format!("invalid score value for {name}"))?;
        let group: Group = rec
            .get(4)
            .context("missing group")?
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid group value for {name}"))?;

        let mut worker = Worker::new(name, group)
            .with_shifts(shifts)
            .with_days_off(days_off)
            .with_score(score);
        if let Some(flag) = rec.get(5) {
            let flag = flag.trim();
            if !flag.is_empty() {
                worker.fill_in_only = parse_bool(flag)
                    .with_context(|| format!("invalid fill_in_only value for {name}"))?;
            }
        }
        if let Some(notes) = rec.get(6) {
            worker.notes = notes.trim().to_string();
        }
        worker.email = rec
            .get(7)
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        out.push(worker);
    }
    Ok(out)
}

pub fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// `day;swing` → `[Day, Swing]`
pub fn parse_shifts(raw: &str) -> anyhow::Result<Vec<ShiftKind>> {
    let mut out = Vec::new();
    for chunk in raw.split([';', ',']).map(str::trim).filter(|c| !c.is_empty()) {
        let shift: ShiftKind = chunk.parse().map_err(anyhow::Error::msg)?;
        if !out.contains(&shift) {
            out.push(shift);
        }
    }
    Ok(out)
}

/// `0;6` → `[0, 6]` (0 = dimanche)
pub fn parse_days_off(raw: &str) -> anyhow::Result<Vec<u8>> {
    let mut out = Vec::new();
    for chunk in raw.split([';', ',']).map(str::trim).filter(|c| !c.is_empty()) {
        let day: u8 = chunk
            .parse()
            .with_context(|| format!("invalid weekday: {chunk}"))?;
        if day > 6 {
            bail!("weekday out of range (0-6): {day}");
        }
        if !out.contains(&day) {
            out.push(day);
        }
    }
    Ok(out)
}

/// Export JSON du store (jolie mise en forme)
pub fn export_store_json<P: AsRef<Path>>(path: P, store: &Store) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(store)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV d'un planning: header `date,shift,group,worker_id,worker_name`
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    workers: &[Worker],
) -> anyhow::Result<()> {
    let file = fs::File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_schedule_csv(file, schedule, workers)
}

pub fn write_schedule_csv<W: Write>(
    out: W,
    schedule: &Schedule,
    workers: &[Worker],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(out);
    w.write_record(["date", "shift", "group", "worker_id", "worker_name"])?;
    for slot in &schedule.slots {
        let name = workers
            .iter()
            .find(|p| p.id == slot.worker_id)
            .map(|p| p.name.as_str())
            .unwrap_or("");
        let date = slot.date.to_string();
        w.write_record([
            date.as_str(),
            slot.shift.as_str(),
            slot.group.map(Group::label).unwrap_or(""),
            slot.worker_id.as_str(),
            name,
        ])?;
    }
    w.flush()?;
    Ok(())
}
