use crate::model::{Absence, AbsenceId, Store};
use anyhow::{Context, Result};

/// Avis généré à la création d'une demande de congé.
#[derive(Debug, Clone)]
pub struct Notice {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Permet de customiser le rendu de l'avis (texte, HTML, etc.).
pub trait NoticeRenderer {
    fn subject(&self, absence: &Absence) -> String;
    fn render(&self, absence: &Absence) -> String;
}

/// Gabarit texte simple destiné à un futur mail.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNotice;

impl NoticeRenderer for TextNotice {
    fn subject(&self, absence: &Absence) -> String {
        format!("Time off request from {}", absence.worker_name)
    }

    fn render(&self, absence: &Absence) -> String {
        let reason = absence
            .reason
            .as_deref()
            .map(|r| format!("- Reason: {r}\n"))
            .unwrap_or_default();
        format!(
            "A new time off request has been submitted.\n\n- Employee: {name}\n- Start: {start}\n- End: {end}\n{reason}\nPlease log in to the scheduler to approve or deny.\n",
            name = absence.worker_name,
            start = absence.start_date,
            end = absence.end_date,
        )
    }
}

/// Prépare l'avis pour une demande existante ; l'envoi reste à la charge de l'appelant.
pub fn prepare_absence_notice(
    store: &Store,
    id: &AbsenceId,
    recipient: &str,
    renderer: &dyn NoticeRenderer,
) -> Result<Notice> {
    let absence = store
        .find_absence(id)
        .with_context(|| format!("unknown absence request: {}", id.as_str()))?;

    Ok(Notice {
        recipient: recipient.to_string(),
        subject: renderer.subject(absence),
        body: renderer.render(absence),
    })
}
