//! Demo inbox content and JSON seed loading

use std::path::Path;

use chrono::{DateTime, Duration, Utc};

use super::{Notification, NotificationKind, Priority};
use crate::error::Result;

/// The five demo records, timestamps relative to `now`
pub fn sample_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification::new(
            NotificationKind::PoliticianUpdate,
            "Nova Ação de Jair Bolsonaro",
            "Votou a favor do projeto de lei sobre meio ambiente. Impacto na sua pontuação: +15 pontos.",
            Priority::High,
            now - Duration::hours(2),
        )
        .with_id("1")
        .with_politician("Jair Bolsonaro")
        .with_action_type("vote")
        .with_score_change(15),
        Notification::new(
            NotificationKind::ScoreChange,
            "Mudança Significativa na Pontuação",
            "Lula da Silva teve uma mudança de -8 pontos baseada nas suas preferências políticas.",
            Priority::Medium,
            now - Duration::hours(4),
        )
        .with_id("2")
        .with_politician("Lula da Silva")
        .with_score_change(-8),
        Notification::new(
            NotificationKind::WeeklyReport,
            "Relatório Semanal Disponível",
            "Seu relatório semanal de análise política está pronto. Veja as principais mudanças.",
            Priority::Medium,
            now - Duration::days(1),
        )
        .with_id("3")
        .already_read(),
        Notification::new(
            NotificationKind::NewAction,
            "Nova Proposta de Sergio Moro",
            "Apresentou projeto sobre segurança pública. Alinhamento com suas preferências: 92%.",
            Priority::Low,
            now - Duration::days(2),
        )
        .with_id("4")
        .with_politician("Sergio Moro")
        .with_action_type("proposal")
        .already_read(),
        Notification::new(
            NotificationKind::Achievement,
            "Conquista Desbloqueada!",
            "Você analisou 10 políticos diferentes. Continue explorando para descobrir mais insights.",
            Priority::Low,
            now - Duration::days(3),
        )
        .with_id("5")
        .already_read(),
    ]
}

/// Load seed records from a JSON array file
pub fn load_seed(path: impl AsRef<Path>) -> Result<Vec<Notification>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let records: Vec<Notification> = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.as_ref().display(), count = records.len(), "seed file loaded");
    Ok(records)
}
