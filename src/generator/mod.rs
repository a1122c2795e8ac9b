//! Content Generator - synthetic political updates (v0.1)
//!
//! Pure functions over an injected `Rng`. `ContentGenerator` owns a
//! `StdRng` (seeded for reproducible runs) and dispatches on `GeneratorTag`.

pub mod catalog;

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::VoxaError;
use catalog::*;

/// Output of a generator function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastContent {
    pub title: String,
    pub message: String,
    pub display_duration_ms: u64,
    /// Points delta embedded in the message, if any
    pub score_change: Option<i32>,
}

/// Selects the generator function a trigger runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorTag {
    PoliticalUpdate,
    ScoreChange,
    WeeklyReport,
    Achievement,
    TransparencyAlert,
}

impl GeneratorTag {
    pub const ALL: [GeneratorTag; 5] = [
        GeneratorTag::PoliticalUpdate,
        GeneratorTag::ScoreChange,
        GeneratorTag::WeeklyReport,
        GeneratorTag::Achievement,
        GeneratorTag::TransparencyAlert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorTag::PoliticalUpdate => "political_update",
            GeneratorTag::ScoreChange => "score_change",
            GeneratorTag::WeeklyReport => "weekly_report",
            GeneratorTag::Achievement => "achievement",
            GeneratorTag::TransparencyAlert => "transparency_alert",
        }
    }

    /// Run the generator function for this tag
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ToastContent {
        match self {
            GeneratorTag::PoliticalUpdate => political_update(rng),
            GeneratorTag::ScoreChange => score_change(rng),
            GeneratorTag::WeeklyReport => weekly_report(),
            GeneratorTag::Achievement => achievement(rng),
            GeneratorTag::TransparencyAlert => transparency_alert(rng),
        }
    }
}

impl fmt::Display for GeneratorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorTag {
    type Err = VoxaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| VoxaError::UnknownGeneratorTag { tag: s.to_string() })
    }
}

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn signed(delta: i32) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

// ═══════════════════════════════════════════════════════════════
// Generator functions
// ═══════════════════════════════════════════════════════════════

/// Random politician + action phrase, score change in [-10, 10]
pub fn political_update<R: Rng + ?Sized>(rng: &mut R) -> ToastContent {
    let politician = pick(rng, UPDATE_POLITICIANS);
    let action = pick(rng, ACTION_PHRASES);
    let delta: i32 = rng.gen_range(-10..=10);

    ToastContent {
        title: format!("Nova Ação: {}", politician),
        message: format!(
            "{} {}. Impacto na sua pontuação: {} pontos.",
            politician,
            action,
            signed(delta)
        ),
        display_duration_ms: POLITICAL_UPDATE_DURATION_MS,
        score_change: Some(delta),
    }
}

/// Positive score change in [5, 20]
pub fn score_change<R: Rng + ?Sized>(rng: &mut R) -> ToastContent {
    let politician = pick(rng, SCORE_POLITICIANS);
    let delta: i32 = rng.gen_range(5..=20);

    ToastContent {
        title: "Mudança Significativa na Pontuação".to_string(),
        message: format!(
            "{} teve uma mudança de +{} pontos baseada nas suas preferências políticas.",
            politician, delta
        ),
        display_duration_ms: SCORE_CHANGE_DURATION_MS,
        score_change: Some(delta),
    }
}

pub fn weekly_report() -> ToastContent {
    ToastContent {
        title: "📊 Relatório Semanal Disponível".to_string(),
        message: "Seu relatório semanal de análise política está pronto. Veja as principais mudanças e tendências.".to_string(),
        display_duration_ms: WEEKLY_REPORT_DURATION_MS,
        score_change: None,
    }
}

pub fn achievement<R: Rng + ?Sized>(rng: &mut R) -> ToastContent {
    let (title, description) = pick(rng, ACHIEVEMENTS);

    ToastContent {
        title: format!("🏆 Conquista Desbloqueada: {}", title),
        message: description.to_string(),
        display_duration_ms: ACHIEVEMENT_DURATION_MS,
        score_change: None,
    }
}

pub fn transparency_alert<R: Rng + ?Sized>(rng: &mut R) -> ToastContent {
    let politician = pick(rng, TRANSPARENCY_POLITICIANS);

    ToastContent {
        title: "🔍 Alerta de Transparência".to_string(),
        message: format!(
            "{} publicou novos dados de transparência. Score de transparência atualizado para {}%.",
            politician, TRANSPARENCY_SCORE
        ),
        display_duration_ms: TRANSPARENCY_ALERT_DURATION_MS,
        score_change: None,
    }
}

/// One-shot greeting for an identified user
pub fn welcome(display_name: &str) -> ToastContent {
    ToastContent {
        title: format!("Bem-vindo, {}! 👋", display_name),
        message: "Explore os perfis políticos e configure suas preferências para receber análises personalizadas.".to_string(),
        display_duration_ms: WELCOME_DURATION_MS,
        score_change: None,
    }
}

// ═══════════════════════════════════════════════════════════════
// ContentGenerator
// ═══════════════════════════════════════════════════════════════

/// Owns the random source used by the scheduler
#[derive(Debug, Clone)]
pub struct ContentGenerator {
    rng: StdRng,
}

impl ContentGenerator {
    /// Deterministic generator (tests, reproducible demos)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_entropy)
    }

    pub fn generate(&mut self, tag: GeneratorTag) -> ToastContent {
        tag.generate(&mut self.rng)
    }
}

impl Default for ContentGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn political_update_stays_in_bounds() {
        let mut rng = rng();
        for _ in 0..500 {
            let content = political_update(&mut rng);
            let delta = content.score_change.unwrap();
            assert!((-10..=10).contains(&delta), "out of range: {delta}");
            assert!(content.title.starts_with("Nova Ação: "));
            assert_eq!(content.display_duration_ms, 5000);
        }
    }

    #[test]
    fn political_update_embeds_name_and_phrase() {
        let content = political_update(&mut rng());
        let name = content.title.trim_start_matches("Nova Ação: ");
        assert!(UPDATE_POLITICIANS.contains(&name));
        assert!(content.message.starts_with(name));
        assert!(ACTION_PHRASES.iter().any(|p| content.message.contains(p)));
    }

    #[test]
    fn political_update_covers_both_extremes() {
        let mut rng = rng();
        let deltas: Vec<i32> = (0..2000)
            .map(|_| political_update(&mut rng).score_change.unwrap())
            .collect();
        assert!(deltas.contains(&-10));
        assert!(deltas.contains(&10));
    }

    #[test]
    fn positive_delta_is_prefixed_with_plus() {
        assert_eq!(signed(3), "+3");
        assert_eq!(signed(0), "0");
        assert_eq!(signed(-4), "-4");
    }

    #[test]
    fn score_change_is_always_positive() {
        let mut rng = rng();
        for _ in 0..500 {
            let content = score_change(&mut rng);
            let delta = content.score_change.unwrap();
            assert!((5..=20).contains(&delta), "out of range: {delta}");
            assert!(content.message.contains(&format!("+{} pontos", delta)));
            assert!(SCORE_POLITICIANS.iter().any(|p| content.message.starts_with(p)));
        }
    }

    #[test]
    fn weekly_report_is_constant() {
        assert_eq!(weekly_report(), weekly_report());
        assert_eq!(weekly_report().display_duration_ms, 6000);
    }

    #[test]
    fn achievement_comes_from_catalog() {
        let mut rng = rng();
        for _ in 0..50 {
            let content = achievement(&mut rng);
            assert!(ACHIEVEMENTS
                .iter()
                .any(|(title, desc)| content.title.ends_with(title) && content.message == *desc));
        }
    }

    #[test]
    fn transparency_alert_quotes_fixed_score() {
        let content = transparency_alert(&mut rng());
        assert!(content.message.contains("85%"));
        assert_eq!(content.display_duration_ms, 4000);
    }

    #[test]
    fn welcome_uses_display_name() {
        let content = welcome("maria");
        assert_eq!(content.title, "Bem-vindo, maria! 👋");
        assert_eq!(content.display_duration_ms, 6000);
    }

    #[test]
    fn durations_are_within_display_range() {
        let mut generator = ContentGenerator::seeded(1);
        for tag in GeneratorTag::ALL {
            let ms = generator.generate(tag).display_duration_ms;
            assert!((4000..=6000).contains(&ms), "{tag}: {ms}");
        }
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let mut a = ContentGenerator::seeded(42);
        let mut b = ContentGenerator::seeded(42);
        for tag in GeneratorTag::ALL {
            assert_eq!(a.generate(tag), b.generate(tag));
        }
    }

    #[test]
    fn tag_parsing_roundtrips_names() {
        for tag in GeneratorTag::ALL {
            assert_eq!(tag.as_str().parse::<GeneratorTag>().unwrap(), tag);
        }
        assert!(matches!(
            "breaking_news".parse::<GeneratorTag>(),
            Err(VoxaError::UnknownGeneratorTag { .. })
        ));
    }

    #[test]
    fn tag_serde_matches_display() {
        let json = serde_json::to_string(&GeneratorTag::TransparencyAlert).unwrap();
        assert_eq!(json, "\"transparency_alert\"");
    }
}
