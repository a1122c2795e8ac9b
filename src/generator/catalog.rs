//! Fixed content catalogs

pub const UPDATE_POLITICIANS: &[&str] = &[
    "Jair Bolsonaro",
    "Lula da Silva",
    "Sergio Moro",
    "Tabata Amaral",
];

pub const ACTION_PHRASES: &[&str] = &[
    "votou a favor de projeto sobre meio ambiente",
    "apresentou nova proposta de lei",
    "participou de debate público",
    "fez declaração sobre economia",
    "votou contra projeto polêmico",
];

pub const SCORE_POLITICIANS: &[&str] = &["Eduardo Paes", "Manuela D'Ávila", "João Doria"];

pub const TRANSPARENCY_POLITICIANS: &[&str] = &["Jair Bolsonaro", "Lula da Silva", "Sergio Moro"];

/// Transparency score quoted by every transparency alert
pub const TRANSPARENCY_SCORE: u8 = 85;

/// (title, description)
pub const ACHIEVEMENTS: &[(&str, &str)] = &[
    (
        "Analista Dedicado",
        "Você analisou 5 políticos diferentes esta semana!",
    ),
    (
        "Observador Atento",
        "Você acompanhou 10 ações políticas recentes!",
    ),
    (
        "Cidadão Engajado",
        "Você está entre os 10% mais ativos da plataforma!",
    ),
    (
        "Especialista Regional",
        "Você se tornou especialista em política da sua região!",
    ),
];

pub const POLITICAL_UPDATE_DURATION_MS: u64 = 5000;
pub const SCORE_CHANGE_DURATION_MS: u64 = 4000;
pub const WEEKLY_REPORT_DURATION_MS: u64 = 6000;
pub const ACHIEVEMENT_DURATION_MS: u64 = 5000;
pub const TRANSPARENCY_ALERT_DURATION_MS: u64 = 4000;
pub const WELCOME_DURATION_MS: u64 = 6000;
