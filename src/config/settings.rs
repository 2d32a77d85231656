use crate::domain::ClassOrder;

const DEFAULT_DATABASE_PATH: &str = "tennis_league.db";

#[derive(Debug, Clone)]
pub struct LeagueSettings {
    /// Tier order, top class first
    pub class_order: ClassOrder,
    /// Players promoted from the top and relegated from the bottom of a class
    pub movement_count: usize,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        Self {
            class_order: ClassOrder::lexicographic(),
            movement_count: 2,
        }
    }
}

impl LeagueSettings {
    pub fn with_class_order(class_order: ClassOrder) -> Self {
        Self {
            class_order,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub league: LeagueSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            league: LeagueSettings::default(),
            storage: StorageSettings::default(),
        }
    }

    /// Defaults overridden by `DATABASE_PATH` and `LEAGUE_CLASSES`
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.storage.database_path = path;
        }

        if let Ok(classes) = std::env::var("LEAGUE_CLASSES") {
            let order = parse_class_list(&classes);
            if order.is_configured() {
                config.league = LeagueSettings::with_class_order(order);
            }
        }

        config
    }
}

/// `"A, B, C"` -> ordered labels, top tier first
pub fn parse_class_list(raw: &str) -> ClassOrder {
    ClassOrder::new(raw.split(','))
}
