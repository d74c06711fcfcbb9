//! Configuration management for the BAT server

use std::collections::HashMap;
use std::env;

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::enums::{ItemCategory, PatronCategory};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Location of the JSON files the library is loaded from and saved to
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub catalogue_file: String,
    pub patron_file: String,
}

/// A limit that differs per patron category
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PatronLimits {
    pub minor: u32,
    pub regular: u32,
    pub elderly: u32,
}

impl PatronLimits {
    pub const fn uniform(limit: u32) -> Self {
        Self {
            minor: limit,
            regular: limit,
            elderly: limit,
        }
    }

    pub fn for_category(&self, category: PatronCategory) -> u32 {
        match category {
            PatronCategory::Minor => self.minor,
            PatronCategory::Regular => self.regular,
            PatronCategory::Elderly => self.elderly,
        }
    }
}

/// Borrowing rules: every threshold the eligibility engine and fee
/// calculator consult.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PolicyConfig {
    /// Patrons younger than this are minors
    pub minor_age_limit: u32,
    /// Patrons this age or older are elderly
    pub elderly_age: u32,
    /// Maximum number of simultaneous loans
    pub max_loans: PatronLimits,
    /// Maximum simultaneous loans of one item category. Categories
    /// without an entry are only bounded by `max_loans`.
    pub category_caps: HashMap<ItemCategory, PatronLimits>,
    /// Minimum patron age to borrow items of a category
    pub minimum_age: HashMap<ItemCategory, u32>,
    /// Loan period overrides, in days
    pub loan_periods: HashMap<PatronCategory, HashMap<ItemCategory, i64>>,
    pub default_loan_period_days: i64,
    /// Overdue charge per whole day late
    pub fee_per_day: Decimal,
    pub makerspace_min_age: u32,
    /// Deny makerspace access while the patron owes fees
    pub makerspace_requires_clear_balance: bool,
    /// Deny borrowing an item whose category the patron already holds
    pub restrict_duplicate_category: bool,
}

impl PolicyConfig {
    pub fn patron_category(&self, age: u32) -> PatronCategory {
        if age < self.minor_age_limit {
            PatronCategory::Minor
        } else if age >= self.elderly_age {
            PatronCategory::Elderly
        } else {
            PatronCategory::Regular
        }
    }

    pub fn max_loans_for(&self, category: PatronCategory) -> u32 {
        self.max_loans.for_category(category)
    }

    pub fn category_cap(&self, patron: PatronCategory, item: ItemCategory) -> Option<u32> {
        self.category_caps.get(&item).map(|limits| limits.for_category(patron))
    }

    pub fn minimum_age_for(&self, item: ItemCategory) -> u32 {
        self.minimum_age.get(&item).copied().unwrap_or(0)
    }

    pub fn loan_period_days(&self, patron: PatronCategory, item: ItemCategory) -> i64 {
        self.loan_periods
            .get(&patron)
            .and_then(|periods| periods.get(&item))
            .copied()
            .unwrap_or(self.default_loan_period_days)
    }

    /// Reject tables that would make the engine misbehave
    pub fn validate(&self) -> Result<(), String> {
        if self.minor_age_limit > self.elderly_age {
            return Err(format!(
                "minor_age_limit ({}) must not exceed elderly_age ({})",
                self.minor_age_limit, self.elderly_age
            ));
        }
        if self.fee_per_day.is_sign_negative() {
            return Err("fee_per_day must not be negative".to_string());
        }
        if self.default_loan_period_days <= 0 {
            return Err("default_loan_period_days must be positive".to_string());
        }
        let bad_period = self
            .loan_periods
            .values()
            .flat_map(|periods| periods.iter())
            .find(|(_, days)| **days <= 0);
        if let Some((category, days)) = bad_period {
            return Err(format!("loan period for {} must be positive, got {}", category, days));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (e.g. BAT_SERVER__PORT=9000)
            .add_source(
                Environment::with_prefix("BAT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.policy.validate().map_err(ConfigError::Message)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            catalogue_file: "data/catalogue.json".to_string(),
            patron_file: "data/patrons.json".to_string(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let book_like = [ItemCategory::Book, ItemCategory::Dvd, ItemCategory::Magazine];
        let tools = [
            ItemCategory::GardeningTool,
            ItemCategory::CarpentryTool,
            ItemCategory::MakerspaceTool,
        ];

        let mut category_caps = HashMap::new();
        for category in book_like {
            category_caps.insert(
                category,
                PatronLimits {
                    minor: 2,
                    regular: 4,
                    elderly: 3,
                },
            );
        }
        for category in tools {
            category_caps.insert(category, PatronLimits::uniform(1));
        }

        let minimum_age = HashMap::from([
            (ItemCategory::GardeningTool, 16),
            (ItemCategory::CarpentryTool, 16),
            (ItemCategory::MakerspaceTool, 12),
        ]);

        let minor_periods = ItemCategory::ALL.into_iter().map(|c| (c, 7)).collect();
        let elderly_periods = book_like.into_iter().map(|c| (c, 21)).collect();
        let loan_periods = HashMap::from([
            (PatronCategory::Minor, minor_periods),
            (PatronCategory::Elderly, elderly_periods),
        ]);

        Self {
            minor_age_limit: 18,
            elderly_age: 65,
            max_loans: PatronLimits {
                minor: 3,
                regular: 5,
                elderly: 5,
            },
            category_caps,
            minimum_age,
            loan_periods,
            default_loan_period_days: 14,
            fee_per_day: Decimal::ONE,
            makerspace_min_age: 12,
            makerspace_requires_clear_balance: false,
            restrict_duplicate_category: false,
        }
    }
}
