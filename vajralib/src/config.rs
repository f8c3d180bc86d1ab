//! Настройки из окружения. Отсутствующая переменная — значение по умолчанию
//! (с записью в лог), кривое значение — ошибка.

use std::{env, fmt::Display, str::FromStr};

use chrono::Duration;
use tracing::{info, warn};

use crate::error::{Result, VajraError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ad_rotation_secs: u32,
    pub ads_max_age_secs: u32,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ad_rotation_secs: 8,
            ads_max_age_secs: 300,
            currency: "INR".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Для тестов: значения берутся из произвольного источника.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        Ok(Self {
            ad_rotation_secs: try_load(&lookup, "VAJRA_AD_ROTATION_SECS", d.ad_rotation_secs)?,
            ads_max_age_secs: try_load(&lookup, "VAJRA_ADS_MAX_AGE_SECS", d.ads_max_age_secs)?,
            currency: try_load(&lookup, "VAJRA_CURRENCY", d.currency)?,
        })
    }

    pub fn rotation_interval(&self) -> Duration {
        Duration::seconds(i64::from(self.ad_rotation_secs))
    }

    pub fn ads_max_age(&self) -> Duration {
        Duration::seconds(i64::from(self.ads_max_age_secs))
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
        Some(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            VajraError::Config(format!("{key}={raw}: {e}"))
        }),
    }
}
