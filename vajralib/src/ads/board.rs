//! Явный контекст объявлений вместо глобального кэша: список обновляется только через `refresh`.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::{
    ads::{resolver, rotation::Rotation},
    model::Advertisement,
};

#[derive(Debug, Clone, Default)]
pub struct AdBoard {
    ads: Vec<Advertisement>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl AdBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh(&mut self, ads: Vec<Advertisement>, now: DateTime<Utc>) {
        info!(count = ads.len(), "ad board refreshed");
        self.ads = ads;
        self.refreshed_at = Some(now);
    }

    pub fn ads(&self) -> &[Advertisement] {
        &self.ads
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Никогда не обновлявшаяся доска всегда устаревшая.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match self.refreshed_at {
            Some(at) => now - at >= max_age,
            None => true,
        }
    }

    pub fn eligible_for(&self, page: Option<&str>) -> Vec<&Advertisement> {
        resolver::eligible(&self.ads, page)
    }

    pub fn rotation_for(
        &self,
        page: Option<&str>,
        interval: Duration,
        now: DateTime<Utc>,
    ) -> Rotation {
        Rotation::new(self.eligible_for(page).len(), interval, now)
    }
}
