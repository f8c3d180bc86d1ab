//! Ротация нескольких подходящих объявлений на одной странице.
//!
//! Один таймер, явное состояние: либо показываем объявление с индексом `i`,
//! либо пользователь закрыл баннер. Индекс между экземплярами не сохраняется.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    Showing(usize),
    Dismissed,
}

#[derive(Debug, Clone)]
pub struct Rotation {
    len: usize,
    interval: Duration,
    state: RotationState,
    last_advance: DateTime<Utc>,
}

impl Rotation {
    pub fn new(len: usize, interval: Duration, now: DateTime<Utc>) -> Self {
        let state = if len == 0 {
            RotationState::Dismissed
        } else {
            RotationState::Showing(0)
        };
        Self {
            len,
            interval,
            state,
            last_advance: now,
        }
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Индекс текущего объявления, если баннер не закрыт.
    pub fn current(&self) -> Option<usize> {
        match self.state {
            RotationState::Showing(i) => Some(i),
            RotationState::Dismissed => None,
        }
    }

    /// Шаг таймера. Если прошло несколько интервалов — сдвигаемся на столько же позиций.
    pub fn tick(&mut self, now: DateTime<Utc>) -> RotationState {
        if let RotationState::Showing(i) = self.state {
            if self.interval > Duration::zero() && now - self.last_advance >= self.interval {
                let elapsed = (now - self.last_advance).num_milliseconds();
                let step = elapsed / self.interval.num_milliseconds().max(1);
                let step = usize::try_from(step).unwrap_or(usize::MAX) % self.len;
                self.state = RotationState::Showing((i + step) % self.len);
                self.last_advance = now;
            }
        }
        self.state
    }

    /// Ручное «следующее». Таймер при этом перезапускается.
    pub fn advance(&mut self, now: DateTime<Utc>) -> RotationState {
        if let RotationState::Showing(i) = self.state {
            self.state = RotationState::Showing((i + 1) % self.len);
            self.last_advance = now;
        }
        self.state
    }

    pub fn dismiss(&mut self) {
        self.state = RotationState::Dismissed;
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::new(self.len, self.interval, now);
    }
}
