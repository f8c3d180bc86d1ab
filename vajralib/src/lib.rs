//! vajralib — правила показа партнёрской рекламы и расчёт кредитных предложений VajraBank

pub mod config;
pub mod customer;
pub mod error;
pub mod model;
pub mod traits;

pub mod ads {
    pub mod board;
    pub mod resolver;
    pub mod rotation;
}

pub mod loan;

pub mod formats {
    pub mod csv;
    pub mod json;
}
