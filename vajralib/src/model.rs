//! Доменные модели — единый «нормализованный» слой между хранилищем и логикой.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VajraError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdStatus {
    Pending,
    Approved,
    Rejected,
}

impl AdStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AdStatus::Pending => "PENDING",
            AdStatus::Approved => "APPROVED",
            AdStatus::Rejected => "REJECTED",
        }
    }
}

/// Какое правило таргетинга применяется к объявлению.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Targeting {
    Placements,
    ShowOn,
    Default,
}

/// Рекламное объявление партнёра в том виде, в каком оно лежит в коллекции `ads`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
    pub status: AdStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placements: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_on: Option<BTreeMap<String, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Advertisement {
    /// Новое объявление от партнёра всегда начинает в PENDING.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            partner: None,
            status: AdStatus::Pending,
            is_active: None,
            placements: None,
            show_on: None,
            created_at: None,
        }
    }

    pub fn targeting(&self) -> Targeting {
        if self.placements.is_some() {
            Targeting::Placements
        } else if self.show_on.is_some() {
            Targeting::ShowOn
        } else {
            Targeting::Default
        }
    }

    pub fn approve(&mut self) -> Result<()> {
        self.transition(AdStatus::Approved)
    }

    pub fn reject(&mut self) -> Result<()> {
        self.transition(AdStatus::Rejected)
    }

    /// Снять одобренное объявление с показа (статус не меняется).
    pub fn deactivate(&mut self) -> Result<()> {
        self.require_approved("INACTIVE")?;
        self.is_active = Some(false);
        Ok(())
    }

    pub fn activate(&mut self) -> Result<()> {
        self.require_approved("ACTIVE")?;
        self.is_active = Some(true);
        Ok(())
    }

    fn transition(&mut self, to: AdStatus) -> Result<()> {
        if self.status != AdStatus::Pending {
            return Err(VajraError::InvalidTransition {
                from: self.status.as_str(),
                to: to.as_str(),
            });
        }
        self.status = to;
        Ok(())
    }

    fn require_approved(&self, to: &'static str) -> Result<()> {
        if self.status == AdStatus::Approved {
            Ok(())
        } else {
            Err(VajraError::InvalidTransition {
                from: self.status.as_str(),
                to,
            })
        }
    }
}

/// Заявка на кредит как её присылает форма: любое поле может отсутствовать.
///
/// Целые поля знаковые: `-5` в возрасте — нарушение диапазона, его сообщает
/// валидация, а не разбор входа.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoanApplicationForm {
    pub age: Option<i64>,
    pub employment_type: Option<String>,
    pub credit_score: Option<i64>,
    pub tenure_with_bank: Option<i64>,
    pub years_in_city: Option<i64>,
    pub years_in_job: Option<i64>,
    pub insurance_premium: Option<Decimal>,
    pub residential_status: Option<String>,
    pub residence_type: Option<String>,
    pub loan_type: Option<String>,
    pub annual_income: Option<Decimal>,
    pub requested_amount: Option<Decimal>,
    pub tenure_years: Option<i64>,
    pub interest_rate: Option<Decimal>,
    /// Поля, значение которых не удалось прочитать как число.
    #[serde(skip)]
    pub malformed: Vec<&'static str>,
}

/// Провалидированная заявка.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoanApplication {
    pub age: u32,
    pub employment_type: String,
    pub credit_score: u32,
    pub tenure_with_bank: u32,
    pub years_in_city: u32,
    pub years_in_job: u32,
    pub insurance_premium: Decimal,
    pub residential_status: String,
    pub residence_type: String,
    pub loan_type: String,
    pub annual_income: Decimal,
    pub terms: LoanTerms,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LoanTerms {
    pub requested_amount: Decimal,
    pub years: u32,
    pub annual_rate_percent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum LoanOffer {
    Rejected {
        requested_amount: Decimal,
        eligible_amount: Decimal,
        reason: String,
    },
    Eligible {
        requested_amount: Decimal,
        eligible_amount: Decimal,
        emi: Decimal,
        total_payment: Decimal,
        total_interest: Decimal,
        installments: u32,
    },
}

impl LoanOffer {
    pub fn is_eligible(&self) -> bool {
        matches!(self, LoanOffer::Eligible { .. })
    }

    pub fn eligible_amount(&self) -> Decimal {
        match self {
            LoanOffer::Rejected { eligible_amount, .. } => *eligible_amount,
            LoanOffer::Eligible { eligible_amount, .. } => *eligible_amount,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum KycStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

/// Каноническая запись клиента (см. [`crate::customer`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub account_number: Option<String>,
    pub account_type: Option<String>,
    pub balance: Option<Decimal>,
    pub kyc_status: KycStatus,
}
