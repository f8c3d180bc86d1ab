//! Граница с внешним сервисом оценки риска.
//!
//! Сам HTTP-вызов живёт снаружи; здесь только форма запроса/ответа и трэйт,
//! через который калькулятор получает одобренный потолок суммы.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::warn;

use crate::{
    error::{Result, VajraError},
    loan::calculator,
    model::{LoanApplication, LoanOffer},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
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
    pub loan_amount: Decimal,
    pub loan_tenure: u32,
    pub interest_rate: Decimal,
}

impl From<&LoanApplication> for PredictionRequest {
    fn from(a: &LoanApplication) -> Self {
        Self {
            age: a.age,
            employment_type: a.employment_type.clone(),
            credit_score: a.credit_score,
            tenure_with_bank: a.tenure_with_bank,
            years_in_city: a.years_in_city,
            years_in_job: a.years_in_job,
            insurance_premium: a.insurance_premium,
            residential_status: a.residential_status.clone(),
            residence_type: a.residence_type.clone(),
            loan_type: a.loan_type.clone(),
            annual_income: a.annual_income,
            loan_amount: a.terms.requested_amount,
            loan_tenure: a.terms.years,
            interest_rate: a.terms.annual_rate_percent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub success: bool,
    #[serde(default)]
    pub predicted_loan_amount: Option<Decimal>,
}

impl PredictionResponse {
    pub fn read<R: BufRead>(r: R) -> Result<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    pub fn eligible_amount(&self) -> Result<Decimal> {
        match (self.success, self.predicted_loan_amount) {
            (true, Some(amount)) if !amount.is_sign_negative() => Ok(amount),
            (true, Some(amount)) => Err(VajraError::Upstream(format!(
                "negative predicted amount {amount}"
            ))),
            _ => {
                warn!("prediction service reported failure");
                Err(VajraError::Upstream("server connection failed".into()))
            }
        }
    }
}

pub trait RiskAssessor {
    fn assess(&self, req: &PredictionRequest) -> Result<Decimal>;
}

/// Один и тот же потолок для всех заявок.
#[derive(Debug, Clone, Copy)]
pub struct FixedCeiling(pub Decimal);

impl RiskAssessor for FixedCeiling {
    fn assess(&self, _req: &PredictionRequest) -> Result<Decimal> {
        Ok(self.0)
    }
}

/// Заранее сохранённый ответ сервиса.
#[derive(Debug, Clone)]
pub struct ResponseFile(pub PredictionResponse);

impl RiskAssessor for ResponseFile {
    fn assess(&self, _req: &PredictionRequest) -> Result<Decimal> {
        self.0.eligible_amount()
    }
}

pub fn evaluate<A>(app: &LoanApplication, assessor: &A) -> Result<LoanOffer>
where
    A: RiskAssessor + ?Sized,
{
    let eligible = assessor.assess(&PredictionRequest::from(app))?;
    calculator::offer(&app.terms, eligible)
}
