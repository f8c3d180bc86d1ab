//! Кредитные заявки: валидация → оценка риска → расчёт предложения.

pub mod calculator;
pub mod predict;
pub mod validation;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    error::VajraError,
    model::{LoanApplicationForm, LoanOffer},
};
use predict::RiskAssessor;

/// Результат обработки одной строки пакета. Ровно одно из `offer` / `error` заполнено.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoanOutcome {
    pub row: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<LoanOffer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Обработать пакет заявок. Невалидная строка не останавливает остальные.
pub fn process<A: RiskAssessor + ?Sized>(
    forms: &[LoanApplicationForm],
    assessor: &A,
) -> Vec<LoanOutcome> {
    forms
        .iter()
        .enumerate()
        .map(|(i, form)| {
            let row = i + 1;
            let result = form
                .validate()
                .map_err(VajraError::Validation)
                .and_then(|app| predict::evaluate(&app, assessor));
            match result {
                Ok(offer) => LoanOutcome {
                    row,
                    offer: Some(offer),
                    error: None,
                },
                Err(e) => {
                    warn!(row, error = %e, "loan application not processed");
                    LoanOutcome {
                        row,
                        offer: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect()
}
