//! Полевая валидация заявки: required + min/max. Ошибки копятся, а не бросаются.

use std::fmt;

use rust_decimal::Decimal;

use crate::model::{LoanApplication, LoanApplicationForm, LoanTerms};

/// Сколько нарушений показываем пользователю в сводке.
pub const SUMMARY_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Первые три нарушения через `; `, остальные — счётчиком.
    pub fn summary(&self) -> String {
        let mut s = self
            .errors
            .iter()
            .take(SUMMARY_LIMIT)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        if self.errors.len() > SUMMARY_LIMIT {
            s.push_str(&format!(" (+{} more)", self.errors.len() - SUMMARY_LIMIT));
        }
        s
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn missing(&mut self, field: &'static str, malformed: &[&'static str]) {
        if malformed.contains(&field) {
            self.push(field, "is not a number");
        } else {
            self.push(field, "is required");
        }
    }

    fn int(
        &mut self,
        field: &'static str,
        v: Option<i64>,
        min: u32,
        max: u32,
        malformed: &[&'static str],
    ) -> u32 {
        match v {
            None => {
                self.missing(field, malformed);
                0
            }
            Some(x) if x < i64::from(min) => {
                self.push(field, format!("must be at least {min}"));
                0
            }
            Some(x) => match u32::try_from(x) {
                Ok(x) if x <= max => x,
                _ => {
                    self.push(field, format!("must be at most {max}"));
                    0
                }
            },
        }
    }

    fn dec(
        &mut self,
        field: &'static str,
        v: Option<Decimal>,
        min: Decimal,
        max: Option<Decimal>,
        malformed: &[&'static str],
    ) -> Decimal {
        match v {
            None => {
                self.missing(field, malformed);
                Decimal::ZERO
            }
            Some(x) if x < min => {
                self.push(field, format!("must be at least {min}"));
                x
            }
            Some(x) => match max {
                Some(m) if x > m => {
                    self.push(field, format!("must be at most {m}"));
                    x
                }
                _ => x,
            },
        }
    }

    fn text(&mut self, field: &'static str, v: Option<&str>) -> String {
        match v.map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => {
                self.push(field, "is required");
                String::new()
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

impl LoanApplicationForm {
    pub fn validate(&self) -> Result<LoanApplication, ValidationErrors> {
        let mut v = ValidationErrors::default();
        let m = self.malformed.as_slice();

        let age = v.int("age", self.age, 18, 100, m);
        let employment_type = v.text("employment_type", self.employment_type.as_deref());
        let credit_score = v.int("credit_score", self.credit_score, 300, 900, m);
        let tenure_with_bank = v.int("tenure_with_bank", self.tenure_with_bank, 0, 50, m);
        let years_in_city = v.int("years_in_city", self.years_in_city, 0, 100, m);
        let years_in_job = v.int("years_in_job", self.years_in_job, 0, 60, m);
        let insurance_premium =
            v.dec("insurance_premium", self.insurance_premium, Decimal::ZERO, None, m);
        let residential_status = v.text("residential_status", self.residential_status.as_deref());
        let residence_type = v.text("residence_type", self.residence_type.as_deref());
        let loan_type = v.text("loan_type", self.loan_type.as_deref());
        let annual_income = v.dec("annual_income", self.annual_income, Decimal::ZERO, None, m);
        let requested_amount = v.dec(
            "requested_amount",
            self.requested_amount,
            Decimal::ONE,
            Some(Decimal::from(100_000_000u32)),
            m,
        );
        let years = v.int("tenure_years", self.tenure_years, 1, 30, m);
        let annual_rate_percent = v.dec(
            "interest_rate",
            self.interest_rate,
            Decimal::ONE,
            Some(Decimal::from(30u32)),
            m,
        );

        if !v.is_empty() {
            return Err(v);
        }

        Ok(LoanApplication {
            age,
            employment_type,
            credit_score,
            tenure_with_bank,
            years_in_city,
            years_in_job,
            insurance_premium,
            residential_status,
            residence_type,
            loan_type,
            annual_income,
            terms: LoanTerms {
                requested_amount,
                years,
                annual_rate_percent,
            },
        })
    }
}
