//! CSV пакета кредитных заявок. Заголовки входа:
//! age,employment_type,credit_score,tenure_with_bank,years_in_city,years_in_job,insurance_premium,residential_status,residence_type,loan_type,annual_income,requested_amount,tenure_years,interest_rate
//!
//! Пустая ячейка — отсутствующее поле, нечисловая — помечается в `malformed`.
//! И то и другое ловит валидация этой строки; остальные строки пакета читаются дальше.

use crate::{
    error::Result,
    loan::LoanOutcome,
    model::{LoanApplicationForm, LoanOffer},
    traits::{ReadRecords, WriteRecords},
};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::warn;

#[derive(serde::Deserialize)]
struct CsvRow {
    age: Option<String>,
    employment_type: Option<String>,
    credit_score: Option<String>,
    tenure_with_bank: Option<String>,
    years_in_city: Option<String>,
    years_in_job: Option<String>,
    insurance_premium: Option<String>,
    residential_status: Option<String>,
    residence_type: Option<String>,
    loan_type: Option<String>,
    annual_income: Option<String>,
    requested_amount: Option<String>,
    tenure_years: Option<String>,
    interest_rate: Option<String>,
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    row: usize,
    decision: &'a str,
    requested_amount: Option<String>,
    eligible_amount: Option<String>,
    emi: Option<String>,
    total_payment: Option<String>,
    total_interest: Option<String>,
    installments: Option<u32>,
    reason: Option<&'a str>,
}

/// Числовые ячейки одной строки; нечитаемые запоминаются по имени поля.
struct Cells {
    row: usize,
    malformed: Vec<&'static str>,
}

impl Cells {
    fn num<T: FromStr>(&mut self, name: &'static str, v: &Option<String>) -> Option<T>
    where
        T::Err: std::fmt::Display,
    {
        let s = v.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        match s.replace(',', "").parse::<T>() {
            Ok(x) => Some(x),
            Err(e) => {
                warn!(row = self.row, field = name, "unreadable number: {e}");
                self.malformed.push(name);
                None
            }
        }
    }
}

fn text(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

pub struct Csv;

impl ReadRecords<LoanApplicationForm> for Csv {
    fn read<R: BufRead>(r: R) -> Result<Vec<LoanApplicationForm>> {
        let mut rdr = ReaderBuilder::new().flexible(true).trim(Trim::All).from_reader(r);
        let mut forms = Vec::new();

        for (i, rec) in rdr.deserialize::<CsvRow>().enumerate() {
            let row = rec?;
            let mut c = Cells {
                row: i + 1,
                malformed: Vec::new(),
            };
            forms.push(LoanApplicationForm {
                age: c.num("age", &row.age),
                credit_score: c.num("credit_score", &row.credit_score),
                tenure_with_bank: c.num("tenure_with_bank", &row.tenure_with_bank),
                years_in_city: c.num("years_in_city", &row.years_in_city),
                years_in_job: c.num("years_in_job", &row.years_in_job),
                insurance_premium: c.num("insurance_premium", &row.insurance_premium),
                annual_income: c.num("annual_income", &row.annual_income),
                requested_amount: c.num("requested_amount", &row.requested_amount),
                tenure_years: c.num("tenure_years", &row.tenure_years),
                interest_rate: c.num("interest_rate", &row.interest_rate),
                employment_type: text(row.employment_type),
                residential_status: text(row.residential_status),
                residence_type: text(row.residence_type),
                loan_type: text(row.loan_type),
                malformed: c.malformed,
            });
        }

        Ok(forms)
    }
}

impl WriteRecords<LoanOutcome> for Csv {
    fn write<W: Write>(mut w: W, outcomes: &[LoanOutcome]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for o in outcomes {
            let out = match &o.offer {
                Some(LoanOffer::Eligible {
                    requested_amount,
                    eligible_amount,
                    emi,
                    total_payment,
                    total_interest,
                    installments,
                }) => CsvOutRow {
                    row: o.row,
                    decision: "eligible",
                    requested_amount: Some(requested_amount.to_string()),
                    eligible_amount: Some(eligible_amount.to_string()),
                    emi: Some(emi.to_string()),
                    total_payment: Some(total_payment.to_string()),
                    total_interest: Some(total_interest.to_string()),
                    installments: Some(*installments),
                    reason: None,
                },
                Some(LoanOffer::Rejected {
                    requested_amount,
                    eligible_amount,
                    reason,
                }) => CsvOutRow {
                    row: o.row,
                    decision: "rejected",
                    requested_amount: Some(requested_amount.to_string()),
                    eligible_amount: Some(eligible_amount.to_string()),
                    emi: None,
                    total_payment: None,
                    total_interest: None,
                    installments: None,
                    reason: Some(reason),
                },
                None => CsvOutRow {
                    row: o.row,
                    decision: "error",
                    requested_amount: None,
                    eligible_amount: None,
                    emi: None,
                    total_payment: None,
                    total_interest: None,
                    installments: None,
                    reason: o.error.as_deref(),
                },
            };
            wrt.serialize(out)?;
        }
        wrt.flush()?;
        Ok(())
    }
}
