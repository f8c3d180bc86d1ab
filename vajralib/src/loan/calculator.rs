//! Решение по кредиту и аннуитетный платёж.
//!
//! `EMI = P·r·(1+r)^n / ((1+r)^n − 1)`, где `r` — месячная ставка, `n` — число платежей.
//! При `r = 0` формула делит на ноль, поэтому платёж считается линейно: `P / n`.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use tracing::info;

use crate::{
    error::{Result, VajraError},
    model::{LoanOffer, LoanTerms},
};

const MONTHS: u32 = 12;

fn money(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn whole(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Месячная ставка из годовой в процентах.
pub fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / Decimal::from(MONTHS) / Decimal::ONE_HUNDRED
}

/// Входной контракт калькулятора: сумма > 0, срок ≥ 1 год, ставка ≥ 0.
fn check_terms(principal: Decimal, annual_rate_percent: Decimal, years: u32) -> Result<()> {
    if principal <= Decimal::ZERO {
        return Err(VajraError::InvalidTerms(format!(
            "requested amount must be positive, got {principal}"
        )));
    }
    if years == 0 {
        return Err(VajraError::InvalidTerms("tenure must be at least 1 year".into()));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(VajraError::InvalidTerms(format!(
            "interest rate must not be negative, got {annual_rate_percent}"
        )));
    }
    Ok(())
}

/// Неокруглённый ежемесячный платёж.
pub fn emi(principal: Decimal, annual_rate_percent: Decimal, years: u32) -> Result<Decimal> {
    check_terms(principal, annual_rate_percent, years)?;
    let n = years
        .checked_mul(MONTHS)
        .ok_or(VajraError::Arithmetic("installment count"))?;
    let r = monthly_rate(annual_rate_percent);

    if r.is_zero() {
        return Ok(principal / Decimal::from(n));
    }

    let growth = (Decimal::ONE + r)
        .checked_powi(i64::from(n))
        .ok_or(VajraError::Arithmetic("(1 + r)^n"))?;
    let num = principal
        .checked_mul(r)
        .and_then(|x| x.checked_mul(growth))
        .ok_or(VajraError::Arithmetic("emi numerator"))?;
    num.checked_div(growth - Decimal::ONE)
        .ok_or(VajraError::Arithmetic("emi denominator"))
}

/// Решение по кредиту.
///
/// Превышение одобренного потолка — обычный `Rejected`, не ошибка.
/// Ошибка возвращается только при нарушении входного контракта
/// ([`VajraError::InvalidTerms`]) или переполнении `Decimal`.
pub fn offer(terms: &LoanTerms, eligible_amount: Decimal) -> Result<LoanOffer> {
    let requested = terms.requested_amount;
    check_terms(requested, terms.annual_rate_percent, terms.years)?;
    if eligible_amount < Decimal::ZERO {
        return Err(VajraError::InvalidTerms(format!(
            "eligible amount must not be negative, got {eligible_amount}"
        )));
    }
    let eligible = whole(eligible_amount);

    // сравниваем с исходным значением, округление — только для отображения
    if requested > eligible_amount {
        info!(%requested, %eligible, "loan rejected: above eligible amount");
        return Ok(LoanOffer::Rejected {
            requested_amount: requested,
            eligible_amount: eligible,
            reason: format!("Requested amount {requested} exceeds eligible amount {eligible}"),
        });
    }

    let installments = terms
        .years
        .checked_mul(MONTHS)
        .ok_or(VajraError::Arithmetic("installment count"))?;
    let raw_emi = emi(requested, terms.annual_rate_percent, terms.years)?;
    let total = raw_emi
        .checked_mul(Decimal::from(installments))
        .ok_or(VajraError::Arithmetic("total payment"))?;

    let offer = LoanOffer::Eligible {
        requested_amount: requested,
        eligible_amount: eligible,
        emi: money(raw_emi),
        total_payment: money(total),
        total_interest: money(total - requested),
        installments,
    };
    info!(%requested, emi = %money(raw_emi), installments, "loan eligible");
    Ok(offer)
}
