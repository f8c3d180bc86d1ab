use rust_decimal::Decimal;
use vajralib::{
    error::VajraError,
    loan::calculator::{emi, monthly_rate, offer},
    model::{LoanOffer, LoanTerms},
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn terms(amount: i64, years: u32, rate: &str) -> LoanTerms {
    LoanTerms {
        requested_amount: Decimal::new(amount, 0),
        years,
        annual_rate_percent: dec(rate),
    }
}

#[test]
fn rejects_above_eligible_amount() {
    let o = offer(&terms(600_000, 5, "11"), Decimal::new(500_000, 0)).expect("offer");
    match o {
        LoanOffer::Rejected {
            requested_amount,
            eligible_amount,
            reason,
        } => {
            assert_eq!(requested_amount, Decimal::new(600_000, 0));
            assert_eq!(eligible_amount, Decimal::new(500_000, 0));
            assert!(reason.contains("600000"), "{reason}");
            assert!(reason.contains("500000"), "{reason}");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn standard_amortization_at_eligible_boundary() {
    let o = offer(&terms(500_000, 5, "11"), Decimal::new(500_000, 0)).expect("offer");
    assert!(o.is_eligible());
    match o {
        LoanOffer::Eligible {
            emi,
            total_payment,
            total_interest,
            installments,
            ..
        } => {
            assert_eq!(installments, 60);
            assert_eq!(emi, dec("10871.21"));
            assert_eq!(total_payment, dec("652272.69"));
            assert_eq!(total_interest, dec("152272.69"));
        }
        other => panic!("expected offer, got {other:?}"),
    }
}

#[test]
fn eligible_amount_is_rounded_for_display() {
    let o = offer(&terms(100_000, 1, "12"), dec("250000.6")).expect("offer");
    assert_eq!(o.eligible_amount(), Decimal::new(250_001, 0));

    // сравнение идёт с неокруглённым потолком
    let o = offer(&terms(250_001, 1, "12"), dec("250000.6")).expect("offer");
    assert!(!o.is_eligible());
    assert_eq!(o.eligible_amount(), Decimal::new(250_001, 0));
}

#[test]
fn zero_rate_falls_back_to_linear_installments() {
    let o = offer(&terms(120_000, 1, "0"), Decimal::new(200_000, 0)).expect("offer");
    match o {
        LoanOffer::Eligible {
            emi,
            total_payment,
            total_interest,
            ..
        } => {
            assert_eq!(emi, Decimal::new(10_000, 0));
            assert_eq!(total_payment, Decimal::new(120_000, 0));
            assert!(total_interest.is_zero());
        }
        other => panic!("expected offer, got {other:?}"),
    }
}

#[test]
fn total_payment_never_below_principal() {
    for years in [1u32, 2, 5, 10, 20, 30] {
        for rate in ["1", "7.5", "11", "18", "30"] {
            let t = terms(750_000, years, rate);
            match offer(&t, Decimal::new(1_000_000, 0)).expect("offer") {
                LoanOffer::Eligible {
                    total_payment,
                    total_interest,
                    ..
                } => {
                    assert!(total_payment >= t.requested_amount, "{years}y @ {rate}%");
                    assert!(total_interest > Decimal::ZERO, "{years}y @ {rate}%");
                }
                other => panic!("expected offer, got {other:?}"),
            }
        }
    }
}

#[test]
fn monthly_rate_from_annual_percent() {
    assert_eq!(monthly_rate(dec("12")), dec("0.01"));
}

#[test]
fn zero_years_is_invalid_terms() {
    assert!(matches!(
        emi(Decimal::new(1000, 0), dec("10"), 0),
        Err(VajraError::InvalidTerms(_))
    ));

    // не превышает потолок, но и не «отказ»: это ошибка входа
    match offer(&terms(1000, 0, "10"), Decimal::new(5000, 0)) {
        Err(VajraError::InvalidTerms(msg)) => assert!(msg.contains("tenure"), "{msg}"),
        other => panic!("expected invalid terms, got {other:?}"),
    }
}

#[test]
fn negative_rate_is_invalid_terms() {
    match offer(&terms(120_000, 1, "-12"), Decimal::new(200_000, 0)) {
        Err(VajraError::InvalidTerms(msg)) => assert!(msg.contains("-12"), "{msg}"),
        other => panic!("expected invalid terms, got {other:?}"),
    }
    assert!(emi(Decimal::new(120_000, 0), dec("-0.5"), 1).is_err());
}

#[test]
fn non_positive_amounts_are_invalid_terms() {
    assert!(matches!(
        offer(&terms(0, 5, "11"), Decimal::new(5000, 0)),
        Err(VajraError::InvalidTerms(_))
    ));
    assert!(matches!(
        offer(&terms(1000, 5, "11"), Decimal::new(-1, 0)),
        Err(VajraError::InvalidTerms(_))
    ));
}
