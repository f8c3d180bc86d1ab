use rust_decimal::Decimal;
use vajralib::model::LoanApplicationForm;

fn valid_form() -> LoanApplicationForm {
    LoanApplicationForm {
        age: Some(32),
        employment_type: Some("Salaried".into()),
        credit_score: Some(760),
        tenure_with_bank: Some(4),
        years_in_city: Some(10),
        years_in_job: Some(6),
        insurance_premium: Some(Decimal::new(12_000, 0)),
        residential_status: Some("Resident".into()),
        residence_type: Some("Owned".into()),
        loan_type: Some("Personal".into()),
        annual_income: Some(Decimal::new(1_200_000, 0)),
        requested_amount: Some(Decimal::new(500_000, 0)),
        tenure_years: Some(5),
        interest_rate: Some(Decimal::new(11, 0)),
        ..Default::default()
    }
}

#[test]
fn valid_form_passes() {
    let app = valid_form().validate().expect("valid form");
    assert_eq!(app.age, 32);
    assert_eq!(app.terms.years, 5);
    assert_eq!(app.terms.requested_amount, Decimal::new(500_000, 0));
}

#[test]
fn credit_score_below_range_is_rejected() {
    let mut f = valid_form();
    f.credit_score = Some(250);
    let errs = f.validate().unwrap_err();
    assert_eq!(errs.len(), 1);
    assert!(errs.has("credit_score"));
}

#[test]
fn age_boundary() {
    let mut f = valid_form();
    f.age = Some(17);
    assert!(f.validate().unwrap_err().has("age"));

    f.age = Some(18);
    assert!(f.validate().is_ok());

    f.age = Some(101);
    assert!(f.validate().unwrap_err().has("age"));
}

#[test]
fn interest_rate_range() {
    let mut f = valid_form();
    f.interest_rate = Some(Decimal::new(5, 1));
    assert!(f.validate().unwrap_err().has("interest_rate"));

    f.interest_rate = Some(Decimal::new(30, 0));
    assert!(f.validate().is_ok());

    f.interest_rate = Some(Decimal::new(301, 1));
    assert!(f.validate().unwrap_err().has("interest_rate"));
}

#[test]
fn blank_text_counts_as_missing() {
    let mut f = valid_form();
    f.loan_type = Some("   ".into());
    let errs = f.validate().unwrap_err();
    assert_eq!(errs.errors()[0].field, "loan_type");
    assert_eq!(errs.errors()[0].message, "is required");
}

#[test]
fn summary_lists_first_three_violations() {
    let errs = LoanApplicationForm::default().validate().unwrap_err();
    assert_eq!(errs.len(), 14);
    assert_eq!(
        errs.summary(),
        "age: is required; employment_type: is required; credit_score: is required (+11 more)"
    );
}

#[test]
fn summary_without_truncation() {
    let mut f = valid_form();
    f.age = Some(12);
    f.credit_score = Some(950);
    assert_eq!(
        f.validate().unwrap_err().summary(),
        "age: must be at least 18; credit_score: must be at most 900"
    );
}

#[test]
fn negative_and_huge_integers_are_range_errors() {
    let mut f = valid_form();
    f.age = Some(-5);
    f.years_in_job = Some(i64::from(u32::MAX) + 1);
    assert_eq!(
        f.validate().unwrap_err().summary(),
        "age: must be at least 18; years_in_job: must be at most 60"
    );
}

#[test]
fn unreadable_number_is_reported_as_such() {
    let mut f = valid_form();
    f.credit_score = None;
    f.malformed = vec!["credit_score"];
    let errs = f.validate().unwrap_err();
    assert_eq!(errs.len(), 1);
    assert_eq!(errs.errors()[0].message, "is not a number");
}
