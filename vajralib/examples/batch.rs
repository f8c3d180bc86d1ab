use rust_decimal::Decimal;
use vajralib::{
    formats::{csv::Csv, json::Json},
    loan::{self, predict::FixedCeiling},
    model::LoanApplicationForm,
    traits::{ReadRecords, WriteRecords},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: JSON-заявки -> CSV с решениями (stdin -> stdout), потолок 5 лакхов
    let forms: Vec<LoanApplicationForm> = Json::read(std::io::BufReader::new(std::io::stdin()))?;
    let outcomes = loan::process(&forms, &FixedCeiling(Decimal::new(500_000, 0)));
    Csv::write(std::io::stdout(), &outcomes)?;
    Ok(())
}
