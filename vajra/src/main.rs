use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use vajralib::{
    ads::board::AdBoard,
    config::Config,
    customer,
    error::{Result, VajraError},
    formats::{csv::Csv, json::Json},
    loan::{
        self, calculator,
        predict::{FixedCeiling, PredictionResponse, ResponseFile, RiskAssessor},
        LoanOutcome,
    },
    model::{Advertisement, LoanApplicationForm, LoanOffer, LoanTerms},
    traits::{ReadRecords, WriteRecords},
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "vajra", version, about = "Реклама и кредитные предложения VajraBank")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Какие объявления показывать на странице
    Ads {
        /// JSON-выгрузка коллекции ads (по умолчанию stdin)
        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        /// Имя страницы; без него показываются все
        #[arg(long)]
        page: Option<String>,

        /// Вывести только текущий слот ротации
        #[arg(long)]
        rotate: bool,
    },

    /// Пакетная обработка кредитных заявок
    Loan {
        /// Входной файл (по умолчанию stdin)
        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        /// Выходной файл (по умолчанию stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<String>,

        #[arg(long = "in-format", value_enum, default_value = "csv")]
        in_format: Fmt,

        #[arg(long = "out-format", value_enum, default_value = "json")]
        out_format: Fmt,

        /// Одобренный потолок суммы для всех заявок
        #[arg(long, conflicts_with = "prediction", required_unless_present = "prediction")]
        eligible: Option<Decimal>,

        /// Сохранённый ответ сервиса оценки риска
        #[arg(long)]
        prediction: Option<String>,
    },

    /// Один расчёт платежа
    Emi {
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        eligible: Decimal,
        #[arg(long)]
        years: u32,
        #[arg(long)]
        rate: Decimal,
    },

    /// Привести выгрузку клиентов к единой схеме
    Customers {
        #[arg(short = 'i', long = "input")]
        input: Option<String>,

        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },
}

fn open_input(path: Option<String>) -> Result<Box<dyn BufRead>> {
    let reader: Box<dyn io::Read> = match path {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    Ok(Box::new(BufReader::new(reader)))
}

fn open_output(path: Option<String>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    })
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.cmd {
        Cmd::Ads { input, page, rotate } => {
            let ads: Vec<Advertisement> = Json::read(open_input(input)?)?;
            let now = Utc::now();
            let mut board = AdBoard::new();
            board.refresh(ads, now);

            let eligible = board.eligible_for(page.as_deref());
            info!(page = page.as_deref().unwrap_or("*"), count = eligible.len(), "eligible ads");

            let mut out = io::stdout();
            if rotate {
                let rotation = board.rotation_for(page.as_deref(), config.rotation_interval(), now);
                if let Some(ad) = rotation.current().and_then(|i| eligible.get(i)) {
                    writeln!(out, "{}\t{}", ad.id, ad.title)?;
                }
            } else {
                for ad in eligible {
                    writeln!(out, "{}\t{}", ad.id, ad.title)?;
                }
            }
            out.flush().map_err(VajraError::from)
        }

        Cmd::Loan {
            input,
            output,
            in_format,
            out_format,
            eligible,
            prediction,
        } => {
            let br = open_input(input)?;
            let forms: Vec<LoanApplicationForm> = match in_format {
                Fmt::Csv => Csv::read(br),
                Fmt::Json => Json::read(br),
            }?;

            let assessor: Box<dyn RiskAssessor> = match (eligible, prediction) {
                (Some(amount), _) => Box::new(FixedCeiling(amount)),
                (None, Some(path)) => {
                    let resp = PredictionResponse::read(open_input(Some(path))?)?;
                    Box::new(ResponseFile(resp))
                }
                (None, None) => {
                    return Err(VajraError::Config(
                        "either --eligible or --prediction is required".into(),
                    ))
                }
            };

            let outcomes: Vec<LoanOutcome> = loan::process(&forms, assessor.as_ref());
            let eligible = outcomes
                .iter()
                .filter(|o| o.offer.as_ref().is_some_and(LoanOffer::is_eligible))
                .count();
            info!(total = outcomes.len(), eligible, "loan batch processed");

            let mut writer = open_output(output)?;
            match out_format {
                Fmt::Csv => Csv::write(&mut writer, &outcomes[..]),
                Fmt::Json => Json::write(&mut writer, &outcomes[..]),
            }?;
            writer.flush().map_err(VajraError::from)
        }

        Cmd::Emi {
            amount,
            eligible,
            years,
            rate,
        } => {
            let terms = LoanTerms {
                requested_amount: amount,
                years,
                annual_rate_percent: rate,
            };
            let mut out = io::stdout();
            match calculator::offer(&terms, eligible)? {
                LoanOffer::Rejected { reason, .. } => writeln!(out, "rejected: {reason}")?,
                LoanOffer::Eligible {
                    emi,
                    total_payment,
                    total_interest,
                    installments,
                    ..
                } => {
                    let ccy = &config.currency;
                    writeln!(out, "EMI:            {emi} {ccy} x {installments}")?;
                    writeln!(out, "Total payment:  {total_payment} {ccy}")?;
                    writeln!(out, "Total interest: {total_interest} {ccy}")?;
                }
            }
            out.flush().map_err(VajraError::from)
        }

        Cmd::Customers { input, output } => {
            let docs: Vec<serde_json::Value> = Json::read(open_input(input)?)?;
            let customers = customer::normalize_all(&docs)?;
            let mut writer = open_output(output)?;
            Json::write(&mut writer, &customers[..])?;
            writer.flush().map_err(VajraError::from)
        }
    }
}
