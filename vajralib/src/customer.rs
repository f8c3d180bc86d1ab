//! Нормализация записей клиентов: старая схема (`"First Name"`) и новая
//! (`firstName` / `first_name`) сводятся к одному [`Customer`].
//!
//! Ключи сворачиваются: нижний регистр, всё кроме букв и цифр выкидывается.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::{
    error::{Result, VajraError},
    model::{Customer, KycStatus},
};

static KEY_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("constant pattern compiles"));

/// `"First Name"`, `firstName`, `first_name` → `firstname`.
pub fn fold_key(key: &str) -> String {
    KEY_NOISE.replace_all(&key.to_lowercase(), "").into_owned()
}

struct Folded<'a>(HashMap<String, &'a Value>);

impl<'a> Folded<'a> {
    fn new(doc: &'a Map<String, Value>) -> Self {
        Self(doc.iter().map(|(k, v)| (fold_key(k), v)).collect())
    }

    fn get(&self, aliases: &[&str]) -> Option<&'a Value> {
        aliases
            .iter()
            .filter_map(|a| self.0.get(*a).copied())
            .find(|v| !v.is_null())
    }

    fn text(&self, aliases: &[&str]) -> Option<String> {
        match self.get(aliases)? {
            Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn required(&self, aliases: &[&str]) -> Result<String> {
        self.text(aliases)
            .ok_or_else(|| VajraError::Parse(format!("customer: missing {}", aliases[0])))
    }
}

fn parse_balance(v: &Value) -> Result<Decimal> {
    let s = match v {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().replace(',', ""),
        other => return Err(VajraError::Parse(format!("balance: unexpected {other}"))),
    };
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&s))
        .map_err(|e| VajraError::Parse(format!("balance: {e}")))
}

fn parse_kyc(s: &str) -> Result<KycStatus> {
    match s.to_uppercase().as_str() {
        "PENDING" | "" => Ok(KycStatus::Pending),
        "VERIFIED" | "APPROVED" => Ok(KycStatus::Verified),
        "REJECTED" => Ok(KycStatus::Rejected),
        other => Err(VajraError::Parse(format!("kyc status {other}"))),
    }
}

/// Нормализовать выгрузку целиком; первая битая запись прерывает разбор.
pub fn normalize_all(docs: &[Value]) -> Result<Vec<Customer>> {
    docs.iter().map(Customer::from_document).collect()
}

impl Customer {
    pub fn from_document(doc: &Value) -> Result<Self> {
        let obj = doc
            .as_object()
            .ok_or_else(|| VajraError::Parse("customer: expected an object".into()))?;
        let f = Folded::new(obj);

        let balance = f.get(&["balance", "accountbalance"]).map(parse_balance).transpose()?;
        let kyc_status = match f.text(&["kycstatus", "kyc"]) {
            Some(s) => parse_kyc(&s)?,
            None => KycStatus::default(),
        };

        Ok(Customer {
            first_name: f.required(&["firstname"])?,
            last_name: f.text(&["lastname", "surname"]).unwrap_or_default(),
            email: f.required(&["email", "emailaddress"])?,
            phone: f.text(&["phonenumber", "phone", "mobile"]),
            account_number: f.text(&["accountnumber", "accountno"]),
            account_type: f.text(&["accounttype"]),
            balance,
            kyc_status,
        })
    }
}
