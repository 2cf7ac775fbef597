//! Serde adapter for birth dates written as `dd/MM/yyyy`

use chrono::NaiveDate;
use clientes_shared::constants::BIRTH_DATE_FORMAT;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(BIRTH_DATE_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub fn parse(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), BIRTH_DATE_FORMAT)
        .map_err(|_| format!("dataNascimento must use the dd/MM/yyyy format, got '{}'", raw))
}
