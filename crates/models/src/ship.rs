use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, TimeZone, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX_CHARS: usize = 50;
pub const SPEED_MIN: f64 = 0.01;
pub const SPEED_MAX: f64 = 0.99;
pub const CREW_SIZE_MIN: i32 = 1;
pub const CREW_SIZE_MAX: i32 = 9999;
/// 2800-01-01T00:00:00Z, inclusive.
pub const PROD_DATE_MIN_MILLIS: i64 = 26_192_246_400_000;
/// 3020-01-01T00:00:00Z, exclusive.
pub const PROD_DATE_END_MILLIS: i64 = 33_134_745_600_000;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ship")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    /// Epoch milliseconds.
    #[serde(rename = "prodDate", alias = "productionDate")]
    pub prod_date: i64,
    pub is_used: bool,
    #[sea_orm(column_type = "Double")]
    pub speed: f64,
    pub crew_size: i32,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    #[sea_orm(string_value = "TRANSPORT")]
    Transport,
    #[sea_orm(string_value = "MILITARY")]
    Military,
    #[sea_orm(string_value = "MERCHANT")]
    Merchant,
}

impl ShipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipType::Transport => "TRANSPORT",
            ShipType::Military => "MILITARY",
            ShipType::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipType {
    type Err = errors::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "TRANSPORT" => Ok(ShipType::Transport),
            "MILITARY" => Ok(ShipType::Military),
            "MERCHANT" => Ok(ShipType::Merchant),
            other => Err(errors::ModelError::Validation(format!("unknown shipType `{other}`"))),
        }
    }
}

/// Calendar year (UTC) of an epoch-millisecond timestamp.
pub fn production_year(prod_date: i64) -> Option<i32> {
    DateTime::<Utc>::from_timestamp_millis(prod_date).map(|d| d.year())
}

/// Epoch milliseconds of January 1st, 00:00 UTC, of `year`.
pub fn start_of_year_millis(year: i32) -> Option<i64> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single().map(|d| d.timestamp_millis())
}

pub fn validate_name(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > NAME_MAX_CHARS {
        return Err(errors::ModelError::Validation(format!(
            "{field} must be at most {NAME_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_prod_date(prod_date: i64) -> Result<(), errors::ModelError> {
    if !(PROD_DATE_MIN_MILLIS..PROD_DATE_END_MILLIS).contains(&prod_date) {
        return Err(errors::ModelError::Validation(
            "prodDate must fall within [2800-01-01, 3020-01-01)".into(),
        ));
    }
    Ok(())
}

pub fn validate_speed(speed: f64) -> Result<(), errors::ModelError> {
    if !(SPEED_MIN..=SPEED_MAX).contains(&speed) {
        return Err(errors::ModelError::Validation(format!(
            "speed must be within [{SPEED_MIN}, {SPEED_MAX}]"
        )));
    }
    Ok(())
}

pub fn validate_crew_size(crew_size: i32) -> Result<(), errors::ModelError> {
    if !(CREW_SIZE_MIN..=CREW_SIZE_MAX).contains(&crew_size) {
        return Err(errors::ModelError::Validation(format!(
            "crewSize must be within [{CREW_SIZE_MIN}, {CREW_SIZE_MAX}]"
        )));
    }
    Ok(())
}
