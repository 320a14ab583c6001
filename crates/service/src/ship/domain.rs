//! Request-side ship shapes and the merge rule used by partial updates.

use models::ship::{self, ShipType};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Incoming ship body. Every field may be absent; `id` and `rating` are
/// server-owned and silently ignored if a client sends them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub planet: Option<String>,
    #[serde(default)]
    pub ship_type: Option<ShipType>,
    /// Epoch milliseconds.
    #[serde(default, rename = "prodDate", alias = "productionDate")]
    pub prod_date: Option<i64>,
    #[serde(default)]
    pub is_used: Option<bool>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub crew_size: Option<i32>,
}

/// `incoming` wins when present, otherwise the stored value is kept.
pub fn merge_field<T>(existing: Option<T>, incoming: Option<T>) -> Option<T> {
    incoming.or(existing)
}

impl ShipPayload {
    /// Overlay `incoming` on top of `self`, field by field.
    pub fn merge(self, incoming: ShipPayload) -> ShipPayload {
        ShipPayload {
            name: merge_field(self.name, incoming.name),
            planet: merge_field(self.planet, incoming.planet),
            ship_type: merge_field(self.ship_type, incoming.ship_type),
            prod_date: merge_field(self.prod_date, incoming.prod_date),
            is_used: merge_field(self.is_used, incoming.is_used),
            speed: merge_field(self.speed, incoming.speed),
            crew_size: merge_field(self.crew_size, incoming.crew_size),
        }
    }

    /// Turn a complete payload into a record ready for `save`.
    pub fn into_record(self, id: Option<i64>, rating: f64) -> Result<ShipRecord, ServiceError> {
        fn required<T>(value: Option<T>, field: &str) -> Result<T, ServiceError> {
            value.ok_or_else(|| ServiceError::Validation(format!("{field} is required")))
        }

        Ok(ShipRecord {
            id,
            name: required(self.name, "name")?,
            planet: required(self.planet, "planet")?,
            ship_type: required(self.ship_type, "shipType")?,
            prod_date: required(self.prod_date, "prodDate")?,
            is_used: self.is_used.unwrap_or(false),
            speed: required(self.speed, "speed")?,
            crew_size: required(self.crew_size, "crewSize")?,
            rating,
        })
    }
}

impl From<&ship::Model> for ShipPayload {
    fn from(m: &ship::Model) -> Self {
        ShipPayload {
            name: Some(m.name.clone()),
            planet: Some(m.planet.clone()),
            ship_type: Some(m.ship_type),
            prod_date: Some(m.prod_date),
            is_used: Some(m.is_used),
            speed: Some(m.speed),
            crew_size: Some(m.crew_size),
        }
    }
}

/// A fully resolved ship handed to the repository. `id == None` inserts.
#[derive(Clone, Debug, PartialEq)]
pub struct ShipRecord {
    pub id: Option<i64>,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    pub prod_date: i64,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

impl ShipRecord {
    pub fn into_model(self, id: i64) -> ship::Model {
        ship::Model {
            id,
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating: self.rating,
        }
    }
}
