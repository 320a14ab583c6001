//! Field-level and whole-record checks for ship payloads.
//!
//! The `check_*` functions report the first failing field; the `is_valid_*`
//! predicates are thin boolean views over them.

use models::{errors::ModelError, ship};

use super::domain::ShipPayload;

fn missing(field: &str) -> ModelError {
    ModelError::Validation(format!("{field} is required"))
}

/// Every present field must pass its rule; absent fields are ignored.
pub fn check_existing_data(p: &ShipPayload) -> Result<(), ModelError> {
    if let Some(name) = &p.name {
        ship::validate_name("name", name)?;
    }
    if let Some(planet) = &p.planet {
        ship::validate_name("planet", planet)?;
    }
    // shipType is a closed enum: if it deserialized, it is a recognised variant
    if let Some(prod_date) = p.prod_date {
        ship::validate_prod_date(prod_date)?;
    }
    if let Some(speed) = p.speed {
        ship::validate_speed(speed)?;
    }
    if let Some(crew_size) = p.crew_size {
        ship::validate_crew_size(crew_size)?;
    }
    Ok(())
}

/// All creation fields must be present and valid. `isUsed` is not checked
/// here; callers default it before validating.
pub fn check_required_data(p: &ShipPayload) -> Result<(), ModelError> {
    if p.name.is_none() {
        return Err(missing("name"));
    }
    if p.planet.is_none() {
        return Err(missing("planet"));
    }
    if p.ship_type.is_none() {
        return Err(missing("shipType"));
    }
    if p.prod_date.is_none() {
        return Err(missing("prodDate"));
    }
    if p.speed.is_none() {
        return Err(missing("speed"));
    }
    if p.crew_size.is_none() {
        return Err(missing("crewSize"));
    }
    check_existing_data(p)
}

pub fn is_valid_required_data(p: &ShipPayload) -> bool {
    check_required_data(p).is_ok()
}

pub fn is_valid_existing_data(p: &ShipPayload) -> bool {
    check_existing_data(p).is_ok()
}
