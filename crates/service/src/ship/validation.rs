//! Field rules for ship payloads.
//!
//! Each rule checks one field of a [`ShipDraft`] and knows how to copy it onto
//! a stored ship. Create requires every `required` rule to pass; partial update
//! runs the rules in table order and touches only the fields that are present.

use chrono::{DateTime, Utc};

use super::domain::ShipDraft;
use super::rating::{production_year, round_2, CURRENT_YEAR};
use super::{NewShip, Ship};
use crate::errors::ServiceError;

pub const MAX_LABEL_LEN: usize = 50;
pub const MIN_PROD_YEAR: i32 = 2800;
pub const MAX_PROD_YEAR: i32 = CURRENT_YEAR;
pub const MIN_SPEED: f64 = 0.01;
pub const MAX_SPEED: f64 = 0.99;
pub const MIN_CREW_SIZE: i32 = 1;
pub const MAX_CREW_SIZE: i32 = 9999;

/// Name and planet: 1 to 50 characters.
pub fn is_valid_label(value: &str) -> bool {
    let len = value.chars().count();
    len >= 1 && len <= MAX_LABEL_LEN
}

pub fn is_valid_prod_date(prod_date: &DateTime<Utc>) -> bool {
    (MIN_PROD_YEAR..=MAX_PROD_YEAR).contains(&production_year(prod_date))
}

pub fn is_valid_speed(speed: f64) -> bool {
    (MIN_SPEED..=MAX_SPEED).contains(&speed)
}

pub fn is_valid_crew_size(crew_size: i32) -> bool {
    (MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&crew_size)
}

/// Outcome of checking one field of a draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldCheck {
    Absent,
    Valid,
    Invalid,
}

impl FieldCheck {
    fn of<T>(value: Option<T>, valid: impl FnOnce(T) -> bool) -> Self {
        match value {
            None => Self::Absent,
            Some(v) => {
                if valid(v) { Self::Valid } else { Self::Invalid }
            }
        }
    }
}

pub struct FieldRule {
    pub field: &'static str,
    /// Must be present and valid on create.
    pub required: bool,
    pub check: fn(&ShipDraft) -> FieldCheck,
    pub apply: fn(&ShipDraft, &mut Ship),
}

/// All ship fields in the order updates are applied.
pub static FIELD_RULES: [FieldRule; 7] = [
    FieldRule { field: "name", required: true, check: check_name, apply: apply_name },
    FieldRule { field: "planet", required: true, check: check_planet, apply: apply_planet },
    FieldRule { field: "shipType", required: true, check: check_ship_type, apply: apply_ship_type },
    FieldRule { field: "prodDate", required: true, check: check_prod_date, apply: apply_prod_date },
    FieldRule { field: "isUsed", required: false, check: check_is_used, apply: apply_is_used },
    FieldRule { field: "speed", required: true, check: check_speed, apply: apply_speed },
    FieldRule { field: "crewSize", required: true, check: check_crew_size, apply: apply_crew_size },
];

fn check_name(d: &ShipDraft) -> FieldCheck { FieldCheck::of(d.name.as_deref(), is_valid_label) }
fn check_planet(d: &ShipDraft) -> FieldCheck { FieldCheck::of(d.planet.as_deref(), is_valid_label) }
fn check_ship_type(d: &ShipDraft) -> FieldCheck { FieldCheck::of(d.ship_type, |_| true) }
fn check_prod_date(d: &ShipDraft) -> FieldCheck { FieldCheck::of(d.prod_date.as_ref(), is_valid_prod_date) }
fn check_is_used(d: &ShipDraft) -> FieldCheck { FieldCheck::of(d.is_used, |_| true) }
fn check_speed(d: &ShipDraft) -> FieldCheck { FieldCheck::of(d.speed, is_valid_speed) }
fn check_crew_size(d: &ShipDraft) -> FieldCheck { FieldCheck::of(d.crew_size, is_valid_crew_size) }

fn apply_name(d: &ShipDraft, ship: &mut Ship) {
    if let Some(v) = &d.name { ship.name = v.clone(); }
}
fn apply_planet(d: &ShipDraft, ship: &mut Ship) {
    if let Some(v) = &d.planet { ship.planet = v.clone(); }
}
fn apply_ship_type(d: &ShipDraft, ship: &mut Ship) {
    if let Some(v) = d.ship_type { ship.ship_type = v; }
}
fn apply_prod_date(d: &ShipDraft, ship: &mut Ship) {
    if let Some(v) = d.prod_date { ship.prod_date = v; }
}
fn apply_is_used(d: &ShipDraft, ship: &mut Ship) {
    if let Some(v) = d.is_used { ship.is_used = v; }
}
fn apply_speed(d: &ShipDraft, ship: &mut Ship) {
    if let Some(v) = d.speed { ship.speed = round_2(v); }
}
fn apply_crew_size(d: &ShipDraft, ship: &mut Ship) {
    if let Some(v) = d.crew_size { ship.crew_size = v; }
}

/// True when the draft can be created as-is.
pub fn validate(draft: &ShipDraft) -> bool {
    ensure_valid(draft).is_ok()
}

/// Like [`validate`], naming the first field that fails.
pub fn ensure_valid(draft: &ShipDraft) -> Result<(), ServiceError> {
    match FIELD_RULES
        .iter()
        .filter(|r| r.required)
        .find(|r| (r.check)(draft) != FieldCheck::Valid)
    {
        Some(rule) => Err(ServiceError::invalid_field(rule.field)),
        None => Ok(()),
    }
}

/// Validate a complete draft and turn it into an insertable ship.
///
/// `is_used` defaults to false, speed is rounded to two places. The rating is
/// left at zero for the caller to compute.
pub fn into_new_ship(draft: ShipDraft) -> Result<NewShip, ServiceError> {
    ensure_valid(&draft)?;
    let ShipDraft { name, planet, ship_type, prod_date, is_used, speed, crew_size } = draft;
    Ok(NewShip {
        name: name.ok_or_else(|| ServiceError::invalid_field("name"))?,
        planet: planet.ok_or_else(|| ServiceError::invalid_field("planet"))?,
        ship_type: ship_type.ok_or_else(|| ServiceError::invalid_field("shipType"))?,
        prod_date: prod_date.ok_or_else(|| ServiceError::invalid_field("prodDate"))?,
        is_used: is_used.unwrap_or(false),
        speed: round_2(speed.ok_or_else(|| ServiceError::invalid_field("speed"))?),
        crew_size: crew_size.ok_or_else(|| ServiceError::invalid_field("crewSize"))?,
        rating: 0.0,
    })
}

/// Copy every present field of `draft` onto `ship`, rule by rule.
///
/// Stops at the first invalid field; fields applied before it stay applied on
/// `ship`, so callers must treat `ship` as scratch until this returns `Ok`.
pub fn apply_updates(draft: &ShipDraft, ship: &mut Ship) -> Result<(), ServiceError> {
    for rule in &FIELD_RULES {
        match (rule.check)(draft) {
            FieldCheck::Absent => {}
            FieldCheck::Valid => (rule.apply)(draft, ship),
            FieldCheck::Invalid => return Err(ServiceError::invalid_field(rule.field)),
        }
    }
    Ok(())
}
