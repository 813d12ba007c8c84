use sea_orm::{entity::prelude::*, ActiveValue::{NotSet, Unchanged}, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Ship category. Stored and serialized by its upper-case name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
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

/// Persisted ship row. `prod_date` travels as epoch milliseconds on the wire.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ship")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub prod_date: DateTimeUtc,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A validated ship that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewShip {
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    pub prod_date: DateTimeUtc,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

impl NewShip {
    pub fn with_id(self, id: i64) -> Model {
        Model {
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

    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(self.name),
            planet: Set(self.planet),
            ship_type: Set(self.ship_type),
            prod_date: Set(self.prod_date),
            is_used: Set(self.is_used),
            speed: Set(self.speed),
            crew_size: Set(self.crew_size),
            rating: Set(self.rating),
        }
    }
}

impl Model {
    /// Active model that rewrites every column of an existing row.
    fn into_update_model(self) -> ActiveModel {
        ActiveModel {
            id: Unchanged(self.id),
            name: Set(self.name),
            planet: Set(self.planet),
            ship_type: Set(self.ship_type),
            prod_date: Set(self.prod_date),
            is_used: Set(self.is_used),
            speed: Set(self.speed),
            crew_size: Set(self.crew_size),
            rating: Set(self.rating),
        }
    }
}

pub async fn insert<C: ConnectionTrait>(db: &C, ship: NewShip) -> Result<Model, errors::ModelError> {
    if ship.name.is_empty() || ship.planet.is_empty() {
        return Err(errors::ModelError::Validation("name and planet required".into()));
    }
    Ok(ship.into_active_model().insert(db).await?)
}

pub async fn overwrite<C: ConnectionTrait>(db: &C, ship: Model) -> Result<Model, errors::ModelError> {
    Ok(ship.into_update_model().update(db).await?)
}

pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}
