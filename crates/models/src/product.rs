use sea_orm::{entity::prelude::*, ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Field-level changes for a stored product. `None` keeps the current value.
/// The primary key is never part of a patch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }

    /// Overwrite the fields present in the patch; `model.id` is left untouched.
    pub fn apply(&self, model: &mut Model) {
        if let Some(name) = &self.name {
            model.name = name.clone();
        }
        if let Some(description) = &self.description {
            model.description = description.clone();
        }
        if let Some(price) = self.price {
            model.price = price;
        }
        if let Some(quantity) = self.quantity {
            model.quantity = quantity;
        }
    }
}

/// A full replacement: every field of `model` except its id.
impl From<Model> for ProductPatch {
    fn from(model: Model) -> Self {
        Self {
            name: Some(model.name),
            description: Some(model.description),
            price: Some(model.price),
            quantity: Some(model.quantity),
        }
    }
}

/// Active model with every column marked `Set`, suitable for insert.
pub fn to_active(model: Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id),
        name: Set(model.name),
        description: Set(model.description),
        price: Set(model.price),
        quantity: Set(model.quantity),
    }
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find().order_by_asc(Column::Id).all(db).await?;
    Ok(rows)
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find_by_id(id).one(db).await?;
    Ok(found)
}

pub async fn insert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, DbErr> {
    to_active(model).insert(db).await
}

/// Write `patch` onto `existing` and persist; returns the stored row.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    existing: Model,
    patch: &ProductPatch,
) -> Result<Model, errors::ModelError> {
    let mut next = existing.clone();
    patch.apply(&mut next);
    let mut am: ActiveModel = existing.into();
    am.name = Set(next.name);
    am.description = Set(next.description);
    am.price = Set(next.price);
    am.quantity = Set(next.quantity);
    let updated = am.update(db).await?;
    Ok(updated)
}

/// Returns whether a row was removed.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
