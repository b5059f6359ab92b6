use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::photo_list::PhotoList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "lost_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub pet_type: String,
    pub breed: String,
    pub color: String,
    pub gender: String,
    pub age: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub features: String,
    pub lost_time: DateTime,
    #[sea_orm(column_type = "Text")]
    pub lost_location_text: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact_info: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub photos: PhotoList,
    pub is_found: bool,
    // Set exactly once, by the mark-found transition.
    pub found_time: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
