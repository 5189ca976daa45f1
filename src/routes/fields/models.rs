use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A saved field boundary: a named closed ring of [lon, lat] pairs plus the
/// date it was drawn.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct FieldRecord {
    pub name: String,
    pub coords: Vec<[f64; 2]>,
    pub date: NaiveDate,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct FieldCreate {
    pub name: String,
    pub coords: Vec<[f64; 2]>,
    pub date: Option<NaiveDate>,
}

impl FieldCreate {
    pub fn into_record(self) -> FieldRecord {
        FieldRecord {
            name: self.name,
            coords: self.coords,
            date: self.date.unwrap_or_else(|| chrono::Utc::now().date_naive()),
        }
    }
}
