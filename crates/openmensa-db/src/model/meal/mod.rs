use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meal {
    pub id: uuid::Uuid,
    pub cafeteria_id: u64,
    pub date: chrono::NaiveDate,
    pub category: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMeal {
    pub cafeteria_id: u64,
    pub date: chrono::NaiveDate,
    pub category: String,
    pub name: String,
}
