//! Meals as delivered by cafeteria feeds.
//!
//! Meals are written by the feed importer, which runs with internal rights,
//! so no ability is checked here.

use serde::Deserialize;

use openmensa_db::{
    model::meal::{Meal, NewMeal},
    store::Repository,
};

use crate::error::ServiceResult;
use crate::validation::{BLANK, INVALID, ValidationErrors, is_blank};

/// An unparsed meal as it arrives from a feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MealAttributes {
    pub cafeteria_id: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub name: Option<String>,
}

fn required<'a>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    if is_blank(value) {
        errors.add(field, BLANK);
        return None;
    }
    value.map(str::trim)
}

/// ## Summary
/// Checks every field and parses the date (`YYYY-MM-DD`) and cafeteria id.
///
/// ## Errors
/// Returns `Validation` listing every missing or malformed field.
pub fn validate_meal(attributes: &MealAttributes) -> ServiceResult<NewMeal> {
    let mut errors = ValidationErrors::new();

    let name = required(&mut errors, "name", attributes.name.as_deref());
    let date = required(&mut errors, "date", attributes.date.as_deref()).and_then(|raw| {
        let parsed = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
        if parsed.is_none() {
            errors.add("date", INVALID);
        }
        parsed
    });
    let category = required(&mut errors, "category", attributes.category.as_deref());
    let cafeteria_id = required(
        &mut errors,
        "cafeteria_id",
        attributes.cafeteria_id.as_deref(),
    )
    .and_then(|raw| {
        let parsed = raw.parse::<u64>().ok();
        if parsed.is_none() {
            errors.add("cafeteria_id", INVALID);
        }
        parsed
    });

    match (name, date, category, cafeteria_id) {
        (Some(name), Some(date), Some(category), Some(cafeteria_id)) if errors.is_empty() => {
            Ok(NewMeal {
                cafeteria_id,
                date,
                category: category.to_string(),
                name: name.to_string(),
            })
        }
        _ => Err(errors.into()),
    }
}

/// ## Summary
/// Validates and stores a meal.
///
/// ## Errors
/// Returns `Validation` for an invalid meal, or a store error.
#[tracing::instrument(skip(store, attributes))]
pub fn create_meal<S: Repository + ?Sized>(
    store: &S,
    attributes: &MealAttributes,
) -> ServiceResult<Meal> {
    let new_meal = validate_meal(attributes)?;
    let meal = store.insert_meal(new_meal)?;
    tracing::debug!(
        meal_id = %meal.id,
        cafeteria_id = meal.cafeteria_id,
        date = %meal.date,
        "Meal created"
    );
    Ok(meal)
}

/// ## Summary
/// Lists the meals of one cafeteria on one day.
///
/// ## Errors
/// Returns a store error.
pub fn meals_for<S: Repository + ?Sized>(
    store: &S,
    cafeteria_id: u64,
    date: chrono::NaiveDate,
) -> ServiceResult<Vec<Meal>> {
    Ok(store.meals_for(cafeteria_id, date)?)
}
