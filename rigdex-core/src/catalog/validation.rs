//! Violation builders and field rules shared by the catalog services.

use rigdex_model::{FanDimension, LinkedKind};
use uuid::Uuid;

use crate::error::{CatalogError, Violation};

pub const MAX_NAME_LENGTH: usize = 255;

pub const FAN_SIZE_TYPE_NAME: &str = "Fan size";

/// Trim surrounding whitespace from a supplied name.
pub fn normalize_name(name: Option<&str>) -> Option<String> {
    name.map(|name| name.trim().to_string())
}

/// A name that can take part in a uniqueness lookup.
pub fn usable_name(name: Option<&str>) -> Option<&str> {
    name.filter(|name| !name.is_empty())
}

pub fn check_name(name: Option<&str>, violations: &mut Vec<Violation>) {
    match name {
        None => violations.push(blank_name()),
        Some(name) if name.is_empty() => violations.push(blank_name()),
        Some(name) if name.chars().count() > MAX_NAME_LENGTH => {
            violations.push(Violation::new(
                ["name"],
                format!("Name must be at most {MAX_NAME_LENGTH} characters!"),
            ))
        }
        Some(_) => {}
    }
}

fn blank_name() -> Violation {
    Violation::new(["name"], "Name must not be blank!")
}

pub fn check_dimension(
    dimension: FanDimension,
    value: Option<i32>,
    violations: &mut Vec<Violation>,
) {
    if !value.is_some_and(|value| value > 0) {
        violations.push(Violation::new(
            [dimension.param()],
            format!("{} must be a positive number!", dimension.label()),
        ));
    }
}

pub fn missing_reference(kind: LinkedKind) -> Violation {
    Violation::new(
        [kind.parent_param()],
        format!("{} must be specified!", kind.parent().type_name()),
    )
}

/// The addressed row itself is missing.
pub fn entity_not_found(type_name: &str, id: Uuid) -> CatalogError {
    CatalogError::not_found(Violation::message(format!(
        "{type_name} with ID = {id} not found!"
    )))
}

/// A row referenced from the request body is missing.
pub fn reference_not_found(type_name: &str, id: Uuid) -> CatalogError {
    CatalogError::not_found(Violation::new(
        ["id"],
        format!("{type_name} with ID = {id} not found!"),
    ))
}

pub fn name_taken(type_name: &str, name: &str) -> Violation {
    Violation::new(
        ["name"],
        format!("{type_name} with name = {name} already exists!"),
    )
}

pub fn linked_name_taken(
    kind: LinkedKind,
    name: &str,
    parent_name: &str,
) -> Violation {
    Violation::new(
        ["name", kind.parent_param()],
        format!(
            "{} with name = {} already exists for {} {}!",
            kind.type_name(),
            name,
            kind.parent_label(),
            parent_name
        ),
    )
}

pub fn fan_size_taken(length: i32, width: i32, height: i32) -> Violation {
    Violation::new(
        FanDimension::ALL.map(FanDimension::param),
        format!("{FAN_SIZE_TYPE_NAME} {length}x{width}x{height} already exists!"),
    )
}

/// Report a storage-level unique violation the same way the pre-check does.
pub fn on_conflict(
    err: CatalogError,
    violation: impl FnOnce() -> Violation,
) -> CatalogError {
    match err {
        CatalogError::Conflict(_) => CatalogError::invalid(violation()),
        other => other,
    }
}

pub fn into_result(violations: Vec<Violation>) -> Result<(), CatalogError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::Invalid(violations))
    }
}
