use serde::Deserialize;

use rigdex_core::Violation;
use rigdex_model::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, SortDirection};

use crate::infra::AppError;

/// Raw `?page=&size=&direction=` values, parsed by hand so each bad value
/// becomes a violation naming its parameter.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub direction: Option<String>,
}

impl PageParams {
    pub fn into_request(self) -> Result<PageRequest, AppError> {
        let mut violations = Vec::new();

        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(raw) => raw.parse::<u32>().unwrap_or_else(|_| {
                violations.push(Violation::new(
                    ["page"],
                    "Page must be a non-negative integer!",
                ));
                0
            }),
        };

        let size = match self.size.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PAGE_SIZE,
            Some(raw) => match raw.parse::<u32>() {
                Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => size,
                _ => {
                    violations.push(Violation::new(
                        ["size"],
                        format!("Size must be between 1 and {MAX_PAGE_SIZE}!"),
                    ));
                    DEFAULT_PAGE_SIZE
                }
            },
        };

        let direction = match self.direction.as_deref().map(str::trim) {
            None | Some("") => SortDirection::Asc,
            Some(raw) => SortDirection::parse(raw).unwrap_or_else(|| {
                violations.push(Violation::new(
                    ["direction"],
                    "Direction must be either asc or desc!",
                ));
                SortDirection::Asc
            }),
        };

        if !violations.is_empty() {
            return Err(AppError::bad_request(violations));
        }
        Ok(PageRequest::new(page, size).with_direction(direction))
    }
}
