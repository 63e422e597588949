use std::fmt;

use uuid::Uuid;

/// Case fan frame size in millimetres.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FanSize {
    pub id: Uuid,
    pub length: i32,
    pub width: i32,
    pub height: i32,
}

impl FanSize {
    pub fn new(length: i32, width: i32, height: i32) -> Self {
        Self {
            id: Uuid::now_v7(),
            length,
            width,
            height,
        }
    }

    pub fn dimensions(&self) -> (i32, i32, i32) {
        (self.length, self.width, self.height)
    }
}

impl fmt::Display for FanSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.length, self.width, self.height)
    }
}

/// One axis of a fan size, in the order used for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanDimension {
    Length,
    Width,
    Height,
}

impl FanDimension {
    pub const ALL: [FanDimension; 3] =
        [FanDimension::Length, FanDimension::Width, FanDimension::Height];

    pub fn param(self) -> &'static str {
        match self {
            FanDimension::Length => "length",
            FanDimension::Width => "width",
            FanDimension::Height => "height",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FanDimension::Length => "Length",
            FanDimension::Width => "Width",
            FanDimension::Height => "Height",
        }
    }
}

/// Unvalidated values for a fan size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FanSizeDraft {
    pub length: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl FanSizeDraft {
    pub fn new(length: i32, width: i32, height: i32) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn get(&self, dimension: FanDimension) -> Option<i32> {
        match dimension {
            FanDimension::Length => self.length,
            FanDimension::Width => self.width,
            FanDimension::Height => self.height,
        }
    }

    /// Overlay the supplied values on top of a stored fan size.
    pub fn merged_onto(&self, stored: &FanSize) -> FanSizeDraft {
        FanSizeDraft {
            length: self.length.or(Some(stored.length)),
            width: self.width.or(Some(stored.width)),
            height: self.height.or(Some(stored.height)),
        }
    }

    pub fn complete(&self) -> Option<(i32, i32, i32)> {
        Some((self.length?, self.width?, self.height?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_stored_values_for_missing_axes() {
        let stored = FanSize::new(120, 120, 25);
        let patch = FanSizeDraft {
            height: Some(15),
            ..Default::default()
        };

        assert_eq!(patch.merged_onto(&stored).complete(), Some((120, 120, 15)));
    }

    #[test]
    fn display_uses_lxwxh() {
        assert_eq!(FanSize::new(140, 140, 25).to_string(), "140x140x25");
    }
}
