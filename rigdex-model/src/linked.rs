use std::fmt;

use uuid::Uuid;

use crate::dictionary::{DictionaryEntry, DictionaryKind};

/// Named rows that hang off a dictionary parent.
///
/// A chipset belongs to a socket and a design to a vendor; the name is only
/// unique within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LinkedKind {
    Chipset,
    Design,
}

impl LinkedKind {
    pub const ALL: [LinkedKind; 2] = [LinkedKind::Chipset, LinkedKind::Design];

    pub fn type_name(self) -> &'static str {
        match self {
            LinkedKind::Chipset => "Chipset",
            LinkedKind::Design => "Design",
        }
    }

    pub fn segment(self) -> &'static str {
        match self {
            LinkedKind::Chipset => "chipsets",
            LinkedKind::Design => "designs",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            LinkedKind::Chipset => "chipsets",
            LinkedKind::Design => "designs",
        }
    }

    pub fn parent(self) -> DictionaryKind {
        match self {
            LinkedKind::Chipset => DictionaryKind::Socket,
            LinkedKind::Design => DictionaryKind::Vendor,
        }
    }

    /// Foreign key column referencing the parent table.
    pub fn parent_column(self) -> &'static str {
        match self {
            LinkedKind::Chipset => "socket_id",
            LinkedKind::Design => "vendor_id",
        }
    }

    /// Request field carrying the parent id, as it appears in violations.
    pub fn parent_param(self) -> &'static str {
        match self {
            LinkedKind::Chipset => "socketId",
            LinkedKind::Design => "vendorId",
        }
    }

    /// Lower-case parent label used in messages ("socket", "vendor").
    pub fn parent_label(self) -> &'static str {
        match self {
            LinkedKind::Chipset => "socket",
            LinkedKind::Design => "vendor",
        }
    }
}

impl fmt::Display for LinkedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A stored linked row with its parent resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkedEntry {
    pub id: Uuid,
    pub name: String,
    pub parent: DictionaryEntry,
}

impl LinkedEntry {
    pub fn new(name: impl Into<String>, parent: DictionaryEntry) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            parent,
        }
    }

    pub fn parent_id(&self) -> Uuid {
        self.parent.id
    }
}

/// Unvalidated values for a linked row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkedDraft {
    pub name: Option<String>,
    pub parent_id: Option<Uuid>,
}

impl LinkedDraft {
    pub fn new(name: impl Into<String>, parent_id: Uuid) -> Self {
        Self {
            name: Some(name.into()),
            parent_id: Some(parent_id),
        }
    }
}
