use std::fmt;

use uuid::Uuid;

/// Plain lookup tables that only carry a unique name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DictionaryKind {
    Socket,
    Vendor,
    Manufacturer,
    FanPowerConnector,
    GraphicsCardPowerConnector,
    PciExpressConnectorVersion,
    PsuCertificate,
    PsuFormFactor,
    StorageConnector,
    ExpansionBayFormat,
    VideoMemoryType,
}

impl DictionaryKind {
    pub const ALL: [DictionaryKind; 11] = [
        DictionaryKind::Socket,
        DictionaryKind::Vendor,
        DictionaryKind::Manufacturer,
        DictionaryKind::FanPowerConnector,
        DictionaryKind::GraphicsCardPowerConnector,
        DictionaryKind::PciExpressConnectorVersion,
        DictionaryKind::PsuCertificate,
        DictionaryKind::PsuFormFactor,
        DictionaryKind::StorageConnector,
        DictionaryKind::ExpansionBayFormat,
        DictionaryKind::VideoMemoryType,
    ];

    /// Human readable type name used in violation messages.
    pub fn type_name(self) -> &'static str {
        match self {
            DictionaryKind::Socket => "Socket",
            DictionaryKind::Vendor => "Vendor",
            DictionaryKind::Manufacturer => "Manufacturer",
            DictionaryKind::FanPowerConnector => "Fan power connector",
            DictionaryKind::GraphicsCardPowerConnector => {
                "Graphics card power connector"
            }
            DictionaryKind::PciExpressConnectorVersion => {
                "PCI Express connector version"
            }
            DictionaryKind::PsuCertificate => "PSU certificate",
            DictionaryKind::PsuFormFactor => "PSU form factor",
            DictionaryKind::StorageConnector => "Storage connector",
            DictionaryKind::ExpansionBayFormat => "Expansion bay format",
            DictionaryKind::VideoMemoryType => "Video memory type",
        }
    }

    /// Path segment under `/api/v1`.
    pub fn segment(self) -> &'static str {
        match self {
            DictionaryKind::Socket => "sockets",
            DictionaryKind::Vendor => "vendors",
            DictionaryKind::Manufacturer => "manufacturers",
            DictionaryKind::FanPowerConnector => "fan-power-connectors",
            DictionaryKind::GraphicsCardPowerConnector => {
                "graphics-card-power-connectors"
            }
            DictionaryKind::PciExpressConnectorVersion => {
                "pci-express-connector-versions"
            }
            DictionaryKind::PsuCertificate => "psu-certificates",
            DictionaryKind::PsuFormFactor => "psu-form-factors",
            DictionaryKind::StorageConnector => "storage-connectors",
            DictionaryKind::ExpansionBayFormat => "expansion-bay-formats",
            DictionaryKind::VideoMemoryType => "video-memory-types",
        }
    }

    /// Backing table name. Always a compile-time constant, never user input.
    pub fn table(self) -> &'static str {
        match self {
            DictionaryKind::Socket => "sockets",
            DictionaryKind::Vendor => "vendors",
            DictionaryKind::Manufacturer => "manufacturers",
            DictionaryKind::FanPowerConnector => "fan_power_connectors",
            DictionaryKind::GraphicsCardPowerConnector => {
                "graphics_card_power_connectors"
            }
            DictionaryKind::PciExpressConnectorVersion => {
                "pci_express_connector_versions"
            }
            DictionaryKind::PsuCertificate => "psu_certificates",
            DictionaryKind::PsuFormFactor => "psu_form_factors",
            DictionaryKind::StorageConnector => "storage_connectors",
            DictionaryKind::ExpansionBayFormat => "expansion_bay_formats",
            DictionaryKind::VideoMemoryType => "video_memory_types",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.segment() == segment)
    }
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A stored dictionary row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DictionaryEntry {
    pub id: Uuid,
    pub name: String,
}

impl DictionaryEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
        }
    }
}

/// Unvalidated values for a named row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedDraft {
    pub name: Option<String>,
}

impl NamedDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
