//! Catalog services: the rules every resource shares on top of storage.

pub mod dictionary;
pub mod fan_sizes;
pub mod linked;
pub mod validation;

pub use dictionary::DictionaryService;
pub use fan_sizes::FanSizeService;
pub use linked::LinkedService;
