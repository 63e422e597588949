pub mod dictionary;
pub mod fan_sizes;
pub mod linked;

pub use dictionary::PostgresDictionaryRepository;
pub use fan_sizes::PostgresFanSizeRepository;
pub use linked::PostgresLinkedRepository;
