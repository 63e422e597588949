pub mod repositories;

pub use repositories::{
    PostgresDictionaryRepository, PostgresFanSizeRepository,
    PostgresLinkedRepository,
};
