pub mod dictionary;
pub mod fan_sizes;
pub mod health;
pub mod linked;
