//! Core data model definitions shared across rigdex crates.
//!
//! The catalog is made of three record shapes:
//!
//! - [`DictionaryEntry`]: a plain named lookup row (sockets, vendors, …),
//!   addressed by a [`DictionaryKind`]
//! - [`LinkedEntry`]: a named row that belongs to a dictionary parent
//!   (chipsets on a socket, designs by a vendor), addressed by a
//!   [`LinkedKind`]
//! - [`FanSize`]: a length × width × height triple
//!
//! Every shape has a matching draft type that carries the optional values of
//! a create, replace or partial update before validation.

pub mod dictionary;
pub mod fan_size;
pub mod linked;
pub mod page;

pub use dictionary::{DictionaryEntry, DictionaryKind, NamedDraft};
pub use fan_size::{FanDimension, FanSize, FanSizeDraft};
pub use linked::{LinkedDraft, LinkedEntry, LinkedKind};
pub use page::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest, SortDirection,
};
