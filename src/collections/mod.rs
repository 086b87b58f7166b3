//! Paged collections.
//!
//! [`PagedList`] exposes the paging state of a page, [`TypedPagedList`] adds the items of the page
//! and [`PagedVec`] implements both over a `Vec`.

mod paged;

pub use paged::{PagedList, PagedVec, TypedPagedList};
