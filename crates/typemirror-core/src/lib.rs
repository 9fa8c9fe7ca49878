#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for typemirror type descriptions.
//!
//! Two ways to populate a [`TypeSet`]:
//! - **Static**: implement [`Describe`] for Rust types (`TypeSet::of::<T>()`)
//! - **Dynamic**: build descriptions directly (`declare_struct`, `sequence`, ...),
//!   as the schema notation loader does
//!
//! Both produce the same arena of [`TypeDesc`] keyed by [`TypeId`], which the
//! registry walks to discover declarations.

mod colors;
mod describe;
mod types;
pub mod utils;

#[cfg(test)]
mod describe_tests;
#[cfg(test)]
mod types_tests;

pub use colors::Colors;
pub use describe::{Describe, StructBuilder};
pub use types::{
    Constant, Literal, Member, MemberAttrs, PrimitiveKind, Shape, TypeDesc, TypeId, TypeSet,
};
