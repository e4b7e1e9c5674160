//! The structural element model for C# source.
//!
//! This module defines the typed tree produced by the parser and consumed by
//! the arranger and writer:
//! - [`CodeElement`]: one node of the tree (declaration, group wrapper, or
//!   preserved comment block), with owned ordered children
//! - [`ElementKind`]: closed sum type over the element variants, carrying the
//!   per-variant payload
//! - [`CodeAccess`], [`TypeKind`], [`GroupSeparatorType`]: supporting enums
//!
//! Consumers dispatch by exhaustive `match` on [`ElementKind`], so adding a
//! variant forces every consumer to handle it.

pub mod element;

pub use element::{
    CodeAccess, CodeElement, ElementKind, GroupSeparatorType, PropertyDetails, TypeKind,
};
