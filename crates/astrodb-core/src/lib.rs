//! Astrodb Core Types and Definitions
//!
//! This crate provides the foundational types for the astrodb observation
//! catalog. It includes:
//!
//! - **Value types**: typed representations of raw catalog fields such as
//!   sexagesimal coordinates ([`angle`]), magnitudes ([`magnitude`]), angular
//!   sizes and separations ([`size`]), distances ([`distance`]) and position
//!   angles ([`position_angle`]).
//! - **Lookup tables**: [`constellation::Constellation`] and
//!   [`object_type::ObjectType`], parsed case-insensitively from
//!   abbreviations and synonyms.
//! - **Records**: [`record::AstronomicalObject`], [`record::ObservationRecord`]
//!   and [`record::ProgramEntry`].
//! - **Joined model**: [`joined::JoinedObject`], an object together with its
//!   back-linked observations and program memberships.
//! - **Filters**: [`filter::ObjectFilter`], the conjunctive set of
//!   criteria evaluated against joined objects.
//!
//! Every field parser is exposed through [`std::str::FromStr`] and fails with
//! a [`FieldError`] naming the offending raw text.

pub mod angle;
pub mod constellation;
pub mod distance;
pub mod filter;
pub mod item_number;
pub mod joined;
pub mod magnitude;
pub mod named;
pub mod object_type;
pub mod position_angle;
pub mod record;
pub mod size;

mod error;
mod numeric;

pub use error::FieldError;
pub use numeric::format_number;
