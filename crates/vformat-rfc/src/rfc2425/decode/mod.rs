//! Versioned decoding.
//!
//! A [`DecoderRegistry`] maps top-level component names to their newest
//! [`Decoder`]; each decoder links to the one for the previous version.
//! Decoding leaves values raw; [`Component::normalize_attributes`] converts
//! them.
//!
//! [`Component::normalize_attributes`]: crate::rfc2425::Component::normalize_attributes

mod decoder;
mod normalize;
mod profile;
mod registry;
pub mod transfer;

pub use decoder::Decoder;
pub use profile::Profile;
pub use registry::{DecoderRegistry, decode, decode_raw, registry};
