//! R1CS gadgets for the MiMC-e7 keyed permutation and the Miyaguchi-Preneel
//! one-way hash built on top of it, over the BLS12-381 scalar field.

#[macro_use]
extern crate lazy_static;

pub mod circuit;
pub mod config;
mod error;
pub mod mimc;

pub use error::MimcError;

pub type Fr = bls12_381::Scalar;
