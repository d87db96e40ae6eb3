//! # fp-instruments
//!
//! European vanilla option definitions: the option right, the terminal
//! payoff, and the [`OptionSpec`] record handed to pricing engines.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// European option specification.
pub mod option;

/// Option payoff types.
pub mod payoff;

pub use option::OptionSpec;
pub use payoff::{OptionType, PlainVanillaPayoff};
