//! Brazilian real (BRL) amount handling.
//!
//! This is the only place where locale-formatted amount strings are parsed
//! or produced. Everything else works on canonical `Decimal` values.

mod brl;

#[cfg(test)]
mod props;

pub use brl::{Brl, RawAmount, format_brl, parse_brl, parse_brl_str};
