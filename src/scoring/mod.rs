// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Term frequency, inverse document frequency and field length feed each
//! term's contribution; field boosts weight whole fields against each other;
//! the boolean mode and coordination decide how several query words combine.

mod core;
pub mod ranking;

pub use self::core::*;
