// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: consistency checks and the validated wrapper.
//!
//! Two complementary pieces:
//!
//! 1. **`verify`** walks an index and reports every violation it finds. This is
//!    what `quire verify` prints.
//!
//! 2. **`ValidatedIndex`** only exists for indexes that passed. The searcher
//!    takes one, so lookups never have to handle a dangling doc id.

mod checks;
mod types;

pub use checks::verify;
pub use types::*;
