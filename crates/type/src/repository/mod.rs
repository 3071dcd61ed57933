// SPDX-License-Identifier: Apache-2.0

mod context;
mod name;
mod record;

pub use context::*;
pub use name::*;
pub use record::*;
