// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0

#![warn(
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    clippy::all
)]
#![forbid(unsafe_code)]

pub mod repository;
pub mod token;
pub mod user;

mod permission;

pub use permission::*;
pub use repository::{
    Context as RepositoryContext, Name as RepositoryName, Record as Repository,
};
pub use token::{Kind as TokenKind, Record as TokenRecord, Token};
pub use user::{Name as UserName, Record as User};
