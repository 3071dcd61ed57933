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

pub mod server {
    pub use gatehouse_server::*;
}
pub mod types {
    pub use gatehouse_type::*;
}
