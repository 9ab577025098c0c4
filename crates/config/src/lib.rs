// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Configuration loading, package selection and repository resolution

mod error;
mod load;
mod pin;
mod resolve;
mod select;

pub use error::ConfigError;
pub use load::{
    find_config, load_options, parse_config, read_dependencies, ConfigFile, Overrides,
    CONFIG_FILE,
};
pub use pin::pin_dependencies;
pub use resolve::{parse_spec, resolve, RepoSpec, ResolveFn};
pub use select::select_packages;
