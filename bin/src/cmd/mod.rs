//! CLI subcommand modules.
//!
//! This module contains the implementations for all tasador CLI subcommands.

pub(crate) mod fields;
pub(crate) mod inspect;
pub(crate) mod predict;
