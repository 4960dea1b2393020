// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod form;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod periods;
pub mod store;
pub mod utils;

pub use engine::{compute_category_breakdown, compute_totals, compute_trend, filter_transactions};
