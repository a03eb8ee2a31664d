//! Shared test harness modules for the PPR CLI.

use super::*;

mod helpers;
mod route_unit;
