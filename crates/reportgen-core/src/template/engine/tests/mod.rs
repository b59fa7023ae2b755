//! Tests for the template engine, split by concern

use super::*;

mod helpers;

mod tokenstream;

mod render_basic;
mod render_escaping;
mod render_loops;
