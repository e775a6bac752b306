//! Tests for the shardbench-engine crate.

mod helpers;
