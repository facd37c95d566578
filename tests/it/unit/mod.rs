//! Unit tests for Teamboard.

mod perf_tests;
