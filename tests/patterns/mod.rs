//! Pattern finder tests.

mod tests_pattern_finder;
