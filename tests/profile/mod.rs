//! Document profiler and type detector tests.

mod tests_profiler;
mod tests_type_detector;
