//! Unit test suites for the operator tables and control flow helpers.
