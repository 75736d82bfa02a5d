//! Database integration tests.
//!
//! These run against a live Postgres instance (`DATABASE_URL`, default
//! [`fixtures::DEFAULT_TEST_DATABASE_URL`]) and are `#[ignore]`d so the
//! default test run stays green without one:
//!
//! Each test resets the shared tables, so run them single-threaded:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -p folio-db -- --ignored --test-threads=1
//! ```

mod fixtures;
mod store_tests;
