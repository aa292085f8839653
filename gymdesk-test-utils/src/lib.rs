//! Shared test setup for the gymdesk crates.
//!
//! Tests build a [`TestContext`] through [`TestBuilder`]: an in-memory SQLite database, a
//! `MemoryStore` backed session and a mockito server standing in for the messaging provider.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_ADMIN_PASSWORD, TEST_ADMIN_USERNAME, TEST_API_KEY, TEST_MOBILE},
        test_setup_with_gym_tables, test_setup_with_tables, TestBuilder, TestContext, TestError,
    };
}
