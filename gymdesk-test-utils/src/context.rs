//! Test context returned by `TestBuilder`.
//!
//! Holds the in-memory database, a session backed by a `MemoryStore`, and the mockito server
//! that plays the messaging provider.

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Test environment produced by [`TestBuilder::build`](crate::TestBuilder::build).
///
/// ```ignore
/// let mut test = TestBuilder::new().with_gym_tables().build().await?;
///
/// let member = test.member().insert_member("Ravi", "2025-03-12").await?;
/// let client = MessagingClient::new(test.messaging_url(), TEST_API_KEY);
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session for controller and session wrapper tests
    pub session: Session,

    /// Mock HTTP server standing in for the messaging provider
    pub(crate) server: ServerGuard,
    /// Mock endpoints created by the builder, kept alive for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    pub async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(Self {
            db,
            session,
            server,
            mocks: Vec::new(),
        })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock messaging provider
    pub fn messaging_url(&self) -> String {
        self.server.url()
    }

    /// Asserts every mock created by the builder received its expected number of requests.
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

/// Creates a `TestContext` with tables for the given entities (or none).
#[macro_export]
macro_rules! test_setup_with_tables {
    () => {{
        $crate::TestContext::new().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::TestContext::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Creates a `TestContext` with the member and admin tables.
#[macro_export]
macro_rules! test_setup_with_gym_tables {
    () => {{
        $crate::TestBuilder::new().with_gym_tables().build().await
    }};
}
