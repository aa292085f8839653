//! Declarative test builder.
//!
//! Configuration calls are queued and executed together in `build()`: tables first, then
//! database fixtures, then mock endpoints.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_gym_tables: bool,

    // Database fixtures to insert
    members: Vec<(String, String)>, // (name, end_date)
    admins: Vec<(String, String)>,  // (username, password)

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    send_message_endpoints: Vec<(usize, usize)>, // (status, expected_requests)
    upload_endpoints: Vec<(String, usize)>,      // (public_url, expected_requests)
    rejected_upload_endpoints: Vec<usize>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_gym_tables: false,
            members: Vec::new(),
            admins: Vec::new(),
            mock_builders: Vec::new(),
            send_message_endpoints: Vec::new(),
            upload_endpoints: Vec::new(),
            rejected_upload_endpoints: Vec::new(),
        }
    }

    /// Add the `members` and `admins` tables to the test database.
    pub fn with_gym_tables(mut self) -> Self {
        self.include_gym_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a member with the test mobile number and the given end date.
    pub fn with_member(mut self, name: impl Into<String>, end_date: impl Into<String>) -> Self {
        self.members.push((name.into(), end_date.into()));
        self
    }

    /// Insert an admin whose password is hashed with argon2.
    pub fn with_admin(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.admins.push((username.into(), password.into()));
        self
    }

    /// Mock `POST /api/send-message` answering with `status`.
    pub fn with_send_message_endpoint(mut self, status: usize, expected_requests: usize) -> Self {
        self.send_message_endpoints.push((status, expected_requests));
        self
    }

    /// Mock a successful `POST /api/upload` returning `public_url`.
    pub fn with_upload_endpoint(
        mut self,
        public_url: impl Into<String>,
        expected_requests: usize,
    ) -> Self {
        self.upload_endpoints
            .push((public_url.into(), expected_requests));
        self
    }

    /// Mock `POST /api/upload` answering 200 with `success: false`.
    pub fn with_rejected_upload_endpoint(mut self, expected_requests: usize) -> Self {
        self.rejected_upload_endpoints.push(expected_requests);
        self
    }

    /// Add a custom mock endpoint.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_gym_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Member),
                schema.create_table_from_entity(entity::prelude::Admin),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (name, end_date) in self.members {
            setup.member().insert_member(&name, &end_date).await?;
        }

        for (username, password) in self.admins {
            setup.admin().insert_admin(&username, &password).await?;
        }

        // 3. Create mock endpoints
        // Custom endpoints first so tests can stack several mocks on one path
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (status, expected) in self.send_message_endpoints {
            mocks.push(
                setup
                    .messaging()
                    .create_send_message_endpoint(status, expected),
            );
        }

        for (public_url, expected) in self.upload_endpoints {
            mocks.push(
                setup
                    .messaging()
                    .create_upload_endpoint(&public_url, expected),
            );
        }

        for expected in self.rejected_upload_endpoints {
            mocks.push(setup.messaging().create_rejected_upload_endpoint(expected));
        }

        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
