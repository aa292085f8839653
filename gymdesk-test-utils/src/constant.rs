//! Placeholder values shared across tests. None of these are real credentials.

pub static TEST_API_KEY: &str = "test-messaging-api-key";

pub static TEST_MOBILE: &str = "9876543210";

pub static TEST_ADMIN_USERNAME: &str = "admin";

pub static TEST_ADMIN_PASSWORD: &str = "correct horse battery staple";
