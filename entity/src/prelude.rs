pub use super::admin::Entity as Admin;
pub use super::member::Entity as Member;
