pub mod test_utils;

pub use test_utils::{read_json, redirect_location, sign_in, TestContextExt, TestState};
