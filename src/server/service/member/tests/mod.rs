use chrono::NaiveDate;
use gymdesk_test_utils::prelude::*;

use crate::model::member::MemberFormDto;


fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn valid_form() -> MemberFormDto {
    MemberFormDto {
        name: "Asha Shah".to_string(),
        mobile: "9876543210".to_string(),
        plan: "Gold".to_string(),
        package: "3 Months".to_string(),
        joined_date: "2025-01-01".to_string(),
        end_date: "2025-04-01".to_string(),
    }
}
