/// Converts a stored mobile number to the international format the messaging provider expects.
///
/// Surrounding whitespace and inner spaces are removed first. Numbers already starting with
/// `+` and anything that does not look like an Indian mobile number pass through unchanged.
pub fn normalize_number(stored: &str) -> String {
    let number: String = stored.trim().chars().filter(|c| *c != ' ').collect();

    if number.starts_with('+') {
        return number;
    }

    if number.len() == 12 && number.starts_with("91") {
        return format!("+{}", number);
    }

    if number.len() == 10 && number.chars().all(|c| c.is_ascii_digit()) {
        return format!("+91{}", number);
    }

    number
}
