use once_cell::sync::Lazy;
use regex::Regex;

pub fn required(field: &str, value: &str) -> Result<(), String> {
    match !value.trim().is_empty() {
        true => Ok(()),
        false => Err(format!("{field} must not be empty")),
    }
}

pub fn is_valid_pin(pin: &str) -> Result<(), String> {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[0-9]{4,8}$").unwrap());
    match RE.is_match(pin) {
        true => Ok(()),
        false => Err("pin code should be 4 to 8 digits".to_string()),
    }
}

#[cfg(test)]
#[test]
fn test_required() {
    assert!(required("title", "hello").is_ok());
    assert!(required("title", "   ").is_err());
}

#[cfg(test)]
#[test]
fn test_pin() {
    assert!(is_valid_pin("4821").is_ok());
    assert!(is_valid_pin("12345678").is_ok());
    assert!(is_valid_pin("123").is_err());
    assert!(is_valid_pin("12a4").is_err());
}
