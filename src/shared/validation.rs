use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating display names (category name, etc.)
    /// Must contain at least one non-whitespace character
    /// - Valid: "Books", "  Home & Garden ", "Cat 1"
    /// - Invalid: "", "   ", "\t\n"
    pub static ref NON_BLANK_REGEX: Regex = Regex::new(r"\S").unwrap();
}
