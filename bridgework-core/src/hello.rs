//! The smallest possible binding: a fixed string

/// Greeting returned by [`greet`]
pub const GREETING: &str = "Hello, world!";

/// Return the fixed greeting
pub fn greet() -> String {
    GREETING.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greet() {
        assert_eq!(greet(), "Hello, world!");
    }
}
