
mod validation_tests {
    use crate::message::validate;

    #[test]
    fn accepts_non_empty_fields() {
        assert!(validate("Maintenance", "Service down 2-4am").is_ok());
    }

    #[test]
    fn rejects_empty_title_or_body() {
        assert!(validate("", "body").is_err());
        assert!(validate("title", "").is_err());
    }

    #[test]
    fn accepts_whitespace_only_fields() {
        assert!(validate("   ", "body").is_ok());
        assert!(validate("title", " ").is_ok());
    }
}
