use super::domain::ContactSubmission;

/// First broken field rule for a submission. Rules run in a fixed order
/// (presence, name, email, phone, message) and stop at the first failure, so
/// a submission with several problems reports only the earliest one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("all fields are required")]
    MissingFields,
    #[error("name must be at least 2 characters and contain only letters")]
    InvalidName,
    #[error("please provide a valid email address")]
    InvalidEmail,
    #[error("please provide a valid phone number (10-15 digits)")]
    InvalidPhone,
    #[error("message must be between 10 and 1000 characters")]
    InvalidMessage,
}

impl ValidationError {
    /// Field the broken rule applies to, for structured API responses.
    pub const fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "form",
            ValidationError::InvalidName => "name",
            ValidationError::InvalidEmail => "email",
            ValidationError::InvalidPhone => "phone",
            ValidationError::InvalidMessage => "message",
        }
    }
}

/// Run the ordered rule chain over a submission, returning the trimmed
/// submission on success. No side effects.
pub fn validate(submission: &ContactSubmission) -> Result<ContactSubmission, ValidationError> {
    let trimmed = submission.trimmed();

    let rules: [fn(&ContactSubmission) -> Option<ValidationError>; 5] = [
        check_presence,
        check_name,
        check_email,
        check_phone,
        check_message,
    ];

    for rule in rules {
        if let Some(error) = rule(&trimmed) {
            return Err(error);
        }
    }

    Ok(trimmed)
}

fn check_presence(submission: &ContactSubmission) -> Option<ValidationError> {
    let fields = [
        &submission.name,
        &submission.email,
        &submission.phone,
        &submission.subject,
        &submission.message,
    ];
    if fields.iter().any(|field| field.is_empty()) {
        return Some(ValidationError::MissingFields);
    }
    None
}

fn check_name(submission: &ContactSubmission) -> Option<ValidationError> {
    let name = &submission.name;
    if name.chars().count() < 2 {
        return Some(ValidationError::InvalidName);
    }
    if !name.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Some(ValidationError::InvalidName);
    }
    None
}

fn check_email(submission: &ContactSubmission) -> Option<ValidationError> {
    let Some((local, domain)) = submission.email.split_once('@') else {
        return Some(ValidationError::InvalidEmail);
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return Some(ValidationError::InvalidEmail);
    }
    if domain.is_empty() || domain.contains(char::is_whitespace) || domain.contains('@') {
        return Some(ValidationError::InvalidEmail);
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Some(ValidationError::InvalidEmail);
    }
    None
}

fn check_phone(submission: &ContactSubmission) -> Option<ValidationError> {
    let phone = &submission.phone;
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
    if !allowed {
        return Some(ValidationError::InvalidPhone);
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !(10..=15).contains(&digits) {
        return Some(ValidationError::InvalidPhone);
    }
    None
}

fn check_message(submission: &ContactSubmission) -> Option<ValidationError> {
    let length = submission.message.chars().count();
    if !(10..=1000).contains(&length) {
        return Some(ValidationError::InvalidMessage);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "9876543210".to_string(),
            subject: "Booking question".to_string(),
            message: "I would like to ask about availability next week.".to_string(),
        }
    }

    #[test]
    fn accepts_a_well_formed_submission() {
        let valid = validate(&submission()).expect("submission passes");
        assert_eq!(valid, submission());
    }

    #[test]
    fn trims_surrounding_whitespace_on_success() {
        let mut padded = submission();
        padded.name = "  Jane Doe  ".to_string();
        padded.message = format!("  {}  ", padded.message);
        let valid = validate(&padded).expect("padded submission passes");
        assert_eq!(valid.name, "Jane Doe");
        assert_eq!(
            valid.message,
            "I would like to ask about availability next week."
        );
    }

    #[test]
    fn rejects_any_missing_field_first() {
        for blank in ["name", "email", "phone", "subject", "message"] {
            let mut incomplete = submission();
            match blank {
                "name" => incomplete.name = "   ".to_string(),
                "email" => incomplete.email = String::new(),
                "phone" => incomplete.phone = String::new(),
                "subject" => incomplete.subject = "  ".to_string(),
                _ => incomplete.message = String::new(),
            }
            assert_eq!(
                validate(&incomplete),
                Err(ValidationError::MissingFields),
                "blank {blank} should report missing fields"
            );
        }
    }

    #[test]
    fn rejects_names_with_digits_or_symbols_regardless_of_length() {
        for name in ["Jane D0e", "J@ne Doe", "Jane Doe the 3rd", "X1"] {
            let mut bad = submission();
            bad.name = name.to_string();
            assert_eq!(validate(&bad), Err(ValidationError::InvalidName), "{name}");
        }
    }

    #[test]
    fn rejects_single_character_names() {
        let mut bad = submission();
        bad.name = "J".to_string();
        assert_eq!(validate(&bad), Err(ValidationError::InvalidName));
    }

    #[test]
    fn requires_a_plausible_email_shape() {
        for email in [
            "janeexample.com",
            "@example.com",
            "jane@",
            "jane@example",
            "jane@.com",
            "jane@example.com.",
            "jane doe@example.com",
            "jane@exa mple.com",
        ] {
            let mut bad = submission();
            bad.email = email.to_string();
            assert_eq!(
                validate(&bad),
                Err(ValidationError::InvalidEmail),
                "{email}"
            );
        }
    }

    #[test]
    fn phone_digit_count_bounds_are_inclusive() {
        let cases = [
            ("987654321", false),        // 9 digits, too short
            ("9876543210", true),        // 10 digits
            ("+91 (987) 654-3210", true),
            ("987654321098765", true),   // 15 digits
            ("9876543210987654", false), // 16 digits, too long
        ];
        for (phone, ok) in cases {
            let mut candidate = submission();
            candidate.phone = phone.to_string();
            let result = validate(&candidate);
            if ok {
                assert!(result.is_ok(), "{phone} should pass");
            } else {
                assert_eq!(result, Err(ValidationError::InvalidPhone), "{phone}");
            }
        }
    }

    #[test]
    fn rejects_phone_with_letters() {
        let mut bad = submission();
        bad.phone = "98765x3210".to_string();
        assert_eq!(validate(&bad), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn message_length_bounds_are_inclusive_after_trim() {
        let cases = [(9, false), (10, true), (1000, true), (1001, false)];
        for (length, ok) in cases {
            let mut candidate = submission();
            candidate.message = format!("  {}  ", "m".repeat(length));
            let result = validate(&candidate);
            if ok {
                assert!(result.is_ok(), "length {length} should pass");
            } else {
                assert_eq!(
                    result,
                    Err(ValidationError::InvalidMessage),
                    "length {length}"
                );
            }
        }
    }

    #[test]
    fn earlier_rules_win_when_several_fields_are_broken() {
        let mut bad = submission();
        bad.name = "J4ne".to_string();
        bad.email = "not-an-email".to_string();
        assert_eq!(validate(&bad), Err(ValidationError::InvalidName));
    }
}
