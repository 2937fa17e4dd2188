//! Input validation policy for registration and profile updates.
//!
//! Every check is pure and returns its violations in a fixed order. The
//! message text is part of the public contract, so it lives in
//! [`messages`] and nowhere else.

/// Client-facing message catalogue.
pub mod messages {
    pub const FULL_NAME_LENGTH: &str =
        "Full name must be at minimum 3 characters and maximum 60 characters";
    pub const PHONE_NUMBER_LENGTH: &str =
        "Phone numbers must be at minimum 10 characters and maximum 13 characters";
    pub const PHONE_NUMBER_PREFIX: &str =
        "Phone numbers must start with the Indonesia country code “+62”";
    pub const PASSWORD_POLICY: &str = "Passwords must be minimum 6 characters and maximum 64 characters, containing at least 1 capital characters AND 1 number AND 1 special (non alpha-numeric) characters";

    pub const PHONE_ALREADY_REGISTERED: &str = "Phone number is already registered";
    pub const PHONE_NOT_FOUND: &str = "Phone number is not found";
    pub const WRONG_PASSWORD: &str = "Wrong password";
    pub const NO_UPDATE: &str = "No update";
    pub const BAD_REQUEST: &str = "Bad request";

    pub const UNAUTHORIZED: &str = "Unauthorized";
    pub const SESSION_EXPIRED: &str = "Session is expired";
    pub const TOKEN_INVALID: &str = "There was an error when parsing JWT";
    pub const NO_SESSION: &str = "No session";

    pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

    pub const REGISTERED: &str = "Successfully Create User Register!";
    pub const LOGGED_IN: &str = "Successfully Login!";
    pub const PROFILE_FETCHED: &str = "Successfully Get User Profile!";
    pub const PROFILE_UPDATED: &str = "Successfully Update User!";
}

/// Inclusive bounds on a full name, counted in `char`s rather than bytes.
pub const FULL_NAME_LEN: std::ops::RangeInclusive<usize> = 3..=60;
/// Inclusive bounds on a phone number, counted in `char`s rather than bytes.
pub const PHONE_NUMBER_LEN: std::ops::RangeInclusive<usize> = 10..=13;
/// Inclusive bounds on a password, in characters.
pub const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 6..=64;
/// Country prefix every phone number must carry.
pub const PHONE_NUMBER_PREFIX: &str = "+62";

/// Ordered list of policy violations. Empty means valid.
///
/// # Examples
/// ```
/// use accounts::domain::validation::check_phone_number;
///
/// let result = check_phone_number("123");
/// assert_eq!(result.messages().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult(Vec<String>);

impl ValidationResult {
    /// Whether no rule was broken.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Violations in the order they were found.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Append another result's violations after this one's.
    pub fn extend(&mut self, other: ValidationResult) {
        self.0.extend(other.0);
    }

    /// Consume the result and yield the owned messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.0
    }

    fn push(&mut self, message: &str) {
        self.0.push(message.to_owned());
    }
}

/// Check a full name's length.
pub fn check_full_name(full_name: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    if !FULL_NAME_LEN.contains(&full_name.chars().count()) {
        result.push(messages::FULL_NAME_LENGTH);
    }
    result
}

/// Check a phone number's length and country prefix.
///
/// Both checks run independently; the length violation comes first.
pub fn check_phone_number(phone_number: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    if !PHONE_NUMBER_LEN.contains(&phone_number.chars().count()) {
        result.push(messages::PHONE_NUMBER_LENGTH);
    }
    if !phone_number.starts_with(PHONE_NUMBER_PREFIX) {
        result.push(messages::PHONE_NUMBER_PREFIX);
    }
    result
}

/// Check the combined password policy.
///
/// Any failing condition yields the single policy message. The capital and
/// the digit must be ASCII; any other non-alphanumeric `char` is special.
pub fn check_password(password: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    if !password_satisfies_policy(password) {
        result.push(messages::PASSWORD_POLICY);
    }
    result
}

fn password_satisfies_policy(password: &str) -> bool {
    let mut length = 0_usize;
    let mut has_upper = false;
    let mut has_digit = false;
    let mut has_special = false;
    for c in password.chars() {
        length += 1;
        has_upper |= c.is_ascii_uppercase();
        has_digit |= c.is_ascii_digit();
        has_special |= !c.is_alphanumeric();
    }
    PASSWORD_LEN.contains(&length) && has_upper && has_digit && has_special
}

/// Validate a registration: full name, then phone number, then password.
pub fn validate_registration(
    full_name: &str,
    phone_number: &str,
    password: &str,
) -> ValidationResult {
    let mut result = check_full_name(full_name);
    result.extend(check_phone_number(phone_number));
    result.extend(check_password(password));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn accepts_valid_registration() {
        let result = validate_registration("Some Full Name", "+62821232342", "SawitPro123$");
        assert!(result.is_valid(), "unexpected violations: {result:?}");
    }

    #[rstest]
    fn short_phone_reports_length_then_prefix() {
        let result = check_phone_number("123");
        assert_eq!(
            result.messages(),
            [messages::PHONE_NUMBER_LENGTH, messages::PHONE_NUMBER_PREFIX]
        );
    }

    #[rstest]
    #[case("+6281234567", true)]
    #[case("+628123456789", true)]
    #[case("+62812345", false)]
    #[case("+6281234567890", false)]
    fn phone_length_bounds_are_inclusive(#[case] phone: &str, #[case] valid: bool) {
        assert_eq!(check_phone_number(phone).is_valid(), valid);
    }

    #[rstest]
    fn phone_without_prefix_reports_only_prefix() {
        let result = check_phone_number("0821232342");
        assert_eq!(result.messages(), [messages::PHONE_NUMBER_PREFIX]);
    }

    #[rstest]
    #[case("abc", true)]
    #[case("ab", false)]
    #[case(&"x".repeat(60), true)]
    #[case(&"x".repeat(61), false)]
    #[case("Écé", true)]
    fn full_name_bounds_count_characters(#[case] name: &str, #[case] valid: bool) {
        assert_eq!(check_full_name(name).is_valid(), valid);
    }

    #[rstest]
    #[case("Aa1$aa", true)]
    #[case("Aa1$a", false)]
    #[case("aa1$aa", false)]
    #[case("Aaa$aa", false)]
    #[case("Aa1aaa", false)]
    #[case("Aa1 aa", true)]
    #[case("Abc½$de", false)]
    #[case("Abc²$de", false)]
    #[case("AbcⅫ$de", false)]
    #[case("abcⅫ$d1", false)]
    #[case("Ébc1$de", false)]
    fn password_conditions(#[case] password: &str, #[case] valid: bool) {
        let result = check_password(password);
        assert_eq!(result.is_valid(), valid);
        if !valid {
            assert_eq!(result.messages(), [messages::PASSWORD_POLICY]);
        }
    }

    #[rstest]
    fn password_upper_bound_is_inclusive() {
        let at_max = format!("A1$${}", "a".repeat(60));
        assert_eq!(at_max.chars().count(), 64);
        assert!(check_password(&at_max).is_valid());

        let over_max = format!("{at_max}a");
        assert!(!check_password(&over_max).is_valid());
    }

    #[rstest]
    fn registration_orders_violations_by_field() {
        let result = validate_registration("ab", "123", "weak");
        assert_eq!(
            result.into_messages(),
            vec![
                messages::FULL_NAME_LENGTH.to_owned(),
                messages::PHONE_NUMBER_LENGTH.to_owned(),
                messages::PHONE_NUMBER_PREFIX.to_owned(),
                messages::PASSWORD_POLICY.to_owned(),
            ]
        );
    }

    #[rstest]
    fn validation_is_idempotent() {
        let first = validate_registration("ab", "123", "weak");
        let second = validate_registration("ab", "123", "weak");
        assert_eq!(first, second);
    }
}
