use std::fmt;

/// Namespace tag for one-time codes. Email validation and password
/// reset share the store but never each other's codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    EmailValidate,
    PasswordReset,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::EmailValidate => "email_validate",
            CodePurpose::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
