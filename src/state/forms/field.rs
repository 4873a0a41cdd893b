//! Form field identities

/// One of the four signup inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignupField {
    FullName,
    Email,
    Username,
    Password,
}

impl SignupField {
    /// All fields in display order
    pub const ALL: [SignupField; 4] = [
        SignupField::FullName,
        SignupField::Email,
        SignupField::Username,
        SignupField::Password,
    ];

    /// Field at a focus index, `None` past the last field
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this field in display order
    pub fn index(self) -> usize {
        match self {
            SignupField::FullName => 0,
            SignupField::Email => 1,
            SignupField::Username => 2,
            SignupField::Password => 3,
        }
    }

    /// Key used in the request body
    pub fn wire_name(self) -> &'static str {
        match self {
            SignupField::FullName => "fullName",
            SignupField::Email => "email",
            SignupField::Username => "username",
            SignupField::Password => "password",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignupField::FullName => "Full Name",
            SignupField::Email => "Email Address",
            SignupField::Username => "Username",
            SignupField::Password => "Password",
        }
    }

    /// Hint shown while the field is empty
    pub fn placeholder(self) -> &'static str {
        match self {
            SignupField::FullName => "Enter your full name",
            SignupField::Email => "Enter your email address",
            SignupField::Username => "Must be Unique",
            SignupField::Password => "Min 8 characters",
        }
    }

    /// Whether the value is masked when rendered
    pub fn is_secret(self) -> bool {
        matches!(self, SignupField::Password)
    }

    /// Get the display value for rendering
    pub fn display_value(self, value: &str) -> String {
        if self.is_secret() {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }
}
