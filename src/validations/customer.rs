use super::name_email::{UserEmail, UserName};
use unicode_segmentation::UnicodeSegmentation;

const MISSING_FIELDS: &str = "Missing required fields";

/// Free-text field that must be present, non-blank and bounded.
#[derive(Debug)]
pub struct RequiredText(String);

impl RequiredText {
    pub fn parse(field: &str, s: String) -> std::result::Result<RequiredText, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MISSING_FIELDS.to_string());
        }
        if trimmed.graphemes(true).count() > 256 {
            return Err(format!("{} is too long.", field));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Registration input after every field has been checked.
#[derive(Debug)]
pub struct NewCustomer {
    pub fullname: RequiredText,
    pub address: RequiredText,
    pub phone: RequiredText,
    pub email: UserEmail,
    pub username: UserName,
    pub password: String,
}

impl NewCustomer {
    /// Absent or blank fields are reported before any format check runs.
    pub fn parse(
        fullname: Option<String>,
        address: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> std::result::Result<NewCustomer, String> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let (
            Some(fullname),
            Some(address),
            Some(phone),
            Some(email),
            Some(username),
            Some(password),
        ) = (
            present(fullname),
            present(address),
            present(phone),
            present(email),
            present(username),
            password.filter(|p| !p.is_empty()),
        )
        else {
            return Err(MISSING_FIELDS.to_string());
        };

        Ok(Self {
            fullname: RequiredText::parse("fullname", fullname)?,
            address: RequiredText::parse("address", address)?,
            phone: RequiredText::parse("phone", phone)?,
            email: UserEmail::parse(email.trim().to_string())?,
            username: UserName::parse(username)?,
            password,
        })
    }
}
