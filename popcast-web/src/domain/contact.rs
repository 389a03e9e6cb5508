use validator::ValidateEmail;

use super::error::{FORM_FIELD, FormErrors};

pub(crate) const ALL_FIELDS_REQUIRED: &str = "جميع الحقول مطلوبة";
pub(crate) const INVALID_EMAIL: &str = "البريد الإلكتروني غير صالح";

/// A message sent through the public contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ContactMessage {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) subject: String,
    pub(crate) message: String,
}

impl ContactMessage {
    pub(crate) fn validate(self) -> Result<Self, FormErrors> {
        let message = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        if [&message.name, &message.email, &message.subject, &message.message]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(FormErrors::single(FORM_FIELD, ALL_FIELDS_REQUIRED));
        }
        if !message.email.validate_email() {
            return Err(FormErrors::single("email", INVALID_EMAIL));
        }
        Ok(message)
    }
}
