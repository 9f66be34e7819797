pub mod handlers;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Trims every field. Returns `None` if any of them is blank.
    pub fn validate(self) -> Option<ContactForm> {
        let form = ContactForm {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            message: self.message.trim().to_owned(),
        };
        if form.name.is_empty() || form.email.is_empty() || form.message.is_empty() {
            return None;
        }
        Some(form)
    }
}
