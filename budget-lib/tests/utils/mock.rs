use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use budget_repo::contact_repo::{Contact, ContactRepo, ContactRepoError, NewContact};

/// Contact repository that keeps every submitted message for inspection.
pub struct RecordingContactRepo {
    contacts: Mutex<Vec<Contact>>,
}

impl RecordingContactRepo {
    pub fn new() -> RecordingContactRepo {
        RecordingContactRepo {
            contacts: Mutex::new(Vec::new()),
        }
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactRepo for RecordingContactRepo {
    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact, ContactRepoError> {
        let mut contacts = self.contacts.lock().unwrap();
        let contact = new_contact.to_contact(contacts.len() as i32 + 1, Utc::now());
        contacts.push(contact.clone());
        Ok(contact)
    }
}
