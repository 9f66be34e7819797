use crate::contact_repo::{Contact, ContactRepo, ContactRepoError, NewContact};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;

pub struct MemContactRepo {
    contacts: RwLock<Vec<Contact>>,
}

impl MemContactRepo {
    pub fn new() -> MemContactRepo {
        MemContactRepo {
            contacts: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ContactRepo for MemContactRepo {
    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact, ContactRepoError> {
        let mut write_guard = self
            .contacts
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))?;

        let id = write_guard.len() as i32 + 1;
        let contact = new_contact.to_contact(id, Utc::now());
        write_guard.push(contact.clone());

        Ok(contact)
    }
}
