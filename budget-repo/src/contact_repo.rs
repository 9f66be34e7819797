use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait ContactRepo: Sync + Send {
    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact, ContactRepoError>;
}

#[derive(Error, Debug)]
pub enum ContactRepoError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl NewContact {
    pub fn new(name: String, email: String, message: String) -> NewContact {
        NewContact {
            name,
            email,
            message,
        }
    }

    pub fn to_contact(self, id: i32, created_at: DateTime<Utc>) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            message: self.message,
            created_at,
        }
    }
}
