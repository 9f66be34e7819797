use crate::contact_repo::{Contact, ContactRepo, ContactRepoError, NewContact};
use crate::sqlx_repo::SQLxRepo;
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;

#[derive(sqlx::FromRow)]
struct ContactEntry {
    id: i32,
    name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl From<ContactEntry> for Contact {
    fn from(c: ContactEntry) -> Self {
        Contact {
            id: c.id,
            name: c.name,
            email: c.email,
            message: c.message,
            created_at: c.created_at,
        }
    }
}

#[async_trait]
impl ContactRepo for SQLxRepo {
    async fn create_contact(&self, new_contact: NewContact) -> Result<Contact, ContactRepoError> {
        let entry: ContactEntry = query_as(
            "INSERT INTO contacts(name, email, message) VALUES($1, $2, $3) RETURNING *",
        )
        .bind(&new_contact.name)
        .bind(&new_contact.email)
        .bind(&new_contact.message)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert contact message")?;

        Ok(entry.into())
    }
}
