use crate::user_repo::UserRepoError::{EmailTaken, UserNotFound, UsernameTaken};
use crate::user_repo::{NewUser, User, UserId, UserRepo, UserRepoError};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    users: HashMap<UserId, User>,
    next_id: UserId,
}

pub struct MemUserRepo {
    state: RwLock<State>,
}

impl MemUserRepo {
    pub fn new() -> MemUserRepo {
        let state = State {
            users: HashMap::new(),
            next_id: 1,
        };
        MemUserRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn find_user<P>(&self, predicate: P) -> Result<Option<User>, anyhow::Error>
    where
        P: Fn(&User) -> bool,
    {
        let read_guard = self.read_lock()?;
        Ok(read_guard.users.values().find(|u| predicate(u)).cloned())
    }
}

#[async_trait]
impl UserRepo for MemUserRepo {
    async fn get_user_by_username(&self, username: &str) -> Result<User, UserRepoError> {
        self.find_user(|u| u.username == username)?
            .ok_or_else(|| UserNotFound(username.to_owned()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepoError> {
        self.find_user(|u| u.email == email)?
            .ok_or_else(|| UserNotFound(email.to_owned()))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard
            .users
            .values()
            .any(|u| u.username == new_user.username)
        {
            return Err(UsernameTaken(new_user.username));
        }
        if write_guard.users.values().any(|u| u.email == new_user.email) {
            return Err(EmailTaken(new_user.email));
        }

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let user = new_user.to_user(id, Utc::now());
        write_guard.users.insert(id, user.clone());

        Ok(user)
    }
}
