//! In-process user repository for development and tests.
//!
//! Records live in a mutex-guarded map and vanish with the process. Phone
//! numbers are unique, mirroring the unique index a durable store would
//! carry, and identifiers are assigned sequentially from 1.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, ProfileUpdate, User, UserId};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    phone_index: HashMap<String, UserId>,
    login_counts: HashMap<UserId, u64>,
    last_id: i64,
}

/// Volatile [`UserRepository`] implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    tables: Mutex<Tables>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful logins recorded for `id`.
    pub fn login_count(&self, id: UserId) -> Result<u64, UserPersistenceError> {
        Ok(self.lock()?.login_counts.get(&id).copied().unwrap_or(0))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, UserPersistenceError> {
        self.tables
            .lock()
            .map_err(|_| UserPersistenceError::connection("user table lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<User, UserPersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .phone_index
            .get(phone_number)
            .and_then(|id| tables.users.get(id))
            .cloned()
            .unwrap_or_default())
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserPersistenceError> {
        Ok(self.lock()?.users.get(&id).cloned().unwrap_or_default())
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, UserPersistenceError> {
        let mut tables = self.lock()?;
        if tables.phone_index.contains_key(&user.phone_number) {
            return Err(UserPersistenceError::query(format!(
                "phone number {} violates unique constraint",
                user.phone_number
            )));
        }

        tables.last_id += 1;
        let id = UserId::new(tables.last_id);
        tables.phone_index.insert(user.phone_number.clone(), id);
        tables.users.insert(
            id,
            User {
                id,
                phone_number: user.phone_number,
                password_hash: user.password_hash,
                full_name: user.full_name,
            },
        );
        Ok(id)
    }

    async fn update(&self, update: ProfileUpdate) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock()?;
        let Tables {
            users, phone_index, ..
        } = &mut *tables;

        let user = users
            .get_mut(&update.id)
            .ok_or_else(|| UserPersistenceError::query(format!("user {} not found", update.id)))?;

        if let Some(phone_number) = update.phone_number {
            match phone_index.get(&phone_number) {
                Some(owner) if *owner != update.id => {
                    return Err(UserPersistenceError::query(format!(
                        "phone number {phone_number} violates unique constraint"
                    )));
                }
                _ => {}
            }
            phone_index.remove(&user.phone_number);
            phone_index.insert(phone_number.clone(), update.id);
            user.phone_number = phone_number;
        }

        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        Ok(())
    }

    async fn record_login(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&id) {
            return Err(UserPersistenceError::query(format!("user {id} not found")));
        }
        *tables.login_counts.entry(id).or_insert(0) += 1;
        Ok(())
    }
}
