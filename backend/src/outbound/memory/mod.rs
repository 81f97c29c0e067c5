//! In-memory adapter implementing every repository port.
//!
//! Backs database-less development runs and the HTTP integration tests. Each
//! table sits behind its own mutex; ids are assigned from per-table counters
//! starting at 1.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    FeedbackRepository, FeedbackRepositoryError, FeedbackRequestRepository,
    FeedbackRequestRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Feedback, FeedbackId, FeedbackRequest, FeedbackRequestId, FeedbackUpdate, NewFeedback,
    NewFeedbackRequest, NewUserAccount, Role, User, UserAccount, UserId, sort_newest_first,
};

struct Table<K, V> {
    next_id: i64,
    rows: BTreeMap<K, V>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<K, V> Table<K, V> {
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Mutex-guarded tables for users, feedback and feedback requests.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use feedback_backend::domain::ports::UserRepository;
/// use feedback_backend::outbound::memory::InMemoryStore;
///
/// let users: Arc<dyn UserRepository> = Arc::new(InMemoryStore::default());
/// ```
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Table<UserId, UserAccount>>,
    feedbacks: Mutex<Table<FeedbackId, Feedback>>,
    requests: Mutex<Table<FeedbackRequestId, FeedbackRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Rows are replaced whole, so a poisoned table is still consistent.
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, account: NewUserAccount) -> Result<User, UserRepositoryError> {
        let mut table = lock(&self.users);
        let taken = table
            .rows
            .values()
            .any(|existing| existing.user().email() == &account.email);
        if taken {
            return Err(UserRepositoryError::duplicate_email(account.email.to_string()));
        }
        let id = UserId::new(table.allocate());
        let user = User::new(id, account.email, account.role);
        table
            .rows
            .insert(id, UserAccount::new(user.clone(), account.password_hash));
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(lock(&self.users).rows.get(&id).map(|account| account.user().clone()))
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        Ok(lock(&self.users)
            .rows
            .values()
            .find(|account| account.user().email().as_ref() == email)
            .cloned())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserRepositoryError> {
        Ok(lock(&self.users)
            .rows
            .values()
            .filter(|account| account.user().role() == role)
            .map(|account| account.user().clone())
            .collect())
    }
}

impl InMemoryStore {
    fn feedbacks_matching(&self, keep: impl Fn(&Feedback) -> bool) -> Vec<Feedback> {
        let mut matching: Vec<Feedback> = lock(&self.feedbacks)
            .rows
            .values()
            .filter(|feedback| keep(feedback))
            .cloned()
            .collect();
        sort_newest_first(&mut matching);
        matching
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn insert(&self, feedback: NewFeedback) -> Result<Feedback, FeedbackRepositoryError> {
        let mut table = lock(&self.feedbacks);
        let id = FeedbackId::new(table.allocate());
        let stored = Feedback::from_new(id, feedback);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: FeedbackId,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        Ok(lock(&self.feedbacks).rows.get(&id).cloned())
    }

    async fn list_for_employee(
        &self,
        employee: UserId,
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        Ok(self.feedbacks_matching(|feedback| feedback.is_addressed_to(employee)))
    }

    async fn list_for_manager(
        &self,
        manager: UserId,
    ) -> Result<Vec<Feedback>, FeedbackRepositoryError> {
        Ok(self.feedbacks_matching(|feedback| feedback.is_given_by(manager)))
    }

    async fn update(
        &self,
        id: FeedbackId,
        update: &FeedbackUpdate,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut table = lock(&self.feedbacks);
        Ok(table.rows.get_mut(&id).map(|feedback| {
            feedback.apply(update);
            feedback.clone()
        }))
    }

    async fn mark_acknowledged(
        &self,
        id: FeedbackId,
    ) -> Result<Option<Feedback>, FeedbackRepositoryError> {
        let mut table = lock(&self.feedbacks);
        Ok(table.rows.get_mut(&id).map(|feedback| {
            feedback.acknowledge();
            feedback.clone()
        }))
    }
}

#[async_trait]
impl FeedbackRequestRepository for InMemoryStore {
    async fn insert(
        &self,
        request: NewFeedbackRequest,
    ) -> Result<FeedbackRequest, FeedbackRequestRepositoryError> {
        let mut table = lock(&self.requests);
        let id = FeedbackRequestId::new(table.allocate());
        let stored = FeedbackRequest::from_new(id, request);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_for_manager(
        &self,
        manager: UserId,
    ) -> Result<Vec<FeedbackRequest>, FeedbackRequestRepositoryError> {
        let mut matching: Vec<FeedbackRequest> = lock(&self.requests)
            .rows
            .values()
            .filter(|request| request.manager_id() == manager)
            .cloned()
            .collect();
        matching.sort_by_key(|request| (request.created_at(), request.id()));
        Ok(matching)
    }

    async fn delete_for_pair(
        &self,
        manager: UserId,
        employee: UserId,
    ) -> Result<usize, FeedbackRequestRepositoryError> {
        let mut table = lock(&self.requests);
        let before = table.rows.len();
        table
            .rows
            .retain(|_, request| !request.is_fulfilled_by(manager, employee));
        Ok(before - table.rows.len())
    }
}
