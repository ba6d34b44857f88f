//! User aggregate management.
//!
//! Username uniqueness is an application-level check-then-insert: the store is queried for an
//! existing user with the same name before the new document is saved. Two concurrent creations
//! of the same username can both pass the check.

use crate::resolver::resolve_user;
use crate::store::{DocumentStore, Filter};
use crate::validation::validate_user;
use crate::{RecordError, RecordResult};
use api_shared::{DeleteManyRes, DeleteUserRes, User, UserReq};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn DocumentStore<User>>,
}

impl UserService {
    pub fn new(users: Arc<dyn DocumentStore<User>>) -> Self {
        Self { users }
    }

    pub async fn list(&self) -> RecordResult<Vec<User>> {
        self.users.find(&Filter::all()).await
    }

    pub async fn get(&self, user_id: &str) -> RecordResult<User> {
        resolve_user(self.users.as_ref(), user_id).await
    }

    /// Returns the first user, other than `except`, already holding `username`.
    async fn find_by_username(
        &self,
        username: &str,
        except: Option<&User>,
    ) -> RecordResult<Option<User>> {
        let wanted = username.to_owned();
        let except_id = except.and_then(|u| u.id.clone());
        self.users
            .find_one(&Filter::matching(move |u: &User| {
                u.username == wanted && u.id != except_id
            }))
            .await
    }

    /// Creates a user with no shop lists.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `username` is missing or blank.
    /// - `Conflict` if another user already has the username.
    pub async fn create(&self, req: &UserReq) -> RecordResult<User> {
        let username = validate_user(req)?;

        if self.find_by_username(username.as_str(), None).await?.is_some() {
            return Err(RecordError::Conflict(format!(
                "User with username '{}' already exists",
                username
            )));
        }

        let saved = self
            .users
            .save(User {
                id: None,
                username: username.into_inner(),
                shop_lists: Vec::new(),
            })
            .await?;
        tracing::info!("created user {:?} ({})", saved.id, saved.username);
        Ok(saved)
    }

    /// Replaces the username of an existing user.
    pub async fn update(&self, user_id: &str, req: &UserReq) -> RecordResult<User> {
        let username = validate_user(req)?;
        let mut user = self.get(user_id).await?;

        if self
            .find_by_username(username.as_str(), Some(&user))
            .await?
            .is_some()
        {
            return Err(RecordError::Conflict(format!(
                "User with username '{}' already exists",
                username
            )));
        }

        user.username = username.into_inner();
        self.users.save(user).await
    }

    pub async fn delete(&self, user_id: &str) -> RecordResult<DeleteUserRes> {
        let user = self
            .users
            .delete_by_id(user_id)
            .await?
            .ok_or_else(|| RecordError::not_found(crate::resolver::USER_ENTITY, user_id))?;

        Ok(DeleteUserRes {
            message: format!("User '{}' deleted successfully", user.username),
            deleted_user: user,
        })
    }

    pub async fn delete_all(&self) -> RecordResult<DeleteManyRes> {
        let deleted_count = self.users.delete_all(&Filter::all()).await?;
        tracing::info!("deleted all users ({})", deleted_count);
        Ok(DeleteManyRes {
            message: "Successfully deleted all users".into(),
            deleted_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::ErrorKind;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryStore::<User>::new()))
    }

    fn req(name: &str) -> UserReq {
        UserReq {
            username: Some(name.into()),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let svc = service();
        let alice = svc.create(&req("alice")).await.expect("create alice");
        let bob = svc.create(&req("bob")).await.expect("create bob");

        assert!(alice.id.is_some());
        assert_ne!(alice.id, bob.id);
        assert!(alice.shop_lists.is_empty());

        let fetched = svc
            .get(&alice.id.clone().expect("id").to_string())
            .await
            .expect("get alice");
        assert_eq!(fetched, alice);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let svc = service();
        svc.create(&req("alice")).await.expect("first create");

        let err = svc.create(&req("alice")).await.expect_err("duplicate");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "User with username 'alice' already exists");
        assert_eq!(svc.list().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn test_missing_username_is_bad_request() {
        let svc = service();
        let err = svc.create(&UserReq::default()).await.expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_update_renames_and_checks_other_users() {
        let svc = service();
        let alice = svc.create(&req("alice")).await.expect("create alice");
        svc.create(&req("bob")).await.expect("create bob");
        let id = alice.id.clone().expect("id").to_string();

        let same = svc.update(&id, &req("alice")).await.expect("rename to self");
        assert_eq!(same.username, "alice");

        let err = svc.update(&id, &req("bob")).await.expect_err("taken");
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let renamed = svc.update(&id, &req("alicia")).await.expect("rename");
        assert_eq!(renamed.username, "alicia");
        assert_eq!(renamed.id, alice.id);
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let svc = service();
        let err = svc
            .update("does-not-exist", &UserReq::default())
            .await
            .expect_err("invalid body");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_delete_and_delete_all() {
        let svc = service();
        let alice = svc.create(&req("alice")).await.expect("create alice");
        svc.create(&req("bob")).await.expect("create bob");
        svc.create(&req("carol")).await.expect("create carol");
        let id = alice.id.clone().expect("id").to_string();

        let res = svc.delete(&id).await.expect("delete alice");
        assert_eq!(res.message, "User 'alice' deleted successfully");
        assert_eq!(res.deleted_user.username, "alice");

        let err = svc.delete(&id).await.expect_err("already deleted");
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let res = svc.delete_all().await.expect("delete all");
        assert_eq!(res.deleted_count, 2);
        assert!(svc.list().await.expect("list").is_empty());
    }
}
