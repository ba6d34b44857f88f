//! Items embedded in a shop list.

use crate::repositories::stored_id;
use crate::resolver::{
    resolve_item, resolve_list, ItemNode, ListNode, ITEM_ENTITY, SHOP_LIST_ENTITY, USER_ENTITY,
};
use crate::store::DocumentStore;
use crate::validation::{validate_item_patch, validate_new_item};
use crate::{RecordError, RecordResult};
use api_shared::{DeleteItemRes, ItemReq, ShopListItem, User};
use std::sync::Arc;

#[derive(Clone)]
pub struct ItemService {
    users: Arc<dyn DocumentStore<User>>,
}

impl ItemService {
    pub fn new(users: Arc<dyn DocumentStore<User>>) -> Self {
        Self { users }
    }

    pub async fn list(&self, user_id: &str, list_id: &str) -> RecordResult<Vec<ShopListItem>> {
        Ok(resolve_list(self.users.as_ref(), user_id, list_id)
            .await?
            .into_list()
            .items)
    }

    pub async fn get(
        &self,
        user_id: &str,
        list_id: &str,
        item_id: &str,
    ) -> RecordResult<ShopListItem> {
        Ok(resolve_item(self.users.as_ref(), user_id, list_id, item_id)
            .await?
            .into_item())
    }

    /// Appends an item to the end of the shop list.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the name is missing or the price is missing, non-numeric or negative.
    /// - `NotFound` if the user or the shop list does not exist.
    pub async fn create(
        &self,
        user_id: &str,
        list_id: &str,
        req: &ItemReq,
    ) -> RecordResult<ShopListItem> {
        let input = validate_new_item(req)?;
        let mut node = resolve_list(self.users.as_ref(), user_id, list_id).await?;
        node.list_mut().items.push(ShopListItem {
            id: None,
            name: input.name.into_inner(),
            price: input.price.value(),
        });

        let saved = self.users.save(node.into_user()).await?;
        ListNode::locate(saved, list_id)?
            .into_list()
            .items
            .pop()
            .ok_or_else(|| {
                RecordError::Inconsistent(format!(
                    "saved shop list '{}' has no items after append",
                    list_id
                ))
            })
    }

    /// Applies a partial update: only the supplied fields change.
    pub async fn update(
        &self,
        user_id: &str,
        list_id: &str,
        item_id: &str,
        req: &ItemReq,
    ) -> RecordResult<ShopListItem> {
        let patch = validate_item_patch(req)?;
        let mut node = resolve_item(self.users.as_ref(), user_id, list_id, item_id).await?;

        let item = node.item_mut();
        if let Some(name) = patch.name {
            item.name = name.into_inner();
        }
        if let Some(price) = patch.price {
            item.price = price.value();
        }

        let saved = self.users.save(node.into_user()).await?;
        Ok(ItemNode::locate(saved, list_id, item_id)?.into_item())
    }

    pub async fn delete(
        &self,
        user_id: &str,
        list_id: &str,
        item_id: &str,
    ) -> RecordResult<DeleteItemRes> {
        let node = resolve_item(self.users.as_ref(), user_id, list_id, item_id).await?;
        let (user, removed) = node.remove();
        let saved = self.users.save(user).await?;
        let list = ListNode::locate(saved, list_id)?;

        Ok(DeleteItemRes {
            message: "Item deleted successfully".into(),
            user_id: stored_id(list.user().id.clone(), USER_ENTITY)?,
            list_id: stored_id(list.list().id.clone(), SHOP_LIST_ENTITY)?,
            item_id: stored_id(removed.id, ITEM_ENTITY)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::shop_lists::ShopListService;
    use crate::repositories::users::UserService;
    use crate::store::MemoryStore;
    use crate::ErrorKind;
    use api_shared::{ScalarInput, ShopListReq, UserReq};

    struct Fixture {
        items: ItemService,
        user_id: String,
        list_id: String,
    }

    async fn fixture() -> Fixture {
        let store: Arc<dyn DocumentStore<User>> = Arc::new(MemoryStore::<User>::new());
        let user = UserService::new(store.clone())
            .create(&UserReq {
                username: Some("alice".into()),
            })
            .await
            .expect("create user");
        let user_id = user.id.expect("user id").to_string();
        let list = ShopListService::new(store.clone())
            .create(
                &user_id,
                &ShopListReq {
                    topic: Some("Groceries".into()),
                    items: None,
                },
            )
            .await
            .expect("create list");

        Fixture {
            items: ItemService::new(store),
            user_id,
            list_id: list.id.expect("list id").to_string(),
        }
    }

    fn item(name: Option<&str>, price: Option<f64>) -> ItemReq {
        ItemReq {
            name: name.map(String::from),
            price: price.map(ScalarInput::Number),
        }
    }

    #[tokio::test]
    async fn test_create_appends_and_returns_new_item() {
        let f = fixture().await;
        let milk = f
            .items
            .create(&f.user_id, &f.list_id, &item(Some("Milk"), Some(3.99)))
            .await
            .expect("create milk");
        let bread = f
            .items
            .create(&f.user_id, &f.list_id, &item(Some("Bread"), Some(2.5)))
            .await
            .expect("create bread");

        assert_eq!(bread.name, "Bread");
        assert!(bread.id.is_some());
        assert_ne!(milk.id, bread.id);

        let listed = f.items.list(&f.user_id, &f.list_id).await.expect("list");
        assert_eq!(listed, vec![milk, bread]);
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price_without_touching_the_list() {
        let f = fixture().await;
        let err = f
            .items
            .create(&f.user_id, &f.list_id, &item(Some("Milk"), Some(-1.0)))
            .await
            .expect_err("negative price");
        assert_eq!(err.kind(), ErrorKind::BadRequest);

        let listed = f.items.list(&f.user_id, &f.list_id).await.expect("list");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_changes_only_supplied_fields() {
        let f = fixture().await;
        let milk = f
            .items
            .create(&f.user_id, &f.list_id, &item(Some("Milk"), Some(3.99)))
            .await
            .expect("create");
        let item_id = milk.id.clone().expect("id").to_string();

        let repriced = f
            .items
            .update(&f.user_id, &f.list_id, &item_id, &item(None, Some(4.49)))
            .await
            .expect("update price");
        assert_eq!(repriced.name, "Milk");
        assert_eq!(repriced.price, 4.49);
        assert_eq!(repriced.id, milk.id);

        let renamed = f
            .items
            .update(&f.user_id, &f.list_id, &item_id, &item(Some("Oat milk"), None))
            .await
            .expect("update name");
        assert_eq!(renamed.name, "Oat milk");
        assert_eq!(renamed.price, 4.49);

        let err = f
            .items
            .update(&f.user_id, &f.list_id, &item_id, &item(None, None))
            .await
            .expect_err("empty patch");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let f = fixture().await;
        let milk = f
            .items
            .create(&f.user_id, &f.list_id, &item(Some("Milk"), Some(3.99)))
            .await
            .expect("create");
        let item_id = milk.id.expect("id").to_string();

        let res = f
            .items
            .delete(&f.user_id, &f.list_id, &item_id)
            .await
            .expect("delete");
        assert_eq!(res.message, "Item deleted successfully");
        assert_eq!(res.item_id.to_string(), item_id);
        assert_eq!(res.list_id.to_string(), f.list_id);
        assert_eq!(res.user_id.to_string(), f.user_id);

        let err = f
            .items
            .get(&f.user_id, &f.list_id, &item_id)
            .await
            .expect_err("deleted");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().starts_with("Item with id"));
    }

    #[tokio::test]
    async fn test_unknown_list_is_not_found() {
        let f = fixture().await;
        let err = f
            .items
            .list(&f.user_id, "not-a-list")
            .await
            .expect_err("unknown list");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().starts_with("Shop list with id"));
    }
}
