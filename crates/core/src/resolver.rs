//! Nested path resolution.
//!
//! A shop list or item is addressed by a chain of identities
//! (`user_id[, list_id[, item_id]]`). Resolution loads the owning [`User`] and walks its
//! embedded sequences in insertion order, failing with `NotFound` at the first level that does
//! not match. Malformed identities simply never match, so they surface as `NotFound` too.
//!
//! The resolved nodes keep the whole user because embedded state is only persisted by saving
//! the owner again.

use crate::store::DocumentStore;
use crate::{RecordError, RecordResult};
use api_shared::{ShopList, ShopListItem, User};

pub const USER_ENTITY: &str = "User";
pub const SHOP_LIST_ENTITY: &str = "Shop list";
pub const ITEM_ENTITY: &str = "Item";

/// Index of the shop list with `list_id` inside `user`.
pub fn position_of_list(user: &User, list_id: &str) -> RecordResult<usize> {
    user.shop_lists
        .iter()
        .position(|l| l.id.as_ref().is_some_and(|id| *id == *list_id))
        .ok_or_else(|| RecordError::not_found(SHOP_LIST_ENTITY, list_id))
}

/// Index of the item with `item_id` inside `list`.
pub fn position_of_item(list: &ShopList, item_id: &str) -> RecordResult<usize> {
    list.items
        .iter()
        .position(|i| i.id.as_ref().is_some_and(|id| *id == *item_id))
        .ok_or_else(|| RecordError::not_found(ITEM_ENTITY, item_id))
}

/// A resolved shop list together with its owner.
#[derive(Debug, Clone)]
pub struct ListNode {
    user: User,
    list: usize,
}

impl ListNode {
    /// Locates `list_id` in an already-loaded user.
    pub fn locate(user: User, list_id: &str) -> RecordResult<Self> {
        let list = position_of_list(&user, list_id)?;
        Ok(Self { user, list })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn list(&self) -> &ShopList {
        &self.user.shop_lists[self.list]
    }

    pub fn list_mut(&mut self) -> &mut ShopList {
        &mut self.user.shop_lists[self.list]
    }

    pub fn into_list(mut self) -> ShopList {
        self.user.shop_lists.swap_remove(self.list)
    }

    /// Returns the owner for saving.
    pub fn into_user(self) -> User {
        self.user
    }

    /// Detaches the shop list from its owner, returning both.
    pub fn remove(mut self) -> (User, ShopList) {
        let list = self.user.shop_lists.remove(self.list);
        (self.user, list)
    }
}

/// A resolved item together with its shop list and owner.
#[derive(Debug, Clone)]
pub struct ItemNode {
    user: User,
    list: usize,
    item: usize,
}

impl ItemNode {
    pub fn locate(user: User, list_id: &str, item_id: &str) -> RecordResult<Self> {
        let list = position_of_list(&user, list_id)?;
        let item = position_of_item(&user.shop_lists[list], item_id)?;
        Ok(Self { user, list, item })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn item(&self) -> &ShopListItem {
        &self.user.shop_lists[self.list].items[self.item]
    }

    pub fn item_mut(&mut self) -> &mut ShopListItem {
        &mut self.user.shop_lists[self.list].items[self.item]
    }

    pub fn into_item(mut self) -> ShopListItem {
        self.user.shop_lists[self.list].items.swap_remove(self.item)
    }

    pub fn into_user(self) -> User {
        self.user
    }

    /// Detaches the item from its shop list, returning the owner and the item.
    pub fn remove(mut self) -> (User, ShopListItem) {
        let item = self.user.shop_lists[self.list].items.remove(self.item);
        (self.user, item)
    }
}

/// Loads the user addressed by `user_id`.
pub async fn resolve_user(users: &dyn DocumentStore<User>, user_id: &str) -> RecordResult<User> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| RecordError::not_found(USER_ENTITY, user_id))
}

pub async fn resolve_list(
    users: &dyn DocumentStore<User>,
    user_id: &str,
    list_id: &str,
) -> RecordResult<ListNode> {
    let user = resolve_user(users, user_id).await?;
    ListNode::locate(user, list_id)
}

pub async fn resolve_item(
    users: &dyn DocumentStore<User>,
    user_id: &str,
    list_id: &str,
    item_id: &str,
) -> RecordResult<ItemNode> {
    let user = resolve_user(users, user_id).await?;
    ItemNode::locate(user, list_id, item_id)
}
