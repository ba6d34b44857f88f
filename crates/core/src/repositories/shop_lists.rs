//! Shop lists embedded in a user.
//!
//! Every mutation loads the owning user, changes its `shop_lists` sequence, saves the whole
//! user and then reads the affected list back out of the saved document so the response
//! carries store-assigned identities.

use crate::repositories::stored_id;
use crate::resolver::{resolve_list, resolve_user, ListNode, SHOP_LIST_ENTITY, USER_ENTITY};
use crate::store::{DocumentStore, Filter};
use crate::validation::{
    contains_ignore_case, parse_search_params, validate_new_shop_list, validate_topic,
};
use crate::{RecordError, RecordResult};
use api_shared::{
    DeleteShopListRes, ShopList, ShopListItem, ShopListReq, ShopListSearchParams, TopicSearchRes,
    TopicSearchRow, User,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ShopListService {
    users: Arc<dyn DocumentStore<User>>,
}

impl ShopListService {
    pub fn new(users: Arc<dyn DocumentStore<User>>) -> Self {
        Self { users }
    }

    pub async fn list(&self, user_id: &str) -> RecordResult<Vec<ShopList>> {
        Ok(resolve_user(self.users.as_ref(), user_id).await?.shop_lists)
    }

    pub async fn get(&self, user_id: &str, list_id: &str) -> RecordResult<ShopList> {
        Ok(resolve_list(self.users.as_ref(), user_id, list_id)
            .await?
            .into_list())
    }

    /// Appends a new shop list (optionally with initial items) to the user.
    pub async fn create(&self, user_id: &str, req: &ShopListReq) -> RecordResult<ShopList> {
        let input = validate_new_shop_list(req)?;
        let mut user = resolve_user(self.users.as_ref(), user_id).await?;

        user.shop_lists.push(ShopList {
            id: None,
            topic: input.topic.into_inner(),
            items: input
                .items
                .into_iter()
                .map(|item| ShopListItem {
                    id: None,
                    name: item.name.into_inner(),
                    price: item.price.value(),
                })
                .collect(),
        });

        let saved = self.users.save(user).await?;
        saved.shop_lists.last().cloned().ok_or_else(|| {
            RecordError::Inconsistent(format!(
                "saved user '{}' has no shop lists after append",
                user_id
            ))
        })
    }

    /// Replaces the topic of an existing shop list.
    pub async fn update(
        &self,
        user_id: &str,
        list_id: &str,
        req: &ShopListReq,
    ) -> RecordResult<ShopList> {
        let topic = validate_topic(req)?;
        let mut node = resolve_list(self.users.as_ref(), user_id, list_id).await?;
        node.list_mut().topic = topic.into_inner();

        let saved = self.users.save(node.into_user()).await?;
        Ok(ListNode::locate(saved, list_id)?.into_list())
    }

    pub async fn delete(&self, user_id: &str, list_id: &str) -> RecordResult<DeleteShopListRes> {
        let node = resolve_list(self.users.as_ref(), user_id, list_id).await?;
        let (user, removed) = node.remove();
        let saved = self.users.save(user).await?;

        Ok(DeleteShopListRes {
            message: "Shop list deleted successfully".into(),
            user_id: stored_id(saved.id, USER_ENTITY)?,
            list_id: stored_id(removed.id, SHOP_LIST_ENTITY)?,
        })
    }

    /// Filters one user's shop lists by topic substring and item-count bounds.
    pub async fn search(
        &self,
        user_id: &str,
        params: &ShopListSearchParams,
    ) -> RecordResult<Vec<ShopList>> {
        let criteria = parse_search_params(params);
        let user = resolve_user(self.users.as_ref(), user_id).await?;

        Ok(user
            .shop_lists
            .into_iter()
            .filter(|list| criteria.matches(list))
            .collect())
    }

    /// Finds every shop list, across all users, whose topic contains `topic`
    /// (case-insensitive).
    pub async fn search_by_topic(&self, topic: &str) -> RecordResult<TopicSearchRes> {
        let needle = topic.to_owned();
        let users = self
            .users
            .find(&Filter::matching(move |u: &User| {
                u.shop_lists
                    .iter()
                    .any(|l| contains_ignore_case(&l.topic, &needle))
            }))
            .await?;

        let shop_lists = topic_rows(&users, topic)?;
        Ok(TopicSearchRes {
            message: "Shop lists filtered by topic".into(),
            topic: topic.to_owned(),
            count: shop_lists.len(),
            shop_lists,
        })
    }
}

fn topic_rows(users: &[User], topic: &str) -> RecordResult<Vec<TopicSearchRow>> {
    let mut rows = Vec::new();
    for user in users {
        let user_id = stored_id(user.id.clone(), USER_ENTITY)?;
        for list in user
            .shop_lists
            .iter()
            .filter(|list| contains_ignore_case(&list.topic, topic))
        {
            rows.push(TopicSearchRow {
                user_id: user_id.clone(),
                username: user.username.clone(),
                shop_list_id: stored_id(list.id.clone(), SHOP_LIST_ENTITY)?,
                topic: list.topic.clone(),
                item_count: list.item_count(),
            });
        }
    }
    Ok(rows)
}
