use api_shared::{Appointment, ClinicalData, Patient, User};
use burrow_uuid::RecordId;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A top-level document that can live in a [`DocumentStore`](super::DocumentStore).
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name; also the file store's directory name.
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&RecordId>;

    /// Gives this document, and every embedded sub-document without an identity, a fresh
    /// [`RecordId`]. Returns the document's own id.
    fn assign_ids(&mut self) -> RecordId;
}

impl Document for User {
    const COLLECTION: &'static str = crate::constants::USERS_COLLECTION;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn assign_ids(&mut self) -> RecordId {
        for list in &mut self.shop_lists {
            list.id.get_or_insert_with(RecordId::new);
            for item in &mut list.items {
                item.id.get_or_insert_with(RecordId::new);
            }
        }
        self.id.get_or_insert_with(RecordId::new).clone()
    }
}

impl Document for Patient {
    const COLLECTION: &'static str = crate::constants::PATIENTS_COLLECTION;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn assign_ids(&mut self) -> RecordId {
        self.id.get_or_insert_with(RecordId::new).clone()
    }
}

impl Document for Appointment {
    const COLLECTION: &'static str = crate::constants::APPOINTMENTS_COLLECTION;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn assign_ids(&mut self) -> RecordId {
        self.id.get_or_insert_with(RecordId::new).clone()
    }
}

impl Document for ClinicalData {
    const COLLECTION: &'static str = crate::constants::CLINICAL_DATA_COLLECTION;

    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn assign_ids(&mut self) -> RecordId {
        self.id.get_or_insert_with(RecordId::new).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::{ShopList, ShopListItem};

    #[test]
    fn test_assign_ids_fills_every_level_and_keeps_existing() {
        let existing_list = RecordId::new();
        let mut user = User {
            id: None,
            username: "alice".into(),
            shop_lists: vec![
                ShopList {
                    id: Some(existing_list.clone()),
                    topic: "Groceries".into(),
                    items: vec![ShopListItem {
                        id: None,
                        name: "Milk".into(),
                        price: 3.99,
                    }],
                },
                ShopList {
                    id: None,
                    topic: "Electronics".into(),
                    items: vec![],
                },
            ],
        };

        let id = user.assign_ids();

        assert_eq!(user.id.as_ref(), Some(&id));
        assert_eq!(user.shop_lists[0].id.as_ref(), Some(&existing_list));
        assert!(user.shop_lists[0].items[0].id.is_some());
        assert!(user.shop_lists[1].id.is_some());
        assert_ne!(user.shop_lists[1].id.as_ref(), Some(&existing_list));
    }

    #[test]
    fn test_assign_ids_is_stable() {
        let mut user = User {
            id: None,
            username: "bob".into(),
            shop_lists: vec![],
        };
        let first = user.assign_ids();
        let second = user.assign_ids();
        assert_eq!(first, second);
    }
}
