//! Route handlers, one module per resource family.

pub mod appointments;
pub mod clinical_data;
pub mod diagnostics;
pub mod items;
pub mod patients;
pub mod shop_lists;
pub mod users;
