use serde::{Deserialize, Serialize};

/// A spending category as the API returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Body of `POST /category` and `PUT /category/{id}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryPayload {
    pub name: String,
}

impl CategoryPayload {
    pub fn new(name: impl Into<String>) -> Self {
        CategoryPayload { name: name.into() }
    }
}
