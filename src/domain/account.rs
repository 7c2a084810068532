use serde::{Deserialize, Serialize};

/// A bank account as the API returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current balance in BRL.
    pub balance: f64,
}

/// Body of `POST /account`. The server issues the id.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewAccount {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub balance: f64,
}

/// Body of `PUT /account/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AccountPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
}
