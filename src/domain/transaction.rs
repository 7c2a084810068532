use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a form value matches none of an enum's wire encodings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized value `{0}`")]
pub struct UnknownVariant(pub String);

/// Direction of a transaction, wire-encoded as `entrada`/`saida`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    #[serde(rename = "entrada")]
    Income,
    #[serde(rename = "saida")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "entrada",
            TransactionKind::Expense => "saida",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entrada" => Ok(TransactionKind::Income),
            "saida" => Ok(TransactionKind::Expense),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// How a transaction was paid, wire-encoded in Portuguese.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "debito")]
    Debit,
    #[serde(rename = "credito")]
    Credit,
    #[serde(rename = "dinheiro")]
    Cash,
    #[serde(rename = "pix")]
    Pix,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Debit => "debito",
            PaymentMethod::Credit => "credito",
            PaymentMethod::Cash => "dinheiro",
            PaymentMethod::Pix => "pix",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debito" => Ok(PaymentMethod::Debit),
            "credito" => Ok(PaymentMethod::Credit),
            "dinheiro" => Ok(PaymentMethod::Cash),
            "pix" => Ok(PaymentMethod::Pix),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Server-side window filter accepted by `GET /transaction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    ThreeMonths,
}

impl Period {
    /// Value of the `filtro` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "semana",
            Period::Month => "mes",
            Period::ThreeMonths => "tres-meses",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction as the API returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "descricao")]
    pub description: String,
    /// Amount in BRL; always positive, direction comes from `kind`.
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
    #[serde(rename = "metodoPagamento")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "parcelas", default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    #[serde(rename = "categoriaId")]
    pub category_id: i64,
    #[serde(rename = "contaId")]
    pub account_id: i64,
    /// Server-issued timestamp.
    #[serde(rename = "data")]
    pub date: DateTime<Utc>,
}

/// Body of `POST /transaction`. The server issues `id` and `data`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewTransaction {
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "tipo")]
    pub kind: TransactionKind,
    #[serde(rename = "metodoPagamento")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "contaId")]
    pub account_id: i64,
    #[serde(rename = "categoriaId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Marks a recurring charge.
    #[serde(rename = "fixa", skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
    #[serde(rename = "parcelas", skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
}

/// Body of `PUT /transaction/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TransactionPatch {
    #[serde(rename = "descricao", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "valor", skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(rename = "metodoPagamento", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(rename = "contaId", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(rename = "categoriaId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_wire_encoding() {
        assert_eq!("entrada".parse(), Ok(TransactionKind::Income));
        assert_eq!("saida".parse(), Ok(TransactionKind::Expense));
        assert_eq!(TransactionKind::Expense.as_str(), "saida");
        assert!("Entrada".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn payment_method_covers_all_wire_values() {
        for raw in ["debito", "credito", "dinheiro", "pix"] {
            let method: PaymentMethod = raw.parse().expect("known method");
            assert_eq!(method.as_str(), raw);
        }
        assert!("boleto".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn transaction_decodes_portuguese_fields() {
        let raw = r#"{
            "id": 7,
            "descricao": "Mercado",
            "valor": 250.75,
            "tipo": "saida",
            "metodoPagamento": "credito",
            "parcelas": 3,
            "categoriaId": 2,
            "contaId": 1,
            "data": "2024-05-01T12:30:00Z"
        }"#;
        let tx: Transaction = serde_json::from_str(raw).expect("decode transaction");
        assert_eq!(tx.description, "Mercado");
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.payment_method, PaymentMethod::Credit);
        assert_eq!(tx.installments, Some(3));
    }

    #[test]
    fn new_transaction_serializes_wire_names_and_skips_absent_fields() {
        let payload = NewTransaction {
            description: "Salário".to_string(),
            amount: 4200.0,
            kind: TransactionKind::Income,
            payment_method: PaymentMethod::Pix,
            account_id: 1,
            category_id: Some(4),
            recurring: None,
            installments: None,
        };
        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(json["descricao"], "Salário");
        assert_eq!(json["tipo"], "entrada");
        assert_eq!(json["metodoPagamento"], "pix");
        assert_eq!(json["categoriaId"], 4);
        assert_eq!(json.get("parcelas"), None);
        assert_eq!(json.get("fixa"), None);
    }

    #[test]
    fn period_query_values_match_api_contract() {
        assert_eq!(Period::Week.as_str(), "semana");
        assert_eq!(Period::Month.as_str(), "mes");
        assert_eq!(Period::ThreeMonths.as_str(), "tres-meses");
    }
}
