//! Synchronous form validation, applied before any network call.
//!
//! Field keys and messages match the BankApp forms exactly, so the UI can
//! attach each message to the input that raised it. Every rule is checked
//! on every run; a form with several problems reports all of them at once.
//! Validators for forms that feed a typed payload return it ready to send.

use std::fmt;
use std::str::FromStr;

use email_address::EmailAddress;

use crate::domain::{NewAccount, NewTransaction, PaymentMethod, TransactionKind};

/// One rejected field with its user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Form input name the message attaches to (e.g. `confirmarSenha`).
    pub field: &'static str,
    pub message: &'static str,
}

/// Every rule violation found in one form submission. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Message attached to `field`, if that field was rejected.
    pub fn field(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Login form as bound by the UI.
#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Registration form as bound by the UI.
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Account form as bound by the UI.
#[derive(Debug, Clone, Default)]
pub struct AccountInput {
    pub name: String,
    pub description: Option<String>,
    pub balance: f64,
}

/// Category form as bound by the UI.
#[derive(Debug, Clone, Default)]
pub struct CategoryInput {
    pub name: String,
}

/// Transaction form as bound by the UI. `kind` and `payment_method` carry
/// the raw select values and are parsed against the domain enums.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub description: String,
    pub amount: f64,
    pub kind: String,
    pub payment_method: String,
    pub installments: Option<u32>,
    pub category_id: i64,
    pub account_id: i64,
    pub recurring: Option<bool>,
}

pub fn validate_login(input: &LoginInput) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    check_email(&input.email, &mut errors);
    check_password(&input.password, &mut errors);
    finish(errors)
}

pub fn validate_register(input: &RegisterInput) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    if chars(&input.name) < 3 {
        errors.push(FieldError {
            field: "nome",
            message: "Nome deve ter no mínimo 3 caracteres",
        });
    }
    check_email(&input.email, &mut errors);
    check_password(&input.password, &mut errors);
    if input.confirm_password != input.password {
        errors.push(FieldError {
            field: "confirmarSenha",
            message: "As senhas não coincidem",
        });
    }
    finish(errors)
}

pub fn validate_account(input: &AccountInput) -> Result<NewAccount, ValidationErrors> {
    let mut errors = Vec::new();
    if chars(&input.name) < 3 {
        errors.push(FieldError {
            field: "name",
            message: "Nome deve ter no mínimo 3 caracteres",
        });
    }
    if input.balance.is_nan() || input.balance < 0.0 {
        errors.push(FieldError {
            field: "balance",
            message: "Saldo não pode ser negativo",
        });
    }
    finish(errors)?;
    Ok(NewAccount {
        name: input.name.clone(),
        description: input.description.clone(),
        balance: input.balance,
    })
}

pub fn validate_category(input: &CategoryInput) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    if chars(&input.name) < 2 {
        errors.push(FieldError {
            field: "name",
            message: "Nome deve ter no mínimo 2 caracteres",
        });
    }
    finish(errors)
}

pub fn validate_transaction(input: &TransactionInput) -> Result<NewTransaction, ValidationErrors> {
    let mut errors = Vec::new();
    if chars(&input.description) < 3 {
        errors.push(FieldError {
            field: "descricao",
            message: "Descrição deve ter no mínimo 3 caracteres",
        });
    }
    if input.amount.is_nan() || input.amount <= 0.0 {
        errors.push(FieldError {
            field: "valor",
            message: "Valor deve ser positivo",
        });
    }
    let kind = match TransactionKind::from_str(&input.kind) {
        Ok(kind) => Some(kind),
        Err(_) => {
            errors.push(FieldError {
                field: "tipo",
                message: "Tipo inválido",
            });
            None
        }
    };
    let payment_method = match PaymentMethod::from_str(&input.payment_method) {
        Ok(method) => Some(method),
        Err(_) => {
            errors.push(FieldError {
                field: "metodoPagamento",
                message: "Método de pagamento inválido",
            });
            None
        }
    };
    if let Some(installments) = input.installments {
        if !(1..=24).contains(&installments) {
            errors.push(FieldError {
                field: "parcelas",
                message: "Parcelas deve estar entre 1 e 24",
            });
        }
    }
    if payment_method == Some(PaymentMethod::Credit) && input.installments.is_none() {
        errors.push(FieldError {
            field: "parcelas",
            message: "Informe o número de parcelas para crédito",
        });
    }
    if input.category_id <= 0 {
        errors.push(FieldError {
            field: "categoriaId",
            message: "Selecione uma categoria",
        });
    }
    if input.account_id <= 0 {
        errors.push(FieldError {
            field: "contaId",
            message: "Selecione uma conta",
        });
    }
    match (kind, payment_method) {
        (Some(kind), Some(payment_method)) if errors.is_empty() => Ok(NewTransaction {
            description: input.description.clone(),
            amount: input.amount,
            kind,
            payment_method,
            account_id: input.account_id,
            category_id: Some(input.category_id),
            recurring: input.recurring,
            installments: input.installments,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if EmailAddress::from_str(email).is_err() {
        errors.push(FieldError {
            field: "email",
            message: "Email inválido",
        });
    }
}

fn check_password(password: &str, errors: &mut Vec<FieldError>) {
    if chars(password) < 6 {
        errors.push(FieldError {
            field: "senha",
            message: "Senha deve ter no mínimo 6 caracteres",
        });
    }
}

fn chars(value: &str) -> usize {
    value.chars().count()
}

fn finish(errors: Vec<FieldError>) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
