//! User-facing message text.
//!
//! Errors travel through the crates as stable kinds; this is the only place
//! where they become sentences. `pt-BR` is the default language.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header::ACCEPT_LANGUAGE, request::Parts};

use mymoney_core::auth::MIN_PASSWORD_LEN;
use mymoney_core::billing::{AMOUNT_CEILING, ValidationErrorKind, ValidationIssue};
use mymoney_core::currency::format_brl;
use mymoney_core::input::MAX_TEXT_LEN;

/// Language of response messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// Brazilian Portuguese.
    #[default]
    PtBr,
    /// English.
    En,
}

impl Locale {
    /// Picks the first supported language from an `Accept-Language` value.
    #[must_use]
    pub fn from_accept_language(value: &str) -> Self {
        value
            .split(',')
            .filter_map(|part| part.split(';').next())
            .map(|tag| tag.trim().to_ascii_lowercase())
            .find_map(|tag| {
                if tag.starts_with("pt") {
                    Some(Self::PtBr)
                } else if tag.starts_with("en") {
                    Some(Self::En)
                } else {
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Reads the locale from request headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Self::from_accept_language)
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Non-validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Billing cycle missing or not owned.
    CycleNotFound,
    /// Category missing or not owned.
    CategoryNotFound,
    /// Category description blank.
    DescriptionRequired,
    /// Category description over the length limit.
    DescriptionTooLong,
    /// Category description taken.
    CategoryExists,
    /// Category still referenced by a debt.
    CategoryInUse,
    /// Registration without a name.
    NameRequired,
    /// Registration name over the length limit.
    NameTooLong,
    /// Registration without an e-mail.
    EmailRequired,
    /// Registration e-mail over the length limit.
    EmailTooLong,
    /// Password below minimum length.
    PasswordTooShort,
    /// E-mail already registered.
    EmailTaken,
    /// Wrong e-mail or password.
    InvalidCredentials,
    /// No token in the request.
    MissingToken,
    /// Token malformed or signed with another key.
    InvalidToken,
    /// Token past its expiry.
    TokenExpired,
    /// Anything that is not the caller's fault.
    Internal,
}

/// Renders a message in the given language.
#[must_use]
pub fn message(message: Message, locale: Locale) -> String {
    let text = match (message, locale) {
        (Message::CycleNotFound, Locale::PtBr) => {
            "Ciclo de faturamento não encontrado ou não pertence ao usuário."
        }
        (Message::CycleNotFound, Locale::En) => {
            "Billing cycle not found or not owned by the user."
        }
        (Message::CategoryNotFound, Locale::PtBr) => {
            "Categoria não encontrada ou não pertence ao usuário."
        }
        (Message::CategoryNotFound, Locale::En) => "Category not found or not owned by the user.",
        (Message::DescriptionRequired, Locale::PtBr) => "Informe a descrição da categoria!",
        (Message::DescriptionRequired, Locale::En) => "Category description is required.",
        (Message::DescriptionTooLong, Locale::PtBr) => {
            return format!("A descrição da categoria deve ter no máximo {MAX_TEXT_LEN} caracteres.");
        }
        (Message::DescriptionTooLong, Locale::En) => {
            return format!("Category description must have at most {MAX_TEXT_LEN} characters.");
        }
        (Message::CategoryExists, Locale::PtBr) => "Categoria já registrada.",
        (Message::CategoryExists, Locale::En) => "Category already registered.",
        (Message::CategoryInUse, Locale::PtBr) => {
            "Operação bloqueada, categoria relacionada com um ciclo de pagamento."
        }
        (Message::CategoryInUse, Locale::En) => {
            "Operation blocked, category is used by a billing cycle."
        }
        (Message::NameRequired, Locale::PtBr) => "O nome é obrigatório.",
        (Message::NameRequired, Locale::En) => "Name is required.",
        (Message::EmailRequired, Locale::PtBr) => "O e-mail é obrigatório.",
        (Message::EmailRequired, Locale::En) => "E-mail is required.",
        (Message::NameTooLong, Locale::PtBr) => {
            return format!("O nome deve ter no máximo {MAX_TEXT_LEN} caracteres.");
        }
        (Message::NameTooLong, Locale::En) => {
            return format!("Name must have at most {MAX_TEXT_LEN} characters.");
        }
        (Message::EmailTooLong, Locale::PtBr) => {
            return format!("O e-mail deve ter no máximo {MAX_TEXT_LEN} caracteres.");
        }
        (Message::EmailTooLong, Locale::En) => {
            return format!("E-mail must have at most {MAX_TEXT_LEN} characters.");
        }
        (Message::PasswordTooShort, Locale::PtBr) => {
            return format!("A senha deve ter ao menos {MIN_PASSWORD_LEN} caracteres.");
        }
        (Message::PasswordTooShort, Locale::En) => {
            return format!("Password must have at least {MIN_PASSWORD_LEN} characters.");
        }
        (Message::EmailTaken, Locale::PtBr) => "Este e-mail já está registrado.",
        (Message::EmailTaken, Locale::En) => "This e-mail is already registered.",
        (Message::InvalidCredentials, Locale::PtBr) => "E-mail ou senha inválidos.",
        (Message::InvalidCredentials, Locale::En) => "Invalid e-mail or password.",
        (Message::MissingToken, Locale::PtBr) => "Acesso negado. Nenhum token fornecido.",
        (Message::MissingToken, Locale::En) => "Access denied. No token provided.",
        (Message::InvalidToken, Locale::PtBr) => "Token inválido.",
        (Message::InvalidToken, Locale::En) => "Invalid token.",
        (Message::TokenExpired, Locale::PtBr) => "Token expirado.",
        (Message::TokenExpired, Locale::En) => "Token has expired.",
        (Message::Internal, Locale::PtBr) => "Erro interno. Tente novamente mais tarde.",
        (Message::Internal, Locale::En) => "Internal error. Please try again later.",
    };
    text.to_string()
}

/// Renders a validation issue in the given language.
#[must_use]
pub fn validation_message(issue: &ValidationIssue, locale: Locale) -> String {
    use ValidationErrorKind as Kind;

    let position = issue.position.unwrap_or_default();
    let (min, max) = (issue.min.unwrap_or_default(), issue.max.unwrap_or_default());
    let ceiling = format_brl(AMOUNT_CEILING);

    match locale {
        Locale::PtBr => match issue.kind {
            Kind::NameRequired => "O campo 'name' é obrigatório.".to_string(),
            Kind::NameTooLong => format!("O campo 'name' deve ter no máximo {max} caracteres."),
            Kind::MonthInvalid => format!("O campo mês deve ser um número entre {min} e {max}."),
            Kind::YearInvalid => format!("O campo ano deve ser um número entre {min} e {max}."),
            Kind::CreditsRequired => "Você deve informar ao menos um crédito.".to_string(),
            Kind::CreditNameRequired => {
                format!("O nome do crédito na posição {position} é obrigatório.")
            }
            Kind::CreditValueInvalid => {
                format!("O valor do crédito na posição {position} é inválido.")
            }
            Kind::CreditNameTooLong => format!(
                "O nome do crédito na posição {position} deve ter no máximo {max} caracteres."
            ),
            Kind::CreditValueTooLarge => format!(
                "O valor do crédito na posição {position} deve ser menor que {ceiling}."
            ),
            Kind::DebtsRequired => "Você deve informar ao menos um débito.".to_string(),
            Kind::DebtNameRequired => {
                format!("O nome do débito na posição {position} é obrigatório.")
            }
            Kind::DebtValueInvalid => {
                format!("O valor do débito na posição {position} é inválido.")
            }
            Kind::DebtNameTooLong => format!(
                "O nome do débito na posição {position} deve ter no máximo {max} caracteres."
            ),
            Kind::DebtValueTooLarge => format!(
                "O valor do débito na posição {position} deve ser menor que {ceiling}."
            ),
            Kind::CategoryTooLong => format!(
                "A categoria do débito na posição {position} deve ter no máximo {max} caracteres."
            ),
            Kind::PaymentDayInvalid => {
                format!("O dia do pagamento do débito na posição {position} é inválido.")
            }
            Kind::StatusRequired => {
                format!("O status do débito na posição {position} é obrigatório.")
            }
            Kind::StatusUnknown => format!(
                "O status do débito na posição {position} deve ser PAGO, PENDENTE ou AGENDADO."
            ),
            Kind::PaymentDateRequired => {
                format!("A data de pagamento na posição {position} é obrigatória.")
            }
            Kind::PaymentDateInvalid => {
                format!("A data de pagamento na posição {position} é inválida.")
            }
        },
        Locale::En => match issue.kind {
            Kind::NameRequired => "The 'name' field is required.".to_string(),
            Kind::NameTooLong => format!("The 'name' field must have at most {max} characters."),
            Kind::MonthInvalid => format!("Month must be a number between {min} and {max}."),
            Kind::YearInvalid => format!("Year must be a number between {min} and {max}."),
            Kind::CreditsRequired => "At least one credit is required.".to_string(),
            Kind::CreditNameRequired => format!("Credit name at position {position} is required."),
            Kind::CreditValueInvalid => format!("Credit value at position {position} is invalid."),
            Kind::CreditNameTooLong => format!(
                "Credit name at position {position} must have at most {max} characters."
            ),
            Kind::CreditValueTooLarge => format!(
                "Credit value at position {position} must be less than {ceiling}."
            ),
            Kind::DebtsRequired => "At least one debt is required.".to_string(),
            Kind::DebtNameRequired => format!("Debt name at position {position} is required."),
            Kind::DebtValueInvalid => format!("Debt value at position {position} is invalid."),
            Kind::DebtNameTooLong => format!(
                "Debt name at position {position} must have at most {max} characters."
            ),
            Kind::DebtValueTooLarge => format!(
                "Debt value at position {position} must be less than {ceiling}."
            ),
            Kind::CategoryTooLong => format!(
                "Debt category at position {position} must have at most {max} characters."
            ),
            Kind::PaymentDayInvalid => {
                format!("Debt payment day at position {position} is invalid.")
            }
            Kind::StatusRequired => format!("Debt status at position {position} is required."),
            Kind::StatusUnknown => format!(
                "Debt status at position {position} must be PAGO, PENDENTE or AGENDADO."
            ),
            Kind::PaymentDateRequired => {
                format!("Payment date at position {position} is required.")
            }
            Kind::PaymentDateInvalid => format!("Payment date at position {position} is invalid."),
        },
    }
}
