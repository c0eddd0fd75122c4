use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::domain::errors::{ValidationError, ValidationResult};
use crate::domain::{money, sanitize_inline_text};
use crate::pagination::Pagination;

/// Discount granted to premium clients, in whole percent.
pub const PREMIUM_DISCOUNT_PERCENT: u8 = 10;

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is valid");
    static ref PHONE_PATTERN: Regex =
        Regex::new(r"^\+?[1-9][0-9]{1,14}$").expect("phone pattern is valid");
}

/// Tier of a client, selected by the stored premium flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientKind {
    #[default]
    Standard,
    Premium {
        discount_percent: u8,
    },
}

impl ClientKind {
    /// The premium tier with the shop-wide discount.
    pub fn premium() -> Self {
        Self::Premium {
            discount_percent: PREMIUM_DISCOUNT_PERCENT,
        }
    }

    /// Build the tier from the persisted flag.
    pub fn from_flag(is_premium: bool) -> Self {
        if is_premium {
            Self::premium()
        } else {
            Self::Standard
        }
    }

    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Premium { .. })
    }
}

/// Domain representation of a shop client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    /// Unique identifier of the client.
    pub id: i32,
    /// Display name of the client.
    pub name: String,
    /// Unique contact email.
    pub email: String,
    /// Contact phone in simplified E.164 form.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Day the client was registered.
    pub registration_date: NaiveDate,
    /// Standard or premium tier.
    pub kind: ClientKind,
}

impl Client {
    pub fn is_premium(&self) -> bool {
        self.kind.is_premium()
    }

    /// Price `amount_cents` with the client's discount applied.
    ///
    /// Returns `None` for standard clients. Nothing stored on the client or its
    /// orders is changed.
    pub fn apply_discount(&self, amount_cents: i64) -> Option<i64> {
        match self.kind {
            ClientKind::Standard => None,
            ClientKind::Premium { discount_percent } => {
                Some(money::discounted(amount_cents, discount_percent))
            }
        }
    }
}

/// Contact fields shared by new clients and client updates.
#[derive(Validate)]
struct ContactFields {
    #[validate(regex(path = *EMAIL_PATTERN))]
    email: String,
    #[validate(regex(path = *PHONE_PATTERN))]
    phone: String,
}

fn validate_contact(email: &str, phone: &str) -> ValidationResult<()> {
    let fields = ContactFields {
        email: email.to_string(),
        phone: phone.to_string(),
    };

    fields
        .validate()
        .map_err(|errors| contact_violation(errors, email, phone))
}

fn contact_violation(errors: ValidationErrors, email: &str, phone: &str) -> ValidationError {
    if errors.field_errors().contains_key("email") {
        ValidationError::InvalidEmail(email.to_string())
    } else {
        ValidationError::InvalidPhone(phone.to_string())
    }
}

/// Payload required to insert a new client.
#[derive(Debug, Clone)]
pub struct NewClient {
    /// Explicit identifier, used when importing records that carry ids.
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub registration_date: NaiveDate,
    pub kind: ClientKind,
}

impl NewClient {
    /// Build a validated standard client registered today.
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        phone: impl AsRef<str>,
        address: impl AsRef<str>,
    ) -> ValidationResult<Self> {
        let email = email.as_ref().trim().to_string();
        let phone = phone.as_ref().trim().to_string();
        validate_contact(&email, &phone)?;

        Ok(Self {
            id: None,
            name: sanitize_inline_text(name.as_ref()),
            email,
            phone,
            address: sanitize_inline_text(address.as_ref()),
            registration_date: chrono::Local::now().date_naive(),
            kind: ClientKind::Standard,
        })
    }

    /// Register the client in the premium tier.
    pub fn premium(mut self) -> Self {
        self.kind = ClientKind::premium();
        self
    }

    /// Override the default (today) registration date.
    pub fn with_registration_date(mut self, date: NaiveDate) -> Self {
        self.registration_date = date;
        self
    }

    /// Keep the given identifier when the client is inserted.
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

/// Full replacement applied when editing an existing client.
#[derive(Debug, Clone)]
pub struct UpdateClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub kind: ClientKind,
}

impl UpdateClient {
    /// Build a validated replacement for an existing client.
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        phone: impl AsRef<str>,
        address: impl AsRef<str>,
        kind: ClientKind,
    ) -> ValidationResult<Self> {
        let email = email.as_ref().trim().to_string();
        let phone = phone.as_ref().trim().to_string();
        validate_contact(&email, &phone)?;

        Ok(Self {
            name: sanitize_inline_text(name.as_ref()),
            email,
            phone,
            address: sanitize_inline_text(address.as_ref()),
            kind,
        })
    }
}

/// Query definition used to list clients.
#[derive(Debug, Clone, Default)]
pub struct ClientListQuery {
    /// Optional search term matched against name, email or phone.
    pub search: Option<String>,
    /// Restrict the results to premium clients.
    pub premium_only: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    /// Construct a query that targets every client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a search term applied to name, email or phone.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Only return premium clients.
    pub fn premium_only(mut self) -> Self {
        self.premium_only = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client(email: &str, phone: &str) -> ValidationResult<NewClient> {
        NewClient::new("Alice", email, phone, "1 Main St")
    }

    #[test]
    fn accepts_well_formed_contacts() {
        let client = new_client("alice.smith+shop@example.co.uk", "+79991234567")
            .expect("expected valid client");

        assert_eq!(client.kind, ClientKind::Standard);
        assert_eq!(client.registration_date, chrono::Local::now().date_naive());
        assert!(new_client("bob@example.com", "12").is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["alice.example.com", "alice@example", "alice@example.c", "@example.com"] {
            assert_eq!(
                new_client(email, "+15551234567").unwrap_err(),
                ValidationError::InvalidEmail(email.to_string()),
                "expected `{email}` to be rejected"
            );
        }
    }

    #[test]
    fn rejects_malformed_phone() {
        for phone in ["0123456", "+0123456", "555-1234", "1234567890123456", "1", "+"] {
            assert_eq!(
                new_client("alice@example.com", phone).unwrap_err(),
                ValidationError::InvalidPhone(phone.to_string()),
                "expected `{phone}` to be rejected"
            );
        }
    }

    #[test]
    fn premium_clients_get_ten_percent_off() {
        let client = Client {
            id: 1,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            phone: "+15551234567".into(),
            address: "1 Main St".into(),
            registration_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            kind: ClientKind::premium(),
        };

        assert_eq!(client.apply_discount(10_000), Some(9_000));
        assert_eq!(client.apply_discount(0), Some(0));

        let standard = Client {
            kind: ClientKind::Standard,
            ..client
        };
        assert_eq!(standard.apply_discount(10_000), None);
    }

    #[test]
    fn kind_round_trips_through_flag() {
        assert!(ClientKind::from_flag(true).is_premium());
        assert!(!ClientKind::from_flag(false).is_premium());
        assert_eq!(
            ClientKind::from_flag(true),
            ClientKind::Premium {
                discount_percent: PREMIUM_DISCOUNT_PERCENT
            }
        );
    }

    #[test]
    fn update_client_validates_contacts() {
        assert!(
            UpdateClient::new("A", "a@b.io", "+123", "x", ClientKind::premium()).is_ok()
        );
        assert!(matches!(
            UpdateClient::new("A", "nope", "+123", "x", ClientKind::Standard),
            Err(ValidationError::InvalidEmail(_))
        ));
    }
}
