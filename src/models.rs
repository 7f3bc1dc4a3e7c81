//! Response models for the ZeroBounce API.

use crate::coerce::{bool_field, int_field, string_field};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Credits value the service returns when it cannot compute a balance.
pub const CREDITS_UNAVAILABLE: i64 = -1;

/// Result of validating a single email address.
///
/// Every string field defaults to empty when the service omits it or sends
/// `null`. A populated [`error`](Self::error) field may come alongside other
/// data, so check both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct EmailValidationResult {
    /// Address that was validated.
    pub address: String,
    /// Validation status, e.g. `Valid`, `Invalid`, `Catch-All`.
    pub status: String,
    /// Secondary classification for some statuses.
    pub sub_status: String,
    /// Local part of the address.
    pub account: String,
    /// Domain part of the address.
    pub domain: String,
    /// Whether the domain is a disposable mail provider.
    pub disposable: bool,
    /// Whether the address is known to be abusive.
    pub toxic: bool,
    pub firstname: String,
    pub lastname: String,
    pub gender: String,
    pub location: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub zipcode: String,
    /// Creation date of the domain, when known.
    pub creationdate: String,
    /// Timestamp at which the service processed the request.
    pub processedat: String,
    /// Error text reported by the service, empty on success.
    pub error: String,
}

impl EmailValidationResult {
    /// Decode a raw JSON body.
    ///
    /// Fails only if the body is not a JSON object; individual fields are
    /// coerced and never cause an error.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// `true` if the status is `valid`, compared case-insensitively.
    pub fn is_valid(&self) -> bool {
        self.status.eq_ignore_ascii_case("valid")
    }

    /// The stored error text as an [`Error::Service`].
    ///
    /// This always returns an error value, even when the service reported
    /// no error, in which case the message is empty. Prefer
    /// [`error_message`](Self::error_message) to test for an error.
    pub fn error(&self) -> Error {
        Error::Service(self.error.clone())
    }

    /// The stored error text, or `None` if it is empty.
    pub fn error_message(&self) -> Option<&str> {
        non_empty(&self.error)
    }
}

impl From<Map<String, Value>> for EmailValidationResult {
    fn from(map: Map<String, Value>) -> Self {
        let s = |key: &str| string_field(map.get(key));
        let processedat = map
            .get("processedat")
            .or_else(|| map.get("processedate"));

        Self {
            address: s("address"),
            status: s("status"),
            sub_status: s("sub_status"),
            account: s("account"),
            domain: s("domain"),
            disposable: bool_field(map.get("disposable")),
            toxic: bool_field(map.get("toxic")),
            firstname: s("firstname"),
            lastname: s("lastname"),
            gender: s("gender"),
            location: s("location"),
            country: s("country"),
            region: s("region"),
            city: s("city"),
            zipcode: s("zipcode"),
            creationdate: s("creationdate"),
            processedat: string_field(processedat),
            error: s("error"),
        }
    }
}

/// Remaining credit balance of the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct CreditBalanceResult {
    /// Number of credits left, or [`CREDITS_UNAVAILABLE`].
    pub credits: i64,
    /// Error text reported by the service, empty on success.
    pub error: String,
}

impl CreditBalanceResult {
    /// Decode a raw JSON body.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Whether any credits are left.
    ///
    /// # Errors
    /// [`Error::CreditsUnavailable`] when the service returned `-1`, otherwise
    /// [`Error::Service`] when the response carried an error message. The
    /// `credits` field stays readable in both cases.
    pub fn credits_available(&self) -> Result<bool> {
        self.credits_balance().map(|credits| credits > 0)
    }

    /// The raw credit count, with the same error rules as
    /// [`credits_available`](Self::credits_available).
    pub fn credits_balance(&self) -> Result<i64> {
        if self.credits == CREDITS_UNAVAILABLE {
            return Err(Error::CreditsUnavailable);
        }
        if let Some(message) = self.error_message() {
            return Err(Error::Service(message.to_string()));
        }
        Ok(self.credits)
    }

    /// The stored error text as an [`Error::Service`], empty if there was none.
    ///
    /// See [`EmailValidationResult::error`] for the caveat.
    pub fn error(&self) -> Error {
        Error::Service(self.error.clone())
    }

    /// The stored error text, or `None` if it is empty.
    pub fn error_message(&self) -> Option<&str> {
        non_empty(&self.error)
    }
}

impl From<Map<String, Value>> for CreditBalanceResult {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            credits: int_field(map.get("credits")),
            error: string_field(map.get("error")),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
