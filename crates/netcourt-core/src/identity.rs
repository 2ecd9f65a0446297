// crates/netcourt-core/src/identity.rs
// ============================================================================
// Module: NetCourt Identity
// Description: Person and enterprise identity descriptors.
// Purpose: Serialize customer and filer identities into backend payloads.
// Dependencies: serde, serde_json, crate::error
// ============================================================================

//! ## Overview
//! Identities are plain structs with optional fields; completeness is checked
//! only when [`Identity::to_payload`] is invoked, matching how backends treat
//! the `customer` and `entity` objects.
//! Invariants:
//! - Payload serialization fails if any backend-required field is empty.
//! - Unset or empty optional fields are omitted, never emitted as null.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::NotaryError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// User type sent for natural persons.
pub const USER_TYPE_PERSON: &str = "PERSON";
/// User type sent for enterprises.
pub const USER_TYPE_ENTERPRISE: &str = "ENTERPRISE";
/// Certificate type sent for natural persons.
pub const CERT_TYPE_IDENTITY_CARD: &str = "IDENTITY_CARD";

// ============================================================================
// SECTION: Enterprise Certificate Type
// ============================================================================

/// Certificate types accepted for enterprises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnterpriseCertType {
    /// Unified social credit code.
    UnifiedSocialCreditCode,
    /// Enterprise registered number.
    EnterpriseRegisteredNumber,
}

impl EnterpriseCertType {
    /// Returns the wire code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnifiedSocialCreditCode => "UNIFIED_SOCIAL_CREDIT_CODE",
            Self::EnterpriseRegisteredNumber => "ENTERPRISE_REGISTERED_NUMBER",
        }
    }
}

impl fmt::Display for EnterpriseCertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnterpriseCertType {
    type Err = NotaryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "UNIFIED_SOCIAL_CREDIT_CODE" => Ok(Self::UnifiedSocialCreditCode),
            "ENTERPRISE_REGISTERED_NUMBER" => Ok(Self::EnterpriseRegisteredNumber),
            _ => Err(NotaryError::InvalidArgument(
                "Enterprise cert type can only be \"UNIFIED_SOCIAL_CREDIT_CODE\" or \
                 \"ENTERPRISE_REGISTERED_NUMBER\""
                    .to_string(),
            )),
        }
    }
}

// ============================================================================
// SECTION: Person
// ============================================================================

/// Natural-person identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    /// Full name (required).
    pub cert_name: Option<String>,
    /// Identity card number (required).
    pub cert_no: Option<String>,
    /// Mobile number.
    pub mobile_no: Option<String>,
    /// Free-form extension properties.
    pub properties: Option<String>,
}

impl Person {
    /// Creates a person with the two required fields.
    #[must_use]
    pub fn new(cert_name: impl Into<String>, cert_no: impl Into<String>) -> Self {
        Self {
            cert_name: Some(cert_name.into()),
            cert_no: Some(cert_no.into()),
            ..Self::default()
        }
    }

    /// Sets the mobile number.
    #[must_use]
    pub fn with_mobile_no(mut self, mobile_no: impl Into<String>) -> Self {
        self.mobile_no = Some(mobile_no.into());
        self
    }

    /// Sets the extension properties.
    #[must_use]
    pub fn with_properties(mut self, properties: impl Into<String>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    /// Serializes the person for a backend payload.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidIdentityProperty`] when `cert_name` or
    /// `cert_no` is empty.
    pub fn to_payload(&self) -> Result<Value, NotaryError> {
        let cert_name = required("Person", "certName", self.cert_name.as_deref())?;
        let cert_no = required("Person", "certNo", self.cert_no.as_deref())?;
        to_value(&IdentityWire {
            user_type: USER_TYPE_PERSON,
            cert_type: CERT_TYPE_IDENTITY_CARD,
            cert_name,
            cert_no,
            mobile_no: non_empty(self.mobile_no.as_deref()),
            properties: non_empty(self.properties.as_deref()),
            legal_person: None,
            legal_person_id: None,
            agent: None,
            agent_id: None,
        })
    }
}

// ============================================================================
// SECTION: Enterprise
// ============================================================================

/// Enterprise identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enterprise {
    /// Registered enterprise name (required).
    pub cert_name: Option<String>,
    /// Certificate type (required).
    pub cert_type: Option<EnterpriseCertType>,
    /// Certificate number (required).
    pub cert_no: Option<String>,
    /// Contact mobile number.
    pub mobile_no: Option<String>,
    /// Free-form extension properties.
    pub properties: Option<String>,
    /// Legal representative name (required).
    pub legal_person: Option<String>,
    /// Legal representative identity card number (required).
    pub legal_person_id: Option<String>,
    /// Handling agent name (required).
    pub agent: Option<String>,
    /// Handling agent identity card number (required).
    pub agent_id: Option<String>,
}

impl Enterprise {
    /// Creates an enterprise with its name, certificate type and number.
    #[must_use]
    pub fn new(
        cert_name: impl Into<String>,
        cert_type: EnterpriseCertType,
        cert_no: impl Into<String>,
    ) -> Self {
        Self {
            cert_name: Some(cert_name.into()),
            cert_type: Some(cert_type),
            cert_no: Some(cert_no.into()),
            ..Self::default()
        }
    }

    /// Sets the legal representative.
    #[must_use]
    pub fn with_legal_person(
        mut self,
        legal_person: impl Into<String>,
        legal_person_id: impl Into<String>,
    ) -> Self {
        self.legal_person = Some(legal_person.into());
        self.legal_person_id = Some(legal_person_id.into());
        self
    }

    /// Sets the handling agent.
    #[must_use]
    pub fn with_agent(mut self, agent: impl Into<String>, agent_id: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Sets the contact mobile number.
    #[must_use]
    pub fn with_mobile_no(mut self, mobile_no: impl Into<String>) -> Self {
        self.mobile_no = Some(mobile_no.into());
        self
    }

    /// Sets the extension properties.
    #[must_use]
    pub fn with_properties(mut self, properties: impl Into<String>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    /// Sets the certificate type from its wire code.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] for codes other than the two
    /// enterprise certificate types.
    pub fn set_cert_type(&mut self, cert_type: &str) -> Result<(), NotaryError> {
        self.cert_type = Some(cert_type.parse()?);
        Ok(())
    }

    /// Serializes the enterprise for a backend payload.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidIdentityProperty`] naming the first empty
    /// required field.
    pub fn to_payload(&self) -> Result<Value, NotaryError> {
        let cert_name = required("Enterprise", "certName", self.cert_name.as_deref())?;
        let cert_type = self
            .cert_type
            .ok_or_else(|| missing("Enterprise", "certType"))?
            .as_str();
        let cert_no = required("Enterprise", "certNo", self.cert_no.as_deref())?;
        let legal_person = required("Enterprise", "legalPerson", self.legal_person.as_deref())?;
        let legal_person_id =
            required("Enterprise", "legalPersonId", self.legal_person_id.as_deref())?;
        let agent = required("Enterprise", "agent", self.agent.as_deref())?;
        let agent_id = required("Enterprise", "agentId", self.agent_id.as_deref())?;
        to_value(&IdentityWire {
            user_type: USER_TYPE_ENTERPRISE,
            cert_type,
            cert_name,
            cert_no,
            mobile_no: non_empty(self.mobile_no.as_deref()),
            properties: non_empty(self.properties.as_deref()),
            legal_person: Some(legal_person),
            legal_person_id: Some(legal_person_id),
            agent: Some(agent),
            agent_id: Some(agent_id),
        })
    }
}

// ============================================================================
// SECTION: Identity
// ============================================================================

/// Customer or filer identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Natural person.
    Person(Person),
    /// Enterprise.
    Enterprise(Enterprise),
}

impl Identity {
    /// Returns the backend user type.
    #[must_use]
    pub const fn user_type(&self) -> &'static str {
        match self {
            Self::Person(_) => USER_TYPE_PERSON,
            Self::Enterprise(_) => USER_TYPE_ENTERPRISE,
        }
    }

    /// Returns the certificate name (also known as user name).
    #[must_use]
    pub fn cert_name(&self) -> Option<&str> {
        match self {
            Self::Person(person) => person.cert_name.as_deref(),
            Self::Enterprise(enterprise) => enterprise.cert_name.as_deref(),
        }
    }

    /// Alias of [`Identity::cert_name`].
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.cert_name()
    }

    /// Replaces the certificate name.
    pub fn set_user_name(&mut self, name: impl Into<String>) {
        let name = Some(name.into());
        match self {
            Self::Person(person) => person.cert_name = name,
            Self::Enterprise(enterprise) => enterprise.cert_name = name,
        }
    }

    /// Returns the certificate number.
    #[must_use]
    pub fn cert_no(&self) -> Option<&str> {
        match self {
            Self::Person(person) => person.cert_no.as_deref(),
            Self::Enterprise(enterprise) => enterprise.cert_no.as_deref(),
        }
    }

    /// Serializes the identity for a backend payload.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidIdentityProperty`] when a required field
    /// is empty.
    pub fn to_payload(&self) -> Result<Value, NotaryError> {
        match self {
            Self::Person(person) => person.to_payload(),
            Self::Enterprise(enterprise) => enterprise.to_payload(),
        }
    }
}

impl From<Person> for Identity {
    fn from(person: Person) -> Self {
        Self::Person(person)
    }
}

impl From<Enterprise> for Identity {
    fn from(enterprise: Enterprise) -> Self {
        Self::Enterprise(enterprise)
    }
}

// ============================================================================
// SECTION: Wire Format
// ============================================================================

/// Serialized identity shape shared by persons and enterprises.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdentityWire<'a> {
    /// Backend user type.
    user_type: &'static str,
    /// Certificate type code.
    cert_type: &'a str,
    /// Certificate name.
    cert_name: &'a str,
    /// Certificate number.
    cert_no: &'a str,
    /// Mobile number.
    #[serde(skip_serializing_if = "Option::is_none")]
    mobile_no: Option<&'a str>,
    /// Extension properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a str>,
    /// Legal representative name.
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_person: Option<&'a str>,
    /// Legal representative identity number.
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_person_id: Option<&'a str>,
    /// Agent name.
    #[serde(skip_serializing_if = "Option::is_none")]
    agent: Option<&'a str>,
    /// Agent identity number.
    #[serde(skip_serializing_if = "Option::is_none")]
    agent_id: Option<&'a str>,
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the value when it is present and non-empty.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Returns the value or an error naming the missing field.
fn required<'a>(
    owner: &str,
    field: &str,
    value: Option<&'a str>,
) -> Result<&'a str, NotaryError> {
    non_empty(value).ok_or_else(|| missing(owner, field))
}

/// Builds the missing-field error.
fn missing(owner: &str, field: &str) -> NotaryError {
    NotaryError::InvalidIdentityProperty(format!("{owner} {field} can not be empty"))
}

/// Converts the wire struct into a JSON value.
fn to_value(wire: &IdentityWire<'_>) -> Result<Value, NotaryError> {
    serde_json::to_value(wire).map_err(|err| {
        NotaryError::InvalidIdentityProperty(format!("identity serialization failed: {err}"))
    })
}
