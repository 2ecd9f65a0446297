// crates/netcourt-core/src/location.rs
// ============================================================================
// Module: NetCourt Location
// Description: IP-anchored environment descriptor for evidence submissions.
// Purpose: Capture where a notarized action took place.
// Dependencies: serde, serde_json, crate::error
// ============================================================================

//! ## Overview
//! A [`Location`] always carries a non-empty IP address; the remaining device
//! and position attributes are optional and omitted from payloads when empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::error::NotaryError;

// ============================================================================
// SECTION: Location Info
// ============================================================================

/// Complete set of location attributes, used for bulk construction and reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    /// Client IP address (required).
    pub ip: String,
    /// Wi-Fi MAC address.
    #[serde(skip_serializing_if = "is_blank")]
    pub wifi_mac: Option<String>,
    /// Device IMEI.
    #[serde(skip_serializing_if = "is_blank")]
    pub imei: Option<String>,
    /// Subscriber IMSI.
    #[serde(skip_serializing_if = "is_blank")]
    pub imsi: Option<String>,
    /// Latitude as reported by the device.
    #[serde(skip_serializing_if = "is_blank")]
    pub latitude: Option<String>,
    /// Longitude as reported by the device.
    #[serde(skip_serializing_if = "is_blank")]
    pub longitude: Option<String>,
    /// Free-form extension properties.
    #[serde(skip_serializing_if = "is_blank")]
    pub properties: Option<String>,
}

// ============================================================================
// SECTION: Location
// ============================================================================

/// Environment descriptor attached to certificate requests.
///
/// # Invariants
/// - `info.ip` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Validated location attributes.
    info: LocationInfo,
}

impl Location {
    /// Creates a location from an IP address.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when `ip` is empty.
    pub fn new(ip: impl Into<String>) -> Result<Self, NotaryError> {
        Self::from_info(LocationInfo {
            ip: ip.into(),
            ..LocationInfo::default()
        })
    }

    /// Creates a location from a complete attribute set.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when `info.ip` is empty.
    pub fn from_info(info: LocationInfo) -> Result<Self, NotaryError> {
        ensure_ip(&info.ip)?;
        Ok(Self {
            info,
        })
    }

    /// Replaces every attribute at once.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when `info.ip` is empty; the
    /// current attributes are kept in that case.
    pub fn set_info(&mut self, info: LocationInfo) -> Result<(), NotaryError> {
        ensure_ip(&info.ip)?;
        self.info = info;
        Ok(())
    }

    /// Returns all attributes.
    #[must_use]
    pub const fn info(&self) -> &LocationInfo {
        &self.info
    }

    /// Returns the IP address.
    #[must_use]
    pub fn ip(&self) -> &str {
        &self.info.ip
    }

    /// Replaces the IP address.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when `ip` is empty.
    pub fn set_ip(&mut self, ip: impl Into<String>) -> Result<(), NotaryError> {
        let ip = ip.into();
        ensure_ip(&ip)?;
        self.info.ip = ip;
        Ok(())
    }

    /// Sets the Wi-Fi MAC address.
    #[must_use]
    pub fn with_wifi_mac(mut self, wifi_mac: impl Into<String>) -> Self {
        self.info.wifi_mac = Some(wifi_mac.into());
        self
    }

    /// Sets the device IMEI.
    #[must_use]
    pub fn with_imei(mut self, imei: impl Into<String>) -> Self {
        self.info.imei = Some(imei.into());
        self
    }

    /// Sets the subscriber IMSI.
    #[must_use]
    pub fn with_imsi(mut self, imsi: impl Into<String>) -> Self {
        self.info.imsi = Some(imsi.into());
        self
    }

    /// Sets latitude and longitude.
    #[must_use]
    pub fn with_position(
        mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        self.info.latitude = Some(latitude.into());
        self.info.longitude = Some(longitude.into());
        self
    }

    /// Sets extension properties.
    #[must_use]
    pub fn with_properties(mut self, properties: impl Into<String>) -> Self {
        self.info.properties = Some(properties.into());
        self
    }

    /// Serializes the location, omitting empty optional attributes.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        serde_json::to_value(&self.info).unwrap_or(Value::Null)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rejects empty IP addresses.
fn ensure_ip(ip: &str) -> Result<(), NotaryError> {
    if ip.trim().is_empty() {
        return Err(NotaryError::InvalidArgument("IP can not be empty".to_string()));
    }
    Ok(())
}

/// Serde predicate for absent or empty optional attributes.
#[allow(clippy::ref_option, reason = "Serde skip predicates receive a reference to the field.")]
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}
