// crates/netcourt-core/src/business.rs
// ============================================================================
// Module: NetCourt Business Descriptor
// Description: Business and sub-business classification for notary requests.
// Purpose: Validate biz/subBiz pairs before they reach a signed payload.
// Dependencies: crate::error
// ============================================================================

//! ## Overview
//! A [`Business`] pairs a coarse [`BizKind`] (copyright or contract) with an
//! optional [`SubBiz`] drawn from the set that belongs to that kind.
//! Invariants:
//! - The stored sub-business always belongs to the stored kind.
//! - Invalid values are rejected at set-time; no partial state is kept.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::NotaryError;

// ============================================================================
// SECTION: Business Kind
// ============================================================================

/// Coarse business classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BizKind {
    /// Copyright evidence (`bizId = 1`).
    Copyright,
    /// Contract evidence (`bizId = 2`).
    Contract,
}

impl BizKind {
    /// Returns the numeric business id sent to backends.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Copyright => 1,
            Self::Contract => 2,
        }
    }

    /// Resolves a numeric business id.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] for zero or unknown ids.
    pub fn from_id(id: i64) -> Result<Self, NotaryError> {
        match id {
            0 => Err(NotaryError::InvalidArgument("Biz id can not be empty".to_string())),
            1 => Ok(Self::Copyright),
            2 => Ok(Self::Contract),
            _ => Err(NotaryError::InvalidArgument("Biz id can only be 1 or 2".to_string())),
        }
    }

    /// Returns the sub-businesses permitted for this kind.
    #[must_use]
    pub const fn sub_businesses(self) -> &'static [SubBiz] {
        match self {
            Self::Copyright => &COPYRIGHT_SUB_BIZ,
            Self::Contract => &CONTRACT_SUB_BIZ,
        }
    }

    /// Lowercase label used in validation messages.
    const fn label(self) -> &'static str {
        match self {
            Self::Copyright => "copyright",
            Self::Contract => "contract",
        }
    }
}

// ============================================================================
// SECTION: Sub-Business
// ============================================================================

/// Fine-grained business classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubBiz {
    /// Audio copyright.
    Audio,
    /// Video copyright.
    Video,
    /// Image copyright.
    Image,
    /// Text copyright.
    Text,
    /// Human-resources contract.
    Hr,
    /// House renting contract.
    HouseRenting,
    /// Leasing contract.
    Leasing,
    /// Supply chain contract.
    SupplyChain,
    /// Travel contract.
    Travel,
    /// Education contract.
    Education,
    /// Insurance contract.
    Insurance,
}

/// Sub-businesses permitted for [`BizKind::Copyright`].
pub const COPYRIGHT_SUB_BIZ: [SubBiz; 4] =
    [SubBiz::Audio, SubBiz::Video, SubBiz::Image, SubBiz::Text];

/// Sub-businesses permitted for [`BizKind::Contract`].
pub const CONTRACT_SUB_BIZ: [SubBiz; 7] = [
    SubBiz::Hr,
    SubBiz::HouseRenting,
    SubBiz::Leasing,
    SubBiz::SupplyChain,
    SubBiz::Travel,
    SubBiz::Education,
    SubBiz::Insurance,
];

impl SubBiz {
    /// Returns the wire code for the sub-business.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "AUDIO",
            Self::Video => "VIDEO",
            Self::Image => "IMAGE",
            Self::Text => "TEXT",
            Self::Hr => "HR",
            Self::HouseRenting => "HOUSERENTING",
            Self::Leasing => "LEASING",
            Self::SupplyChain => "SUPPLY_CHAIN",
            Self::Travel => "TRAVEL",
            Self::Education => "EDUCATION",
            Self::Insurance => "INSURANCE",
        }
    }

    /// Returns the business kind this sub-business belongs to.
    #[must_use]
    pub const fn kind(self) -> BizKind {
        match self {
            Self::Audio | Self::Video | Self::Image | Self::Text => BizKind::Copyright,
            _ => BizKind::Contract,
        }
    }
}

impl fmt::Display for SubBiz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubBiz {
    type Err = NotaryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        COPYRIGHT_SUB_BIZ
            .iter()
            .chain(CONTRACT_SUB_BIZ.iter())
            .copied()
            .find(|sub| sub.as_str() == value)
            .ok_or_else(|| NotaryError::InvalidArgument(format!("unknown sub biz id: {value}")))
    }
}

// ============================================================================
// SECTION: Business
// ============================================================================

/// Business descriptor attached to token requests.
///
/// # Invariants
/// - `sub_biz`, when present, belongs to `biz.sub_businesses()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Business {
    /// Coarse classification.
    biz: BizKind,
    /// Optional fine-grained classification.
    sub_biz: Option<SubBiz>,
}

impl Business {
    /// Builds a business from a numeric id and an optional sub-business code.
    ///
    /// An empty sub-business code is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] for unknown ids or codes that do
    /// not belong to the business kind.
    pub fn new(biz: i64, sub_biz: Option<&str>) -> Result<Self, NotaryError> {
        let biz = BizKind::from_id(biz)?;
        let sub_biz = parse_sub_biz(biz, sub_biz)?;
        Ok(Self {
            biz,
            sub_biz,
        })
    }

    /// Builds a business from already-typed parts.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when `sub_biz` belongs to the
    /// other kind.
    pub fn from_parts(biz: BizKind, sub_biz: Option<SubBiz>) -> Result<Self, NotaryError> {
        if let Some(sub) = sub_biz {
            ensure_belongs(biz, sub)?;
        }
        Ok(Self {
            biz,
            sub_biz,
        })
    }

    /// Returns the business kind.
    #[must_use]
    pub const fn biz(&self) -> BizKind {
        self.biz
    }

    /// Returns the numeric business id.
    #[must_use]
    pub const fn biz_id(&self) -> u8 {
        self.biz.id()
    }

    /// Returns the sub-business, when set.
    #[must_use]
    pub const fn sub_biz(&self) -> Option<SubBiz> {
        self.sub_biz
    }

    /// Replaces the business id, re-checking any stored sub-business.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the id is invalid or the
    /// current sub-business does not belong to the new kind.
    pub fn set_biz(&mut self, biz: i64) -> Result<(), NotaryError> {
        let biz = BizKind::from_id(biz)?;
        if let Some(sub) = self.sub_biz {
            ensure_belongs(biz, sub)?;
        }
        self.biz = biz;
        Ok(())
    }

    /// Replaces the sub-business; `None` or an empty code clears it.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the code does not belong to
    /// the current business kind.
    pub fn set_sub_biz(&mut self, sub_biz: Option<&str>) -> Result<(), NotaryError> {
        self.sub_biz = parse_sub_biz(self.biz, sub_biz)?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses an optional sub-business code against a business kind.
fn parse_sub_biz(biz: BizKind, raw: Option<&str>) -> Result<Option<SubBiz>, NotaryError> {
    let Some(raw) = raw.filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    let sub = raw.parse::<SubBiz>().map_err(|_| not_in_set(biz))?;
    ensure_belongs(biz, sub)?;
    Ok(Some(sub))
}

/// Fails when `sub` is not part of the permitted set for `biz`.
fn ensure_belongs(biz: BizKind, sub: SubBiz) -> Result<(), NotaryError> {
    if biz.sub_businesses().contains(&sub) {
        Ok(())
    } else {
        Err(not_in_set(biz))
    }
}

/// Builds the validation error listing the permitted codes for `biz`.
fn not_in_set(biz: BizKind) -> NotaryError {
    let codes: Vec<&str> = biz.sub_businesses().iter().map(|sub| sub.as_str()).collect();
    NotaryError::InvalidArgument(format!(
        "Sub biz id of {} can only be {}",
        biz.label(),
        codes.join(", ")
    ))
}
