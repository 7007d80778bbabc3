//! Product identifiers
//!
//! Products are a closed set. Untyped keys coming from the UI are parsed here
//! once; everything past this boundary works with checked [`ProductId`] values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EligibilityError;

/// Whether a product is sold as a main policy or attached as a rider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    Main,
    Rider,
}

/// Catalogued product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductId {
    /// Universal life, whole-of-life term
    #[serde(rename = "pul_tron_doi")]
    PulTronDoi,
    /// Universal life, 15-year premium term
    #[serde(rename = "pul_15_nam")]
    Pul15Nam,
    /// Universal life, 5-year premium term
    #[serde(rename = "pul_5_nam")]
    Pul5Nam,
    KhoeBinhAn,
    VungTamAn,
    AnBinhUuViet,
    /// Health care rider (renewable)
    HealthScl,
    /// Critical illness rider
    Bhn,
    /// Accidental death and disability rider
    Accident,
    /// Daily hospital cash rider
    HospitalSupport,
}

impl ProductId {
    /// Every catalogued product, mains first
    pub const ALL: [ProductId; 10] = [
        ProductId::PulTronDoi,
        ProductId::Pul15Nam,
        ProductId::Pul5Nam,
        ProductId::KhoeBinhAn,
        ProductId::VungTamAn,
        ProductId::AnBinhUuViet,
        ProductId::HealthScl,
        ProductId::Bhn,
        ProductId::Accident,
        ProductId::HospitalSupport,
    ];

    /// Returns the key used by the UI layer
    pub fn key(&self) -> &'static str {
        match self {
            ProductId::PulTronDoi => "pul_tron_doi",
            ProductId::Pul15Nam => "pul_15_nam",
            ProductId::Pul5Nam => "pul_5_nam",
            ProductId::KhoeBinhAn => "khoe_binh_an",
            ProductId::VungTamAn => "vung_tam_an",
            ProductId::AnBinhUuViet => "an_binh_uu_viet",
            ProductId::HealthScl => "health_scl",
            ProductId::Bhn => "bhn",
            ProductId::Accident => "accident",
            ProductId::HospitalSupport => "hospital_support",
        }
    }

    pub fn kind(&self) -> ProductKind {
        match self {
            ProductId::HealthScl
            | ProductId::Bhn
            | ProductId::Accident
            | ProductId::HospitalSupport => ProductKind::Rider,
            _ => ProductKind::Main,
        }
    }

    pub fn is_rider(&self) -> bool {
        self.kind() == ProductKind::Rider
    }

    /// Human-readable product name
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductId::PulTronDoi => "Linh Hoạt Trọn Đời",
            ProductId::Pul15Nam => "Linh Hoạt 15 Năm",
            ProductId::Pul5Nam => "Linh Hoạt 5 Năm",
            ProductId::KhoeBinhAn => "Khỏe Bình An",
            ProductId::VungTamAn => "Vững Tâm An",
            ProductId::AnBinhUuViet => "An Bình Ưu Việt",
            ProductId::HealthScl => "Chăm sóc sức khỏe",
            ProductId::Bhn => "Bệnh hiểm nghèo 2.0",
            ProductId::Accident => "Bảo hiểm tai nạn",
            ProductId::HospitalSupport => "Hỗ trợ chi phí nằm viện",
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ProductId {
    type Err = EligibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductId::ALL
            .iter()
            .copied()
            .find(|p| p.key() == s)
            .ok_or_else(|| EligibilityError::UnknownProduct(s.to_string()))
    }
}
