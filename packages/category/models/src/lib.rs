#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Business category catalog.
//!
//! This crate defines the fixed set of business categories every region is
//! scored against. Input providers refer to categories by their display
//! label (e.g. `"Pet Shop"`); the analyzers match those labels
//! case-insensitively against [`BusinessCategory::label`].

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A business category from the fixed catalog.
///
/// Variant order is the catalog order. Rankings that tie on score keep
/// this order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum BusinessCategory {
    /// Pet supplies and grooming
    #[serde(rename = "Pet Shop")]
    #[strum(to_string = "Pet Shop", serialize = "pet_shop")]
    PetShop,
    /// Barbershop
    #[serde(rename = "Barbershop")]
    #[strum(to_string = "Barbershop", serialize = "barbershop")]
    Barbershop,
    /// Pharmacy / drugstore
    #[serde(rename = "Pharmacy")]
    #[strum(to_string = "Pharmacy", serialize = "pharmacy")]
    Pharmacy,
    /// Bakery
    #[serde(rename = "Bakery")]
    #[strum(to_string = "Bakery", serialize = "bakery")]
    Bakery,
    /// Restaurant
    #[serde(rename = "Restaurant")]
    #[strum(to_string = "Restaurant", serialize = "restaurant")]
    Restaurant,
    /// Clothing store
    #[serde(rename = "Clothing Store")]
    #[strum(to_string = "Clothing Store", serialize = "clothing_store")]
    ClothingStore,
    /// Supermarket
    #[serde(rename = "Supermarket")]
    #[strum(to_string = "Supermarket", serialize = "supermarket")]
    Supermarket,
    /// Gym / fitness center
    #[serde(rename = "Gym")]
    #[strum(to_string = "Gym", serialize = "gym")]
    Gym,
    /// Beauty salon
    #[serde(rename = "Beauty Salon")]
    #[strum(to_string = "Beauty Salon", serialize = "beauty_salon")]
    BeautySalon,
    /// Electronics store
    #[serde(rename = "Electronics Store")]
    #[strum(to_string = "Electronics Store", serialize = "electronics_store")]
    ElectronicsStore,
    /// Gas station
    #[serde(rename = "Gas Station")]
    #[strum(to_string = "Gas Station", serialize = "gas_station")]
    GasStation,
    /// Bank branch
    #[serde(rename = "Bank")]
    #[strum(to_string = "Bank", serialize = "bank")]
    Bank,
}

impl BusinessCategory {
    /// Returns the display label used by input providers and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PetShop => "Pet Shop",
            Self::Barbershop => "Barbershop",
            Self::Pharmacy => "Pharmacy",
            Self::Bakery => "Bakery",
            Self::Restaurant => "Restaurant",
            Self::ClothingStore => "Clothing Store",
            Self::Supermarket => "Supermarket",
            Self::Gym => "Gym",
            Self::BeautySalon => "Beauty Salon",
            Self::ElectronicsStore => "Electronics Store",
            Self::GasStation => "Gas Station",
            Self::Bank => "Bank",
        }
    }

    /// Returns `true` if `label` names this category, ignoring case.
    #[must_use]
    pub fn matches_label(self, label: &str) -> bool {
        label.to_lowercase() == self.label().to_lowercase()
    }

    /// Looks up a category by its display label, ignoring case.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|category| category.matches_label(label))
    }

    /// Returns all variants in catalog order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::PetShop,
            Self::Barbershop,
            Self::Pharmacy,
            Self::Bakery,
            Self::Restaurant,
            Self::ClothingStore,
            Self::Supermarket,
            Self::Gym,
            Self::BeautySalon,
            Self::ElectronicsStore,
            Self::GasStation,
            Self::Bank,
        ]
    }
}
