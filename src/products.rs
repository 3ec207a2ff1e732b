//! Products

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::validation::FieldErrors;

/// Store-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether a product is shown in the storefront and whether it can be bought.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Listed and purchasable.
    #[default]
    InStock,

    /// Listed but cannot be added to a cart.
    OutOfStock,

    /// Not listed in the storefront at all.
    Hidden,
}

impl Visibility {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::OutOfStock => "out_of_stock",
            Self::Hidden => "hidden",
        }
    }
}

/// Unknown visibility value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown product visibility: {0}")]
pub struct UnknownVisibility(pub String);

impl FromStr for Visibility {
    type Err = UnknownVisibility;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "in_stock" => Ok(Self::InStock),
            "out_of_stock" => Ok(Self::OutOfStock),
            "hidden" => Ok(Self::Hidden),
            other => Err(UnknownVisibility(other.to_string())),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DOSAGE_FORMS: [(&str, &str); 5] = [
    ("jiaonang", "Cápsula"),
    ("pian", "Comprimido"),
    ("wan", "Pílula"),
    ("spray", "Spray"),
    ("tubo", "Pomada"),
];

/// Dosage form label derived from a product name, if one of the known fragments appears in it.
pub fn dosage_form(name: &str) -> Option<&'static str> {
    let name = name.to_lowercase();

    DOSAGE_FORMS
        .iter()
        .find(|(fragment, _)| name.contains(fragment))
        .map(|(_, label)| *label)
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Base price in centavos
    pub price: u64,

    /// Discounted price in centavos
    pub promo_price: Option<u64>,

    /// First day the discounted price applies
    pub promo_start_date: Option<Date>,

    /// Last day the discounted price applies
    pub promo_end_date: Option<Date>,

    /// Image location
    pub image_url: String,

    /// Category
    pub category: String,

    /// What the product does
    pub action: Option<String>,

    /// What the product is indicated for
    pub indication: Option<String>,

    /// Package quantity description
    pub quantity_info: Option<String>,

    /// Storefront visibility
    pub visibility: Visibility,
}

impl Product {
    /// Assemble a product from its editable details, without a promotion.
    pub fn from_details(id: ProductId, details: ProductDetails) -> Self {
        Self {
            id,
            name: details.name,
            price: details.price,
            promo_price: None,
            promo_start_date: None,
            promo_end_date: None,
            image_url: details.image_url,
            category: details.category,
            action: details.action,
            indication: details.indication,
            quantity_info: details.quantity_info,
            visibility: details.visibility,
        }
    }

    /// Whether the product appears in the storefront.
    pub fn is_listed(&self) -> bool {
        self.visibility != Visibility::Hidden
    }

    /// Whether the product can be added to a cart.
    pub fn is_purchasable(&self) -> bool {
        self.visibility == Visibility::InStock
    }

    /// Dosage form label derived from the name.
    pub fn dosage_form(&self) -> Option<&'static str> {
        dosage_form(&self.name)
    }

    /// Whether there is any descriptive text worth showing in a detail view.
    pub fn has_details(&self) -> bool {
        [&self.action, &self.indication]
            .into_iter()
            .flatten()
            .any(|text| !text.trim().is_empty())
    }
}

/// Product fields an administrator edits through the product form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Display name
    pub name: String,

    /// Base price in centavos
    pub price: u64,

    /// Image location
    pub image_url: String,

    /// Category
    pub category: String,

    /// What the product does
    #[serde(default)]
    pub action: Option<String>,

    /// What the product is indicated for
    #[serde(default)]
    pub indication: Option<String>,

    /// Package quantity description
    #[serde(default)]
    pub quantity_info: Option<String>,

    /// Storefront visibility
    #[serde(default)]
    pub visibility: Visibility,
}

impl ProductDetails {
    /// Check the form rules, collecting one message per failing field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] when the name or category is blank, the price is zero, or the
    /// image URL is blank or malformed.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert("name", "Nome do produto é obrigatório.");
        }

        if self.category.trim().is_empty() {
            errors.insert("category", "Categoria é obrigatória.");
        }

        if self.price == 0 {
            errors.insert("price", "O preço deve ser maior que zero.");
        }

        let image_url = self.image_url.trim();

        if image_url.is_empty() {
            errors.insert("image_url", "URL da imagem é obrigatória.");
        } else if Url::parse(image_url).is_err() {
            errors.insert("image_url", "Por favor, insira uma URL válida.");
        }

        errors.into_result()
    }

    /// Trim text fields, upper-case the name and drop blank optional texts.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_uppercase(),
            price: self.price,
            image_url: self.image_url.trim().to_string(),
            category: self.category.trim().to_string(),
            action: non_blank(self.action),
            indication: non_blank(self.indication),
            quantity_info: non_blank(self.quantity_info),
            visibility: self.visibility,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ProductDetails {
        ProductDetails {
            name: " Liuwei Dihuang Wan ".to_string(),
            price: 4_500,
            image_url: "https://images.example.com/liuwei.png".to_string(),
            category: "Rins".to_string(),
            action: Some("  ".to_string()),
            indication: Some("Fadiga".to_string()),
            quantity_info: None,
            visibility: Visibility::InStock,
        }
    }

    #[test]
    fn dosage_form_matches_fragments_case_insensitively() {
        assert_eq!(dosage_form("XIAO YAO WAN"), Some("Pílula"));
        assert_eq!(dosage_form("Gan Mao Ling Pian"), Some("Comprimido"));
        assert_eq!(dosage_form("Yunnan Baiyao Spray"), Some("Spray"));
        assert_eq!(dosage_form("Pomada tubo 20g"), Some("Pomada"));
        assert_eq!(dosage_form("Chá verde"), None);
    }

    #[test]
    fn dosage_form_prefers_the_first_known_fragment() {
        assert_eq!(dosage_form("jiaonang pian"), Some("Cápsula"));
    }

    #[test]
    fn visibility_round_trips_through_its_storage_string() {
        for visibility in [
            Visibility::InStock,
            Visibility::OutOfStock,
            Visibility::Hidden,
        ] {
            assert_eq!(visibility.as_str().parse::<Visibility>(), Ok(visibility));
        }

        assert!("sold".parse::<Visibility>().is_err());
    }

    #[test]
    fn valid_details_pass() {
        assert!(details().validate().is_ok());
    }

    #[test]
    fn validation_reports_every_failing_field() {
        let invalid = ProductDetails {
            name: "   ".to_string(),
            price: 0,
            image_url: "not a url".to_string(),
            category: String::new(),
            ..details()
        };

        let Err(errors) = invalid.validate() else {
            panic!("expected validation errors");
        };

        assert_eq!(errors.get("name"), Some("Nome do produto é obrigatório."));
        assert_eq!(errors.get("category"), Some("Categoria é obrigatória."));
        assert_eq!(errors.get("price"), Some("O preço deve ser maior que zero."));
        assert_eq!(
            errors.get("image_url"),
            Some("Por favor, insira uma URL válida.")
        );
    }

    #[test]
    fn blank_image_url_is_reported_as_missing() {
        let invalid = ProductDetails {
            image_url: " ".to_string(),
            ..details()
        };

        let Err(errors) = invalid.validate() else {
            panic!("expected validation errors");
        };

        assert_eq!(errors.get("image_url"), Some("URL da imagem é obrigatória."));
    }

    #[test]
    fn normalized_upper_cases_name_and_drops_blank_texts() {
        let normalized = details().normalized();

        assert_eq!(normalized.name, "LIUWEI DIHUANG WAN");
        assert_eq!(normalized.action, None);
        assert_eq!(normalized.indication.as_deref(), Some("Fadiga"));
    }

    #[test]
    fn listing_and_purchasing_follow_visibility() {
        let mut product = Product::from_details(ProductId::new(1), details());

        assert!(product.is_listed());
        assert!(product.is_purchasable());

        product.visibility = Visibility::OutOfStock;
        assert!(product.is_listed());
        assert!(!product.is_purchasable());

        product.visibility = Visibility::Hidden;
        assert!(!product.is_listed());
        assert!(!product.is_purchasable());
    }

    #[test]
    fn has_details_ignores_blank_text() {
        let mut product = Product::from_details(ProductId::new(1), details());

        assert!(product.has_details());

        product.indication = None;
        assert!(!product.has_details());
    }
}
