use serde::{Deserialize, Serialize};

/// Fulfilment type of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Downloadable,
    Deliverable,
}

impl ProductType {
    pub fn code(&self) -> &'static str {
        match self {
            ProductType::Downloadable => "downloadable",
            ProductType::Deliverable => "deliverable",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::Downloadable => "Downloadable",
            ProductType::Deliverable => "Deliverable",
        }
    }

    pub fn all() -> Vec<ProductType> {
        vec![ProductType::Downloadable, ProductType::Deliverable]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "downloadable" => Some(ProductType::Downloadable),
            "deliverable" => Some(ProductType::Deliverable),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
