use crate::model::fields::{take_object, take_typed};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Decoded body of a recent-listings search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPage {
    /// Total matches the remote reports for the query, not the page size
    #[serde(default)]
    pub num_found: u64,

    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// One marketplace-reported vehicle-for-sale record
///
/// Decoding never fails on a field's type. A known field that is null or of an
/// unexpected type is left in `extra` under its own key, so the listings
/// snapshot carries everything the remote returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Listing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub miles: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<Build>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dealer: Option<Dealer>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for Listing {
    fn from(mut raw: Map<String, Value>) -> Self {
        Self {
            vin: take_typed(&mut raw, "vin"),
            price: take_typed(&mut raw, "price"),
            miles: take_typed(&mut raw, "miles"),
            build: take_object(&mut raw, "build"),
            dealer: take_object(&mut raw, "dealer"),
            extra: raw,
        }
    }
}

impl Listing {
    /// Returns the VIN if the listing carries a usable one
    ///
    /// A missing or blank VIN means the listing has no identity.
    pub fn identity(&self) -> Option<&str> {
        self.vin
            .as_deref()
            .map(str::trim)
            .filter(|vin| !vin.is_empty())
    }
}

/// Build descriptor of a listed vehicle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Build {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for Build {
    fn from(mut raw: Map<String, Value>) -> Self {
        Self {
            make: take_typed(&mut raw, "make"),
            model: take_typed(&mut raw, "model"),
            year: take_typed(&mut raw, "year"),
            trim: take_typed(&mut raw, "trim"),
            extra: raw,
        }
    }
}

/// Dealer descriptor of a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Dealer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for Dealer {
    fn from(mut raw: Map<String, Value>) -> Self {
        Self {
            name: take_typed(&mut raw, "name"),
            city: take_typed(&mut raw, "city"),
            state: take_typed(&mut raw, "state"),
            extra: raw,
        }
    }
}
