use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod contact;
pub mod draft;
pub mod listing;
pub mod user;

pub use contact::{ContactForm, InquiryType};
pub use draft::{
    Amenities, Area, ContactPreferences, Coordinates, Features, Floor, ImageFile, Location, Price,
    PropertyDraft,
};
pub use listing::{AdminQuery, Listing, ListingFilters, ListingPage, Pagination};
pub use user::{AuthSession, Credentials, Registration, User};

/// Returned when a string does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed set of backend string values together with display labels.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($variant:ident => $value:literal, $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $value)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire value sent to and received from the backend
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// Kind of property being listed
    PropertyType("property type") {
        Apartment => "apartment", "Apartment",
        Villa => "villa", "Villa",
        House => "house", "House",
        Plot => "plot", "Plot",
        Commercial => "commercial", "Commercial",
        Office => "office", "Office",
        Shop => "shop", "Shop",
        Warehouse => "warehouse", "Warehouse",
    }
}

string_enum! {
    /// Listing category
    Category("category") {
        Sale => "sale", "For Sale",
        Rent => "rent", "For Rent",
        Lease => "lease", "For Lease",
    }
}

string_enum! {
    AreaUnit("area unit") {
        SquareFeet => "sqft", "Sq Ft",
        SquareMeters => "sqm", "Sq M",
        Acres => "acres", "Acres",
    }
}

string_enum! {
    Furnished("furnishing") {
        Fully => "fully-furnished", "Fully Furnished",
        Semi => "semi-furnished", "Semi Furnished",
        Unfurnished => "unfurnished", "Unfurnished",
    }
}

string_enum! {
    Facing("facing") {
        North => "north", "North",
        South => "south", "South",
        East => "east", "East",
        West => "west", "West",
        NorthEast => "north-east", "North-East",
        NorthWest => "north-west", "North-West",
        SouthEast => "south-east", "South-East",
        SouthWest => "south-west", "South-West",
    }
}

string_enum! {
    /// Review status of a listing, owned by the backend
    PropertyStatus("status") {
        Pending => "pending", "Pending Approval",
        Approved => "approved", "Approved",
        Rejected => "rejected", "Rejected",
        Sold => "sold", "Sold",
        Rented => "rented", "Rented",
        Inactive => "inactive", "Inactive",
    }
}

string_enum! {
    Role("role") {
        Buyer => "buyer", "Buyer",
        Seller => "seller", "Seller",
        Admin => "admin", "Admin",
    }
}

string_enum! {
    SortKey("sort key") {
        CreatedAt => "createdAt", "Date listed",
        Price => "price", "Price",
        Area => "area", "Area",
        Name => "name", "Name",
    }
}

string_enum! {
    SortOrder("sort order") {
        Asc => "asc", "Ascending",
        Desc => "desc", "Descending",
    }
}

impl Default for AreaUnit {
    fn default() -> Self {
        AreaUnit::SquareFeet
    }
}

impl Default for Furnished {
    fn default() -> Self {
        Furnished::Unfurnished
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::CreatedAt
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_values() {
        assert_eq!("north-east".parse::<Facing>(), Ok(Facing::NorthEast));
        assert_eq!("createdAt".parse::<SortKey>(), Ok(SortKey::CreatedAt));
        let err = "castle".parse::<PropertyType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown property type 'castle'");
    }

    #[test]
    fn serializes_with_backend_names() {
        let json = serde_json::to_string(&Furnished::Semi).unwrap();
        assert_eq!(json, "\"semi-furnished\"");
        let status: PropertyStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, PropertyStatus::Rejected);
        assert_eq!(status.label(), "Rejected");
    }
}
