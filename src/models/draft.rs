use super::{AreaUnit, Category, Facing, Furnished, PropertyType};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Amenity tags offered on the submission form
pub const AMENITY_CATALOGUE: &[&str] = &[
    "gym",
    "swimming-pool",
    "garden",
    "playground",
    "security",
    "parking",
    "elevator",
    "power-backup",
    "water-supply",
    "club-house",
    "jogging-track",
    "tennis-court",
    "basketball-court",
    "library",
    "party-hall",
    "spa",
    "yoga-room",
    "meditation-hall",
    "intercom",
    "waste-management",
    "wifi",
];

/// Property record accumulated by the submission wizard.
///
/// Text inputs are kept exactly as typed; nothing here is parsed until the
/// step validators run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: Option<PropertyType>,
    pub category: Option<Category>,
    pub price: Price,
    pub area: Area,
    pub location: Location,
    pub features: Features,
    pub amenities: Amenities,
    pub contact: ContactPreferences,
    #[serde(skip)]
    pub images: Vec<ImageFile>,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            kind: Some(PropertyType::Apartment),
            category: Some(Category::Sale),
            price: Price::default(),
            area: Area::default(),
            location: Location::default(),
            features: Features::default(),
            amenities: Amenities::default(),
            contact: ContactPreferences::default(),
            images: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub amount: String,
    pub currency: String,
    pub negotiable: bool,
}

impl Default for Price {
    fn default() -> Self {
        Self {
            amount: String::new(),
            currency: "INR".to_string(),
            negotiable: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Area {
    pub size: String,
    pub unit: AreaUnit,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub coordinates: Coordinates,
    pub landmark: String,
    pub neighborhood: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub balconies: u32,
    pub parking: u32,
    pub furnished: Furnished,
    pub floor: Floor,
    pub age: String,
    #[serde(with = "blank_facing")]
    pub facing: Option<Facing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Floor {
    pub current: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactPreferences {
    pub show_owner_details: bool,
    pub preferred_time: String,
    pub additional_phone: String,
}

impl Default for ContactPreferences {
    fn default() -> Self {
        Self {
            show_owner_details: true,
            preferred_time: String::new(),
            additional_phone: String::new(),
        }
    }
}

/// Ordered set of amenity tags. Membership is toggled, never duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Amenities(Vec<String>);

impl Amenities {
    /// Adds the tag if absent, removes it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, amenity: &str) -> bool {
        if let Some(pos) = self.0.iter().position(|a| a == amenity) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(amenity.to_string());
            true
        }
    }

    pub fn contains(&self, amenity: &str) -> bool {
        self.0.iter().any(|a| a == amenity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for Amenities {
    fn from(tags: Vec<String>) -> Self {
        let mut amenities = Amenities::default();
        for tag in tags {
            if !amenities.contains(&tag) {
                amenities.0.push(tag);
            }
        }
        amenities
    }
}

impl From<Amenities> for Vec<String> {
    fn from(amenities: Amenities) -> Self {
        amenities.0
    }
}

/// A local image selected for upload
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, guessing its content type from the extension
    pub async fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self {
            content_type: content_type_for(path).to_string(),
            file_name,
            bytes,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Unset facing travels as an empty string, matching the form's blank option.
mod blank_facing {
    use super::Facing;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(facing: &Option<Facing>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(facing.map(|f| f.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Facing>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(serde::de::Error::custom)
    }
}
