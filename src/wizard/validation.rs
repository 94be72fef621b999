use crate::models::{ImageFile, Location, PropertyDraft};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

pub const MAX_IMAGES: usize = 10;
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MIN_TITLE_CHARS: usize = 5;
pub const MIN_DESCRIPTION_CHARS: usize = 20;

const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// First failing rule of a wizard step. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all required fields in Step 1")]
    MissingBasicInfo,
    #[error("Title must be at least 5 characters")]
    TitleTooShort,
    #[error("Description must be at least 20 characters")]
    DescriptionTooShort,
    #[error("Please fill all required location fields")]
    MissingLocation,
    #[error("Please enter a valid 6-digit pincode")]
    InvalidPincode,
    #[error("Please enter valid coordinates")]
    InvalidCoordinates,
    #[error("Please upload at least one property image")]
    NoImages,
    #[error("Maximum 10 images allowed")]
    TooManyImages,
    #[error("{0} is not a valid image file")]
    UnsupportedImage(String),
    #[error("{0} is too large. Maximum size is 5MB")]
    ImageTooLarge(String),
}

lazy_static! {
    static ref PINCODE_PATTERN: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Step 1: title, description, type, category, price and area
pub fn validate_basic_info(draft: &PropertyDraft) -> Result<(), ValidationError> {
    if blank(&draft.title)
        || blank(&draft.description)
        || draft.kind.is_none()
        || draft.category.is_none()
        || blank(&draft.price.amount)
        || blank(&draft.area.size)
    {
        return Err(ValidationError::MissingBasicInfo);
    }

    if char_len(&draft.title) < MIN_TITLE_CHARS {
        return Err(ValidationError::TitleTooShort);
    }

    if char_len(&draft.description) < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooShort);
    }

    Ok(())
}

/// Step 2: address fields, pincode format and coordinate ranges
pub fn validate_location(location: &Location) -> Result<(), ValidationError> {
    let coordinates = &location.coordinates;
    if blank(&location.address)
        || blank(&location.city)
        || blank(&location.state)
        || blank(&location.pincode)
        || blank(&coordinates.latitude)
        || blank(&coordinates.longitude)
    {
        return Err(ValidationError::MissingLocation);
    }

    if !PINCODE_PATTERN.is_match(&location.pincode) {
        return Err(ValidationError::InvalidPincode);
    }

    let latitude = parse_coordinate(&coordinates.latitude)?;
    let longitude = parse_coordinate(&coordinates.longitude)?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::InvalidCoordinates);
    }

    Ok(())
}

fn parse_coordinate(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(ValidationError::InvalidCoordinates)
}

/// Step 3: at least one image selected
pub fn validate_images(images: &[ImageFile]) -> Result<(), ValidationError> {
    if images.is_empty() {
        return Err(ValidationError::NoImages);
    }
    if images.len() > MAX_IMAGES {
        return Err(ValidationError::TooManyImages);
    }
    Ok(())
}

/// Per-file type and size rules applied before an image joins the draft
pub fn validate_image(image: &ImageFile) -> Result<(), ValidationError> {
    if !ALLOWED_IMAGE_TYPES.contains(&image.content_type.as_str()) {
        return Err(ValidationError::UnsupportedImage(image.file_name.clone()));
    }
    if image.size() > MAX_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge(image.file_name.clone()));
    }
    Ok(())
}

/// All three step validators in order, reporting the first failure
pub fn validate_all(draft: &PropertyDraft) -> Result<(), ValidationError> {
    validate_basic_info(draft)?;
    validate_location(&draft.location)?;
    validate_images(&draft.images)
}
