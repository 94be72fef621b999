use crate::api::ContactApi;
use crate::error::ApiError;
use crate::models::{ContactForm, InquiryType};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

const SENT_MESSAGE: &str = "Thank you for your message! We will get back to you soon.";
const REJECTED_MESSAGE: &str = "Failed to send message. Please try again.";
const UNREACHABLE_MESSAGE: &str = "Failed to send message. Please check your connection and try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Name is required")]
    NameRequired,
    #[error("Valid email address is required")]
    InvalidEmail,
    #[error("Valid phone number is required")]
    InvalidPhone,
    #[error("Subject is required")]
    SubjectRequired,
    #[error("Message is required")]
    MessageRequired,
    /// Backend refused or could not be reached; the text is ready to show
    #[error("{0}")]
    NotSent(String),
}

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_PATTERN: Regex = Regex::new(r"^(\+91)?[6-9][0-9]{9}$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Indian mobile numbers, optional +91 prefix, spaces ignored
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_PATTERN.is_match(&compact)
}

/// Reports the first failing rule
pub fn validate_contact_form(form: &ContactForm) -> Result<(), ContactError> {
    if form.name.trim().is_empty() {
        return Err(ContactError::NameRequired);
    }
    if !is_valid_email(&form.email) {
        return Err(ContactError::InvalidEmail);
    }
    if !is_valid_phone(&form.phone) {
        return Err(ContactError::InvalidPhone);
    }
    if form.subject.trim().is_empty() {
        return Err(ContactError::SubjectRequired);
    }
    if form.message.trim().is_empty() {
        return Err(ContactError::MessageRequired);
    }
    Ok(())
}

/// Used when the backend cannot supply its own list
pub fn default_inquiry_types() -> Vec<InquiryType> {
    vec![
        InquiryType::new("general", "General Inquiry"),
        InquiryType::new("property-inquiry", "Property Inquiry"),
        InquiryType::new("selling-inquiry", "Want to Sell Property"),
        InquiryType::new("support", "Technical Support"),
    ]
}

pub async fn load_inquiry_types(api: &dyn ContactApi) -> Vec<InquiryType> {
    match api.inquiry_types().await {
        Ok(types) if !types.is_empty() => types,
        Ok(_) => default_inquiry_types(),
        Err(e) => {
            warn!("Error loading inquiry types, using defaults: {}", e);
            default_inquiry_types()
        }
    }
}

/// Validate and send the form. On success the form is cleared and the
/// confirmation text returned; on failure the form is left as entered.
pub async fn submit_contact_form(api: &dyn ContactApi, form: &mut ContactForm) -> Result<String, ContactError> {
    validate_contact_form(form)?;

    match api.submit(form).await {
        Ok(ack) if ack.success => {
            info!("Contact form from {} accepted", form.email);
            *form = ContactForm::default();
            Ok(ack.message.unwrap_or_else(|| SENT_MESSAGE.to_string()))
        }
        Ok(ack) => Err(ContactError::NotSent(
            ack.message.unwrap_or_else(|| REJECTED_MESSAGE.to_string()),
        )),
        Err(ApiError::Validation { errors, .. }) => {
            Err(ContactError::NotSent(format!("Validation failed: {}", errors.join(", "))))
        }
        Err(ApiError::Server { message, .. }) if !message.trim().is_empty() => Err(ContactError::NotSent(message)),
        Err(e) => {
            warn!("Contact form submission error: {}", e);
            Err(ContactError::NotSent(UNREACHABLE_MESSAGE.to_string()))
        }
    }
}
