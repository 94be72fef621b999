//! Four-step property submission wizard.
//!
//! The wizard owns a [`PropertyDraft`] and a [`Step`]. Each step has one
//! validator; [`Wizard::advance`] only moves forward when the current step
//! validates, [`Wizard::retreat`] always moves back, and submission is only
//! possible from [`Step::Review`] after every validator passes again.

pub mod payload;
pub mod update;
pub mod validation;

pub use payload::SubmissionPayload;
pub use update::{BasicInfoUpdate, ContactUpdate, DraftUpdate, FeaturesUpdate, LocationUpdate};
pub use validation::{ValidationError, MAX_IMAGES};

use crate::api::{Ack, PropertyApi};
use crate::error::ApiError;
use crate::models::{ImageFile, PropertyDraft};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Notification shown after an accepted submission
pub const SUBMITTED_MESSAGE: &str = "Property submitted successfully! It will be reviewed by our admin team.";

/// Notification used when the backend rejects a submission without a usable message
pub const SUBMIT_FALLBACK: &str = "Failed to submit property. Please check all fields and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    BasicInfo,
    Location,
    ImagesFeatures,
    Review,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::BasicInfo, Step::Location, Step::ImagesFeatures, Step::Review];

    /// 1-based position shown in the progress bar
    pub fn number(self) -> u8 {
        match self {
            Step::BasicInfo => 1,
            Step::Location => 2,
            Step::ImagesFeatures => 3,
            Step::Review => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::BasicInfo => "Basic Info",
            Step::Location => "Location",
            Step::ImagesFeatures => "Images & Features",
            Step::Review => "Review & Submit",
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::BasicInfo => Some(Step::Location),
            Step::Location => Some(Step::ImagesFeatures),
            Step::ImagesFeatures => Some(Step::Review),
            Step::Review => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::BasicInfo => None,
            Step::Location => Some(Step::BasicInfo),
            Step::ImagesFeatures => Some(Step::Location),
            Step::Review => Some(Step::ImagesFeatures),
        }
    }

    /// Run this step's validator. The review step has none of its own.
    pub fn validate(self, draft: &PropertyDraft) -> Result<(), ValidationError> {
        match self {
            Step::BasicInfo => validation::validate_basic_info(draft),
            Step::Location => validation::validate_location(&draft.location),
            Step::ImagesFeatures => validation::validate_images(&draft.images),
            Step::Review => Ok(()),
        }
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Review your listing before submitting")]
    NotAtReview,

    #[error("Submission already in progress")]
    InFlight,

    #[error("Could not encode property details: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl WizardError {
    /// Text for the transient notification
    pub fn notification(&self) -> String {
        match self {
            WizardError::Api(e) => e.notification(SUBMIT_FALLBACK),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Wizard {
    draft: PropertyDraft,
    step: Step,
    in_flight: bool,
}

impl Default for Step {
    fn default() -> Self {
        Step::BasicInfo
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-filled draft, e.g. one loaded from a file
    pub fn with_draft(draft: PropertyDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &PropertyDraft {
        &self.draft
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// True between `begin_submit` and `finish_submit`; the submit control is disabled meanwhile
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn update(&mut self, update: impl Into<DraftUpdate>) {
        update.into().apply(&mut self.draft);
    }

    /// Returns whether the amenity is selected afterwards
    pub fn toggle_amenity(&mut self, amenity: &str) -> bool {
        self.draft.amenities.toggle(amenity)
    }

    /// Fill both coordinates at once, as a geolocation lookup would
    pub fn use_coordinates(&mut self, latitude: f64, longitude: f64) {
        self.draft.location.coordinates.latitude = latitude.to_string();
        self.draft.location.coordinates.longitude = longitude.to_string();
    }

    /// Replace the image selection. Rejected as a whole if any file is invalid
    /// or there are more than [`MAX_IMAGES`].
    pub fn select_images(&mut self, images: Vec<ImageFile>) -> Result<(), ValidationError> {
        check_batch(0, &images)?;
        self.draft.images = images;
        Ok(())
    }

    /// Append to the image selection without exceeding [`MAX_IMAGES`]
    pub fn add_images(&mut self, images: Vec<ImageFile>) -> Result<(), ValidationError> {
        check_batch(self.draft.images.len(), &images)?;
        self.draft.images.extend(images);
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize) -> Option<ImageFile> {
        if index < self.draft.images.len() {
            Some(self.draft.images.remove(index))
        } else {
            None
        }
    }

    /// Move to the next step if the current one validates
    pub fn advance(&mut self) -> Result<Step, ValidationError> {
        if let Err(e) = self.step.validate(&self.draft) {
            debug!("Step {} blocked: {}", self.step.number(), e);
            return Err(e);
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn retreat(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Validate everything and package the draft for sending.
    ///
    /// On success the wizard is marked in flight until [`Wizard::finish_submit`].
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, WizardError> {
        if self.in_flight {
            return Err(WizardError::InFlight);
        }
        if self.step != Step::Review {
            return Err(WizardError::NotAtReview);
        }
        validation::validate_all(&self.draft)?;

        let payload = SubmissionPayload::from_draft(&self.draft)?;
        self.in_flight = true;
        Ok(payload)
    }

    /// Apply the backend's answer. Success clears the wizard; failure keeps
    /// every entered value so the user can fix and resend.
    pub fn finish_submit(&mut self, outcome: Result<Ack, ApiError>) -> Result<Ack, WizardError> {
        self.in_flight = false;
        match outcome {
            Ok(ack) => {
                info!("✅ Property submitted: {}", self.draft.title);
                self.reset();
                Ok(ack)
            }
            Err(e) => {
                warn!("Property submission rejected: {}", e);
                Err(WizardError::Api(e))
            }
        }
    }

    pub async fn submit(&mut self, api: &dyn PropertyApi) -> Result<Ack, WizardError> {
        let payload = self.begin_submit()?;
        let outcome = api.create(payload).await;
        self.finish_submit(outcome)
    }

    /// Back to an empty draft at step 1
    pub fn reset(&mut self) {
        self.draft = PropertyDraft::default();
        self.step = Step::BasicInfo;
        self.in_flight = false;
    }
}

fn check_batch(existing: usize, images: &[ImageFile]) -> Result<(), ValidationError> {
    if existing + images.len() > MAX_IMAGES {
        return Err(ValidationError::TooManyImages);
    }
    images.iter().try_for_each(validation::validate_image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, PropertyType};
    use crate::testing::{jpeg, valid_draft, RecordingPropertyApi};
    use serde_json::Value;

    fn at_review() -> Wizard {
        let mut wizard = Wizard::with_draft(valid_draft());
        wizard.add_images(vec![jpeg("front.jpg")]).unwrap();
        for _ in 0..3 {
            wizard.advance().unwrap();
        }
        assert_eq!(wizard.step(), Step::Review);
        wizard
    }

    #[test]
    fn step_one_scenario_advances() {
        let mut wizard = Wizard::new();
        wizard.update(BasicInfoUpdate::Title("Nice Flat".to_string()));
        wizard.update(BasicInfoUpdate::Description("Spacious two bedroom flat".to_string()));
        wizard.update(BasicInfoUpdate::Type(Some(PropertyType::Apartment)));
        wizard.update(BasicInfoUpdate::Category(Some(Category::Sale)));
        wizard.update(BasicInfoUpdate::PriceAmount("500000".to_string()));
        wizard.update(BasicInfoUpdate::AreaSize("1000".to_string()));

        assert_eq!(wizard.draft().description.chars().count(), 25);
        assert_eq!(wizard.advance(), Ok(Step::Location));
        assert_eq!(wizard.step().number(), 2);
    }

    #[test]
    fn short_pincode_keeps_step_two() {
        let mut wizard = Wizard::with_draft(valid_draft());
        wizard.advance().unwrap();
        wizard.update(LocationUpdate::Pincode("12345".to_string()));

        assert_eq!(wizard.advance(), Err(ValidationError::InvalidPincode));
        assert_eq!(wizard.step(), Step::Location);
        assert_eq!(wizard.draft().location.pincode, "12345");
    }

    #[test]
    fn cannot_leave_step_one_with_incomplete_basics() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.advance(), Err(ValidationError::MissingBasicInfo));
        assert_eq!(wizard.step(), Step::BasicInfo);
    }

    #[test]
    fn step_three_needs_an_image() {
        let mut wizard = Wizard::with_draft(valid_draft());
        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.advance(), Err(ValidationError::NoImages));
        assert_eq!(wizard.step(), Step::ImagesFeatures);
    }

    #[test]
    fn retreat_stops_at_first_step() {
        let mut wizard = at_review();
        assert_eq!(wizard.retreat(), Step::ImagesFeatures);
        assert_eq!(wizard.retreat(), Step::Location);
        assert_eq!(wizard.retreat(), Step::BasicInfo);
        assert_eq!(wizard.retreat(), Step::BasicInfo);
    }

    #[test]
    fn advance_stops_at_review() {
        let mut wizard = at_review();
        assert_eq!(wizard.advance(), Ok(Step::Review));
    }

    #[test]
    fn eleventh_image_is_rejected() {
        let mut wizard = Wizard::new();
        let ten: Vec<_> = (0..10).map(|i| jpeg(&format!("{i}.jpg"))).collect();
        wizard.add_images(ten).unwrap();
        let before = wizard.draft().images.clone();

        assert_eq!(wizard.add_images(vec![jpeg("11.jpg")]), Err(ValidationError::TooManyImages));
        assert_eq!(wizard.draft().images, before);

        let eleven: Vec<_> = (0..11).map(|i| jpeg(&format!("{i}.jpg"))).collect();
        assert_eq!(wizard.select_images(eleven), Err(ValidationError::TooManyImages));
        assert_eq!(wizard.draft().images, before);
    }

    #[test]
    fn invalid_file_rejects_whole_batch() {
        let mut wizard = Wizard::new();
        let batch = vec![jpeg("ok.jpg"), ImageFile::new("doc.pdf", "application/pdf", vec![1])];
        assert!(matches!(wizard.add_images(batch), Err(ValidationError::UnsupportedImage(_))));
        assert!(wizard.draft().images.is_empty());
    }

    #[test]
    fn remove_image_by_index() {
        let mut wizard = Wizard::new();
        wizard.add_images(vec![jpeg("a.jpg"), jpeg("b.jpg")]).unwrap();
        assert_eq!(wizard.remove_image(0).map(|i| i.file_name), Some("a.jpg".to_string()));
        assert!(wizard.remove_image(5).is_none());
        assert_eq!(wizard.draft().images.len(), 1);
    }

    #[test]
    fn submit_only_from_review() {
        let mut wizard = Wizard::with_draft(valid_draft());
        assert!(matches!(wizard.begin_submit(), Err(WizardError::NotAtReview)));
    }

    #[test]
    fn submit_revalidates_every_step() {
        let mut wizard = at_review();
        wizard.update(BasicInfoUpdate::Title("abc".to_string()));

        let err = wizard.begin_submit().unwrap_err();
        assert_eq!(err.notification(), "Title must be at least 5 characters");
        assert_eq!(wizard.step(), Step::Review);
        assert!(!wizard.is_submitting());
    }

    #[test]
    fn second_submit_while_in_flight_is_refused() {
        let mut wizard = at_review();
        wizard.begin_submit().unwrap();
        assert!(wizard.is_submitting());
        assert!(matches!(wizard.begin_submit(), Err(WizardError::InFlight)));

        wizard.finish_submit(Ok(Ack::ok("created"))).unwrap();
        assert!(!wizard.is_submitting());
    }

    #[tokio::test]
    async fn successful_submission_sends_once_and_resets() {
        let mut wizard = at_review();
        wizard.toggle_amenity("gym");
        wizard.toggle_amenity("security");
        let draft = wizard.draft().clone();
        let api = RecordingPropertyApi::accepting();

        let ack = wizard.submit(&api).await.unwrap();
        assert!(ack.success);

        let sent = api.submissions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], SubmissionPayload::from_draft(&draft).unwrap());
        assert_eq!(sent[0].values("amenities"), vec!["gym", "security"]);
        let features: Value = serde_json::from_str(sent[0].field("features").unwrap()).unwrap();
        assert_eq!(features["bedrooms"], 2);

        assert_eq!(wizard.draft(), &PropertyDraft::default());
        assert_eq!(wizard.step(), Step::BasicInfo);
        assert!(!wizard.is_submitting());
    }

    #[tokio::test]
    async fn rejected_submission_keeps_state() {
        let mut wizard = at_review();
        let draft = wizard.draft().clone();
        let api = RecordingPropertyApi::rejecting(ApiError::Validation {
            message: Some("Validation failed".to_string()),
            errors: vec!["Price must be a number".to_string()],
        });

        let err = wizard.submit(&api).await.unwrap_err();
        assert_eq!(err.notification(), "Validation errors: Price must be a number");
        assert_eq!(wizard.draft(), &draft);
        assert_eq!(wizard.step(), Step::Review);
        assert!(!wizard.is_submitting());

        let api = RecordingPropertyApi::rejecting(ApiError::Server {
            status: 500,
            message: String::new(),
        });
        let err = wizard.submit(&api).await.unwrap_err();
        assert_eq!(err.notification(), SUBMIT_FALLBACK);
    }
}
