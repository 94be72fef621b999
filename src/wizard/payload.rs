use crate::models::{ImageFile, PropertyDraft};
use reqwest::multipart::{Form, Part};

/// Contents of the `POST /properties` multipart request, in send order.
///
/// Kept as plain data so it can be inspected before it becomes a
/// `reqwest` form.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    pub fields: Vec<(String, String)>,
    pub images: Vec<ImageFile>,
}

impl SubmissionPayload {
    pub fn from_draft(draft: &PropertyDraft) -> Result<Self, serde_json::Error> {
        let mut fields = vec![
            ("title".to_string(), draft.title.clone()),
            ("description".to_string(), draft.description.clone()),
            (
                "type".to_string(),
                draft.kind.map(|k| k.as_str()).unwrap_or_default().to_string(),
            ),
            (
                "category".to_string(),
                draft.category.map(|c| c.as_str()).unwrap_or_default().to_string(),
            ),
            ("price".to_string(), serde_json::to_string(&draft.price)?),
            ("area".to_string(), serde_json::to_string(&draft.area)?),
            ("location".to_string(), serde_json::to_string(&draft.location)?),
            ("features".to_string(), serde_json::to_string(&draft.features)?),
            ("contact".to_string(), serde_json::to_string(&draft.contact)?),
        ];

        fields.extend(
            draft
                .amenities
                .iter()
                .map(|amenity| ("amenities".to_string(), amenity.to_string())),
        );

        Ok(Self {
            fields,
            images: draft.images.clone(),
        })
    }

    /// First value sent under `name`
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value sent under `name`, for repeated fields
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn into_form(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for image in self.images {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part("images", part);
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{jpeg, valid_draft};
    use serde_json::{json, Value};

    #[test]
    fn nested_sections_are_json_strings() {
        let mut draft = valid_draft();
        draft.amenities.toggle("gym");
        draft.amenities.toggle("wifi");
        draft.images = vec![jpeg("front.jpg"), jpeg("hall.jpg")];

        let payload = SubmissionPayload::from_draft(&draft).unwrap();

        assert_eq!(payload.field("title"), Some("Nice Flat"));
        assert_eq!(payload.field("type"), Some("apartment"));
        assert_eq!(payload.field("category"), Some("sale"));

        let price: Value = serde_json::from_str(payload.field("price").unwrap()).unwrap();
        assert_eq!(price, json!({ "amount": "500000", "currency": "INR", "negotiable": true }));

        let location: Value = serde_json::from_str(payload.field("location").unwrap()).unwrap();
        assert_eq!(location["pincode"], json!("411001"));
        assert_eq!(location["coordinates"], json!({ "latitude": "18.5204", "longitude": "73.8567" }));

        assert_eq!(payload.values("amenities"), vec!["gym", "wifi"]);
        assert_eq!(payload.images.len(), 2);
        assert_eq!(payload.fields.len(), 11);
    }

    #[test]
    fn builds_a_form_for_valid_mime_types() {
        let mut draft = valid_draft();
        draft.images = vec![jpeg("front.jpg")];
        let payload = SubmissionPayload::from_draft(&draft).unwrap();
        assert!(payload.into_form().is_ok());
    }
}
