use crate::models::{AreaUnit, Category, Facing, Furnished, PropertyDraft, PropertyType};

/// Edit to the step 1 fields
#[derive(Debug, Clone, PartialEq)]
pub enum BasicInfoUpdate {
    Title(String),
    Description(String),
    Type(Option<PropertyType>),
    Category(Option<Category>),
    PriceAmount(String),
    Currency(String),
    Negotiable(bool),
    AreaSize(String),
    AreaUnit(AreaUnit),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    Address(String),
    City(String),
    State(String),
    Pincode(String),
    Latitude(String),
    Longitude(String),
    Landmark(String),
    Neighborhood(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeaturesUpdate {
    Bedrooms(u32),
    Bathrooms(u32),
    Balconies(u32),
    Parking(u32),
    Furnished(Furnished),
    FloorCurrent(String),
    FloorTotal(String),
    Age(String),
    Facing(Option<Facing>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContactUpdate {
    ShowOwnerDetails(bool),
    PreferredTime(String),
    AdditionalPhone(String),
}

/// Any single-field edit to the draft
#[derive(Debug, Clone, PartialEq)]
pub enum DraftUpdate {
    BasicInfo(BasicInfoUpdate),
    Location(LocationUpdate),
    Features(FeaturesUpdate),
    Contact(ContactUpdate),
}

impl DraftUpdate {
    pub fn apply(self, draft: &mut PropertyDraft) {
        match self {
            DraftUpdate::BasicInfo(update) => update.apply(draft),
            DraftUpdate::Location(update) => update.apply(draft),
            DraftUpdate::Features(update) => update.apply(draft),
            DraftUpdate::Contact(update) => update.apply(draft),
        }
    }
}

impl BasicInfoUpdate {
    pub fn apply(self, draft: &mut PropertyDraft) {
        match self {
            BasicInfoUpdate::Title(v) => draft.title = v,
            BasicInfoUpdate::Description(v) => draft.description = v,
            BasicInfoUpdate::Type(v) => draft.kind = v,
            BasicInfoUpdate::Category(v) => draft.category = v,
            BasicInfoUpdate::PriceAmount(v) => draft.price.amount = v,
            BasicInfoUpdate::Currency(v) => draft.price.currency = v,
            BasicInfoUpdate::Negotiable(v) => draft.price.negotiable = v,
            BasicInfoUpdate::AreaSize(v) => draft.area.size = v,
            BasicInfoUpdate::AreaUnit(v) => draft.area.unit = v,
        }
    }
}

impl LocationUpdate {
    pub fn apply(self, draft: &mut PropertyDraft) {
        let location = &mut draft.location;
        match self {
            LocationUpdate::Address(v) => location.address = v,
            LocationUpdate::City(v) => location.city = v,
            LocationUpdate::State(v) => location.state = v,
            LocationUpdate::Pincode(v) => location.pincode = v,
            LocationUpdate::Latitude(v) => location.coordinates.latitude = v,
            LocationUpdate::Longitude(v) => location.coordinates.longitude = v,
            LocationUpdate::Landmark(v) => location.landmark = v,
            LocationUpdate::Neighborhood(v) => location.neighborhood = v,
        }
    }
}

impl FeaturesUpdate {
    pub fn apply(self, draft: &mut PropertyDraft) {
        let features = &mut draft.features;
        match self {
            FeaturesUpdate::Bedrooms(v) => features.bedrooms = v,
            FeaturesUpdate::Bathrooms(v) => features.bathrooms = v,
            FeaturesUpdate::Balconies(v) => features.balconies = v,
            FeaturesUpdate::Parking(v) => features.parking = v,
            FeaturesUpdate::Furnished(v) => features.furnished = v,
            FeaturesUpdate::FloorCurrent(v) => features.floor.current = v,
            FeaturesUpdate::FloorTotal(v) => features.floor.total = v,
            FeaturesUpdate::Age(v) => features.age = v,
            FeaturesUpdate::Facing(v) => features.facing = v,
        }
    }
}

impl ContactUpdate {
    pub fn apply(self, draft: &mut PropertyDraft) {
        let contact = &mut draft.contact;
        match self {
            ContactUpdate::ShowOwnerDetails(v) => contact.show_owner_details = v,
            ContactUpdate::PreferredTime(v) => contact.preferred_time = v,
            ContactUpdate::AdditionalPhone(v) => contact.additional_phone = v,
        }
    }
}

impl From<BasicInfoUpdate> for DraftUpdate {
    fn from(update: BasicInfoUpdate) -> Self {
        DraftUpdate::BasicInfo(update)
    }
}

impl From<LocationUpdate> for DraftUpdate {
    fn from(update: LocationUpdate) -> Self {
        DraftUpdate::Location(update)
    }
}

impl From<FeaturesUpdate> for DraftUpdate {
    fn from(update: FeaturesUpdate) -> Self {
        DraftUpdate::Features(update)
    }
}

impl From<ContactUpdate> for DraftUpdate {
    fn from(update: ContactUpdate) -> Self {
        DraftUpdate::Contact(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_touch_only_their_field() {
        let mut draft = PropertyDraft::default();
        let before = draft.clone();

        DraftUpdate::from(LocationUpdate::Latitude("18.5".to_string())).apply(&mut draft);
        assert_eq!(draft.location.coordinates.latitude, "18.5");
        assert_eq!(draft.location.coordinates.longitude, before.location.coordinates.longitude);

        FeaturesUpdate::FloorTotal("12".to_string()).apply(&mut draft);
        FeaturesUpdate::Facing(Some(Facing::East)).apply(&mut draft);
        assert_eq!(draft.features.floor.total, "12");
        assert_eq!(draft.features.floor.current, "");
        assert_eq!(draft.features.facing, Some(Facing::East));

        ContactUpdate::ShowOwnerDetails(false).apply(&mut draft);
        assert!(!draft.contact.show_owner_details);
        assert_eq!(draft.title, before.title);
    }
}
