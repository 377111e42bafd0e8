//! Event type metadata.
//!
//! Standard event types, their XML names, the fixed category taxonomy used
//! by timeline filters, and the birth/death fallback predicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a genealogical event.
///
/// Serialized as its XML name (`"Birth"`, `"Cause Of Death"`, ...). Names
/// that are not standard deserialize to [`EventType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Adopted,
    Birth,
    Death,
    Baptism,
    Burial,
    Cremation,
    Engagement,
    Marriage,
    Divorce,
    Annulment,
    MarriageSettlement,
    MarriageLicense,
    MarriageContract,
    MarriageBanns,
    DivorceFiling,
    AlternateMarriage,
    Christening,
    AdultChristening,
    Confirmation,
    FirstCommunion,
    Blessing,
    BarMitzvah,
    BasMitzvah,
    Religion,
    Occupation,
    Retirement,
    Elected,
    MilitaryService,
    Ordination,
    Education,
    Degree,
    Graduation,
    Emigration,
    Immigration,
    Naturalization,
    Probate,
    Will,
    Residence,
    Census,
    Property,
    CauseOfDeath,
    MedicalInformation,
    NobilityTitle,
    NumberOfMarriages,
    Custom(String),
}

static STANDARD_TYPES: &[EventType] = &[
    EventType::Adopted,
    EventType::Birth,
    EventType::Death,
    EventType::Baptism,
    EventType::Burial,
    EventType::Cremation,
    EventType::Engagement,
    EventType::Marriage,
    EventType::Divorce,
    EventType::Annulment,
    EventType::MarriageSettlement,
    EventType::MarriageLicense,
    EventType::MarriageContract,
    EventType::MarriageBanns,
    EventType::DivorceFiling,
    EventType::AlternateMarriage,
    EventType::Christening,
    EventType::AdultChristening,
    EventType::Confirmation,
    EventType::FirstCommunion,
    EventType::Blessing,
    EventType::BarMitzvah,
    EventType::BasMitzvah,
    EventType::Religion,
    EventType::Occupation,
    EventType::Retirement,
    EventType::Elected,
    EventType::MilitaryService,
    EventType::Ordination,
    EventType::Education,
    EventType::Degree,
    EventType::Graduation,
    EventType::Emigration,
    EventType::Immigration,
    EventType::Naturalization,
    EventType::Probate,
    EventType::Will,
    EventType::Residence,
    EventType::Census,
    EventType::Property,
    EventType::CauseOfDeath,
    EventType::MedicalInformation,
    EventType::NobilityTitle,
    EventType::NumberOfMarriages,
];

impl EventType {
    /// All standard (non-custom) event types.
    pub fn standard() -> &'static [EventType] {
        STANDARD_TYPES
    }

    /// XML name of the type, or the custom name.
    pub fn xml_str(&self) -> &str {
        match self {
            Self::Adopted => "Adopted",
            Self::Birth => "Birth",
            Self::Death => "Death",
            Self::Baptism => "Baptism",
            Self::Burial => "Burial",
            Self::Cremation => "Cremation",
            Self::Engagement => "Engagement",
            Self::Marriage => "Marriage",
            Self::Divorce => "Divorce",
            Self::Annulment => "Annulment",
            Self::MarriageSettlement => "Marriage Settlement",
            Self::MarriageLicense => "Marriage License",
            Self::MarriageContract => "Marriage Contract",
            Self::MarriageBanns => "Marriage Banns",
            Self::DivorceFiling => "Divorce Filing",
            Self::AlternateMarriage => "Alternate Marriage",
            Self::Christening => "Christening",
            Self::AdultChristening => "Adult Christening",
            Self::Confirmation => "Confirmation",
            Self::FirstCommunion => "First Communion",
            Self::Blessing => "Blessing",
            Self::BarMitzvah => "Bar Mitzvah",
            Self::BasMitzvah => "Bas Mitzvah",
            Self::Religion => "Religion",
            Self::Occupation => "Occupation",
            Self::Retirement => "Retirement",
            Self::Elected => "Elected",
            Self::MilitaryService => "Military Service",
            Self::Ordination => "Ordination",
            Self::Education => "Education",
            Self::Degree => "Degree",
            Self::Graduation => "Graduation",
            Self::Emigration => "Emigration",
            Self::Immigration => "Immigration",
            Self::Naturalization => "Naturalization",
            Self::Probate => "Probate",
            Self::Will => "Will",
            Self::Residence => "Residence",
            Self::Census => "Census",
            Self::Property => "Property",
            Self::CauseOfDeath => "Cause Of Death",
            Self::MedicalInformation => "Medical Information",
            Self::NobilityTitle => "Nobility Title",
            Self::NumberOfMarriages => "Number of Marriages",
            Self::Custom(name) => name,
        }
    }

    /// Look up a standard type by XML name.
    pub fn from_standard(name: &str) -> Option<EventType> {
        STANDARD_TYPES.iter().find(|t| t.xml_str() == name).cloned()
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    pub fn is_birth(&self) -> bool {
        matches!(self, Self::Birth)
    }

    pub fn is_death(&self) -> bool {
        matches!(self, Self::Death)
    }

    pub fn is_marriage(&self) -> bool {
        matches!(self, Self::Marriage)
    }

    pub fn is_divorce(&self) -> bool {
        matches!(self, Self::Divorce)
    }

    /// Events that may stand in for a missing birth.
    pub fn is_birth_fallback(&self) -> bool {
        matches!(self, Self::Baptism | Self::Christening)
    }

    /// Events that indicate a death occurred; used as death fallbacks.
    pub fn is_death_indicator(&self) -> bool {
        matches!(
            self,
            Self::Death | Self::Burial | Self::Cremation | Self::CauseOfDeath | Self::Probate
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xml_str())
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        EventType::from_standard(&name).unwrap_or(EventType::Custom(name))
    }
}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        EventType::from_standard(name).unwrap_or_else(|| EventType::Custom(name.to_string()))
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Custom(name) => name,
            other => other.xml_str().to_string(),
        }
    }
}

/// Fixed event categories usable as timeline filter tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Vital,
    Family,
    Religious,
    Vocational,
    Academic,
    Travel,
    Legal,
    Residence,
    Other,
}

/// Filter token that selects every store-defined custom event type.
pub const CUSTOM_CATEGORY: &str = "custom";

/// Every category token, including [`CUSTOM_CATEGORY`].
pub const EVENT_CATEGORIES: [&str; 10] = [
    "vital",
    "family",
    "religious",
    "vocational",
    "academic",
    "travel",
    "legal",
    "residence",
    "other",
    CUSTOM_CATEGORY,
];

static VITAL_TYPES: &[EventType] = &[
    EventType::Birth,
    EventType::Baptism,
    EventType::Death,
    EventType::Burial,
    EventType::Cremation,
    EventType::Adopted,
];

static FAMILY_TYPES: &[EventType] = &[
    EventType::Engagement,
    EventType::Marriage,
    EventType::Divorce,
    EventType::Annulment,
    EventType::MarriageSettlement,
    EventType::MarriageLicense,
    EventType::MarriageContract,
    EventType::MarriageBanns,
    EventType::DivorceFiling,
    EventType::AlternateMarriage,
];

static RELIGIOUS_TYPES: &[EventType] = &[
    EventType::Christening,
    EventType::AdultChristening,
    EventType::Confirmation,
    EventType::FirstCommunion,
    EventType::Blessing,
    EventType::BarMitzvah,
    EventType::BasMitzvah,
    EventType::Religion,
];

static VOCATIONAL_TYPES: &[EventType] = &[
    EventType::Occupation,
    EventType::Retirement,
    EventType::Elected,
    EventType::MilitaryService,
    EventType::Ordination,
];

static ACADEMIC_TYPES: &[EventType] = &[
    EventType::Education,
    EventType::Degree,
    EventType::Graduation,
];

static TRAVEL_TYPES: &[EventType] = &[
    EventType::Emigration,
    EventType::Immigration,
    EventType::Naturalization,
];

static LEGAL_TYPES: &[EventType] = &[
    EventType::Probate,
    EventType::Will,
];

static RESIDENCE_TYPES: &[EventType] = &[
    EventType::Residence,
    EventType::Census,
    EventType::Property,
];

static OTHER_TYPES: &[EventType] = &[
    EventType::CauseOfDeath,
    EventType::MedicalInformation,
    EventType::NobilityTitle,
    EventType::NumberOfMarriages,
];

impl EventCategory {
    pub const ALL: [EventCategory; 9] = [
        Self::Vital,
        Self::Family,
        Self::Religious,
        Self::Vocational,
        Self::Academic,
        Self::Travel,
        Self::Legal,
        Self::Residence,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vital => "vital",
            Self::Family => "family",
            Self::Religious => "religious",
            Self::Vocational => "vocational",
            Self::Academic => "academic",
            Self::Travel => "travel",
            Self::Legal => "legal",
            Self::Residence => "residence",
            Self::Other => "other",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == token)
    }

    /// Member event types of this category.
    pub fn members(&self) -> &'static [EventType] {
        match self {
            Self::Vital => VITAL_TYPES,
            Self::Family => FAMILY_TYPES,
            Self::Religious => RELIGIOUS_TYPES,
            Self::Vocational => VOCATIONAL_TYPES,
            Self::Academic => ACADEMIC_TYPES,
            Self::Travel => TRAVEL_TYPES,
            Self::Legal => LEGAL_TYPES,
            Self::Residence => RESIDENCE_TYPES,
            Self::Other => OTHER_TYPES,
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_names_round_trip_through_strings() {
        for event_type in EventType::standard() {
            let name: String = event_type.clone().into();
            assert_eq!(&EventType::from(name), event_type);
        }
    }

    #[test]
    fn unknown_names_become_custom() {
        assert_eq!(
            EventType::from("Shipwreck"),
            EventType::Custom("Shipwreck".to_string())
        );
        assert!(EventType::from("Shipwreck").is_custom());
    }

    #[test]
    fn death_indicators() {
        for t in [
            EventType::Death,
            EventType::Burial,
            EventType::Cremation,
            EventType::CauseOfDeath,
            EventType::Probate,
        ] {
            assert!(t.is_death_indicator(), "{t}");
        }
        assert!(!EventType::Will.is_death_indicator());
        assert!(EventType::Christening.is_birth_fallback());
        assert!(!EventType::Birth.is_birth_fallback());
    }

    #[test]
    fn every_standard_type_belongs_to_exactly_one_category() {
        for event_type in EventType::standard() {
            let owners = EventCategory::ALL
                .iter()
                .filter(|c| c.members().contains(event_type))
                .count();
            assert_eq!(owners, 1, "{event_type}");
        }
    }

    #[test]
    fn category_tokens_parse() {
        assert_eq!(EventCategory::parse("legal"), Some(EventCategory::Legal));
        assert_eq!(EventCategory::parse("custom"), None);
        assert!(EVENT_CATEGORIES.contains(&CUSTOM_CATEGORY));
    }

    #[test]
    fn serde_uses_xml_name() {
        let json = serde_json::to_string(&EventType::CauseOfDeath).unwrap();
        assert_eq!(json, "\"Cause Of Death\"");
        let parsed: EventType = serde_json::from_str("\"Marriage Banns\"").unwrap();
        assert_eq!(parsed, EventType::MarriageBanns);
    }
}
