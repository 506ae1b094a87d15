use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Travel assistance booked alongside a trip
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AssistanceOption {
    Car,
    Train,
    Flight,
    Bus,
}

impl AssistanceOption {
    pub const ALL: [AssistanceOption; 4] = [
        AssistanceOption::Car,
        AssistanceOption::Train,
        AssistanceOption::Flight,
        AssistanceOption::Bus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssistanceOption::Car => "Car",
            AssistanceOption::Train => "Train",
            AssistanceOption::Flight => "Flight",
            AssistanceOption::Bus => "Bus",
        }
    }
}

impl fmt::Display for AssistanceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistanceOption {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown assistance option: {}", wanted)))
    }
}

/// Guest counters on a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuestKind {
    Adults,
    Children,
    Infants,
}

impl GuestKind {
    /// Lowest value the counter may reach
    pub fn floor(&self) -> u32 {
        match self {
            GuestKind::Adults => 1,
            GuestKind::Children | GuestKind::Infants => 0,
        }
    }
}

impl FromStr for GuestKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adults" => Ok(GuestKind::Adults),
            "children" => Ok(GuestKind::Children),
            "infants" => Ok(GuestKind::Infants),
            other => Err(CoreError::UnknownField(other.to_string())),
        }
    }
}

/// Field names of a draft, ordered as they appear in the wizard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    StartLocation,
    EndLocation,
    StartDate,
    EndDate,
    Adults,
    Children,
    Infants,
    TravelAssistance,
    AssistanceOption,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::StartLocation,
        Field::EndLocation,
        Field::StartDate,
        Field::EndDate,
        Field::Adults,
        Field::Children,
        Field::Infants,
        Field::TravelAssistance,
        Field::AssistanceOption,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::StartLocation => "startLocation",
            Field::EndLocation => "endLocation",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
            Field::Adults => "adults",
            Field::Children => "children",
            Field::Infants => "infants",
            Field::TravelAssistance => "travelAssistance",
            Field::AssistanceOption => "assistanceOption",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownField(wanted.to_string()))
    }
}

/// In-progress booking data collected by the wizard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub name: String,
    pub start_location: String,
    pub end_location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
    pub travel_assistance: bool,
    pub assistance_option: Option<AssistanceOption>,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_location: String::new(),
            end_location: String::new(),
            start_date: None,
            end_date: None,
            adults: GuestKind::Adults.floor(),
            children: 0,
            infants: 0,
            travel_assistance: false,
            assistance_option: None,
        }
    }
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single field update. Adults never drop below one.
    pub fn apply(&mut self, update: DraftUpdate) {
        match update {
            DraftUpdate::Name(v) => self.name = v,
            DraftUpdate::StartLocation(v) => self.start_location = v,
            DraftUpdate::EndLocation(v) => self.end_location = v,
            DraftUpdate::StartDate(v) => self.start_date = v,
            DraftUpdate::EndDate(v) => self.end_date = v,
            DraftUpdate::Adults(v) => self.adults = v.max(GuestKind::Adults.floor()),
            DraftUpdate::Children(v) => self.children = v,
            DraftUpdate::Infants(v) => self.infants = v,
            DraftUpdate::TravelAssistance(v) => self.travel_assistance = v,
            DraftUpdate::AssistanceOption(v) => self.assistance_option = v,
        }
    }

    pub fn guests(&self, kind: GuestKind) -> u32 {
        match kind {
            GuestKind::Adults => self.adults,
            GuestKind::Children => self.children,
            GuestKind::Infants => self.infants,
        }
    }

    pub fn guests_mut(&mut self, kind: GuestKind) -> &mut u32 {
        match kind {
            GuestKind::Adults => &mut self.adults,
            GuestKind::Children => &mut self.children,
            GuestKind::Infants => &mut self.infants,
        }
    }

    pub fn guests_summary(&self) -> String {
        format!("{} Adults, {} Children, {} Infants", self.adults, self.children, self.infants)
    }

    pub fn assistance_summary(&self) -> String {
        match (self.travel_assistance, self.assistance_option) {
            (true, Some(option)) => format!("Yes - {}", option),
            (true, None) => "Yes - ".to_string(),
            (false, _) => "No".to_string(),
        }
    }
}

/// A typed value for one draft field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftUpdate {
    Name(String),
    StartLocation(String),
    EndLocation(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Adults(u32),
    Children(u32),
    Infants(u32),
    TravelAssistance(bool),
    AssistanceOption(Option<AssistanceOption>),
}

impl DraftUpdate {
    pub fn field(&self) -> Field {
        match self {
            DraftUpdate::Name(_) => Field::Name,
            DraftUpdate::StartLocation(_) => Field::StartLocation,
            DraftUpdate::EndLocation(_) => Field::EndLocation,
            DraftUpdate::StartDate(_) => Field::StartDate,
            DraftUpdate::EndDate(_) => Field::EndDate,
            DraftUpdate::Adults(_) => Field::Adults,
            DraftUpdate::Children(_) => Field::Children,
            DraftUpdate::Infants(_) => Field::Infants,
            DraftUpdate::TravelAssistance(_) => Field::TravelAssistance,
            DraftUpdate::AssistanceOption(_) => Field::AssistanceOption,
        }
    }

    /// Build an update from raw form input.
    ///
    /// Dates use `YYYY-MM-DD`; an empty date or option clears the field.
    pub fn parse(field: Field, raw: &str) -> Result<Self, CoreError> {
        let update = match field {
            Field::Name => DraftUpdate::Name(raw.to_string()),
            Field::StartLocation => DraftUpdate::StartLocation(raw.to_string()),
            Field::EndLocation => DraftUpdate::EndLocation(raw.to_string()),
            Field::StartDate => DraftUpdate::StartDate(parse_date(raw)?),
            Field::EndDate => DraftUpdate::EndDate(parse_date(raw)?),
            Field::Adults => DraftUpdate::Adults(parse_count(field, raw)?),
            Field::Children => DraftUpdate::Children(parse_count(field, raw)?),
            Field::Infants => DraftUpdate::Infants(parse_count(field, raw)?),
            Field::TravelAssistance => DraftUpdate::TravelAssistance(parse_flag(raw)?),
            Field::AssistanceOption => {
                let raw = raw.trim();
                if raw.is_empty() {
                    DraftUpdate::AssistanceOption(None)
                } else {
                    DraftUpdate::AssistanceOption(Some(raw.parse()?))
                }
            }
        };
        Ok(update)
    }
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| CoreError::ValidationError(format!("Invalid date '{}': {}", raw, e)))
}

fn parse_count(field: Field, raw: &str) -> Result<u32, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::ValidationError(format!("{} must be a whole number", field)))
}

fn parse_flag(raw: &str) -> Result<bool, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" | "" => Ok(false),
        other => Err(CoreError::ValidationError(format!("Expected yes or no, got '{}'", other))),
    }
}

/// A confirmed booking handed to the trip store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: Uuid,
    #[serde(flatten)]
    pub draft: BookingDraft,
    pub confirmed: bool,
    pub booking_date: NaiveDate,
}

impl Trip {
    pub fn from_draft(draft: BookingDraft, booking_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            draft,
            confirmed: true,
            booking_date,
        }
    }
}
