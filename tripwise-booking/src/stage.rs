use serde::{Deserialize, Serialize};

/// The five ordered steps of the booking wizard
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Details,
    Dates,
    Guests,
    Assistance,
    Confirm,
}

/// How a stage shows up in the step list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Details,
        Stage::Dates,
        Stage::Guests,
        Stage::Assistance,
        Stage::Confirm,
    ];

    pub fn index(&self) -> usize {
        match self {
            Stage::Details => 0,
            Stage::Dates => 1,
            Stage::Guests => 2,
            Stage::Assistance => 3,
            Stage::Confirm => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        Self::ALL.get(index).copied()
    }

    /// Following stage, staying put on the last one
    pub fn next(&self) -> Stage {
        Self::from_index(self.index() + 1).unwrap_or(Stage::Confirm)
    }

    /// Preceding stage, staying put on the first one
    pub fn previous(&self) -> Stage {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(Stage::Details)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Stage::Details => "details",
            Stage::Dates => "dates",
            Stage::Guests => "guests",
            Stage::Assistance => "assistance",
            Stage::Confirm => "confirm",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Stage::Details => "Your Details",
            Stage::Dates => "Date Selection",
            Stage::Guests => "Guests",
            Stage::Assistance => "Travel Assistance",
            Stage::Confirm => "Confirmation",
        }
    }

    pub fn is_last(&self) -> bool {
        *self == Stage::Confirm
    }
}
