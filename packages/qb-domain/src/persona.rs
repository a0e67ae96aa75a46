use std::{
	fmt::{Display, Formatter, Result as FmtResult},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown persona '{0}'.")]
pub struct UnknownPersona(pub String);

/// Personalization label the ranking service uses to tailor explanations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaTag {
	#[default]
	BusyProfessional,
	Student,
	HealthFocused,
	FamilyCook,
}
impl PersonaTag {
	pub const ALL: [Self; 4] =
		[Self::BusyProfessional, Self::Student, Self::HealthFocused, Self::FamilyCook];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::BusyProfessional => "busy_professional",
			Self::Student => "student",
			Self::HealthFocused => "health_focused",
			Self::FamilyCook => "family_cook",
		}
	}

	pub fn display_name(self) -> &'static str {
		match self {
			Self::BusyProfessional => "Busy Professionals",
			Self::Student => "Students",
			Self::HealthFocused => "Health-Focused Individuals",
			Self::FamilyCook => "Family Cooks",
		}
	}
}
impl Display for PersonaTag {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for PersonaTag {
	type Err = UnknownPersona;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let normalized = raw.trim().to_ascii_lowercase();

		Self::ALL
			.into_iter()
			.find(|tag| tag.as_str() == normalized)
			.ok_or_else(|| UnknownPersona(raw.trim().to_string()))
	}
}
