use serde::{Deserialize, Deserializer, Serialize};

/// A recipe as received from the ranking service or the reference catalog.
///
/// Only `title` is required; every other field may be missing or `null` on the wire and the
/// recipe is still displayable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
	#[serde(default, deserialize_with = "deserialize_id", skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ready_in_minutes: Option<u32>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub ingredients: Vec<String>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub instructions: Vec<String>,
	/// "Why this recipe" reasons. The ranking service names this field `reasons`.
	#[serde(default, alias = "reasons", deserialize_with = "null_as_empty")]
	pub explanation: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub protein_score: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub match_score: Option<f64>,
	#[serde(default, rename = "estimated_cost_kes", skip_serializing_if = "Option::is_none")]
	pub cost_estimate: Option<f64>,
	#[serde(default, rename = "calories", skip_serializing_if = "Option::is_none")]
	pub calories_estimate: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub protein_per_cost: Option<f64>,
	#[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
	pub dietary_tags: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source_url: Option<String>,
}
impl Recipe {
	pub fn new(title: impl Into<String>) -> Self {
		Self {
			id: None,
			title: title.into(),
			ready_in_minutes: None,
			ingredients: Vec::new(),
			instructions: Vec::new(),
			explanation: Vec::new(),
			protein_score: None,
			match_score: None,
			cost_estimate: None,
			calories_estimate: None,
			protein_per_cost: None,
			dietary_tags: Vec::new(),
			source_url: None,
		}
	}

	pub fn ready_in_label(&self) -> String {
		match self.ready_in_minutes {
			Some(minutes) => format!("{minutes} min"),
			None => "? min".to_string(),
		}
	}

	pub fn ingredient_preview(&self, max: usize) -> String {
		self.ingredients.iter().take(max).map(String::as_str).collect::<Vec<_>>().join(" · ")
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
	Text(String),
	Signed(i64),
	Unsigned(u64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let id = Option::<WireId>::deserialize(deserializer)?.and_then(|id| match id {
		WireId::Text(text) => {
			let trimmed = text.trim();

			(!trimmed.is_empty()).then(|| trimmed.to_string())
		},
		WireId::Signed(value) => Some(value.to_string()),
		WireId::Unsigned(value) => Some(value.to_string()),
	});

	Ok(id)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
