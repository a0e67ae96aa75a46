use crate::{filter::FilterSelection, persona::PersonaTag};

pub const FILTER_SEPARATOR: &str = ", ";

/// Merges free text with the active filter labels into one query string.
///
/// Empty input is still composed; whether to submit it is the caller's call.
pub fn compose_query(raw: &str, filters: &FilterSelection) -> String {
	let text = raw.trim();
	let labels = filters.active_labels();

	if labels.is_empty() {
		return text.to_string();
	}

	let joined = labels.join(FILTER_SEPARATOR);

	if text.is_empty() { joined } else { format!("{text}{FILTER_SEPARATOR}{joined}") }
}

/// Everything a search provider needs for one submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
	/// The trimmed free text, without filter labels.
	pub text: String,
	pub composed: String,
	pub persona: PersonaTag,
	pub filters: FilterSelection,
}
impl SearchQuery {
	pub fn new(raw: &str, filters: FilterSelection, persona: PersonaTag) -> Self {
		Self {
			text: raw.trim().to_string(),
			composed: compose_query(raw, &filters),
			persona,
			filters,
		}
	}
}
