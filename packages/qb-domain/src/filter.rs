use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

// Parsing is total: unknown labels are kept verbatim as `Other` and carry no local constraint.
macro_rules! bucket {
	(
		$(#[$meta:meta])*
		$name:ident {
			$($variant:ident => $label:literal $(| $alias:literal)*),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(from = "String", into = "String")]
		pub enum $name {
			$($variant,)+
			Other(String),
		}
		impl $name {
			pub const OPTIONS: &'static [&'static str] = &[$($label),+];

			pub fn parse(raw: &str) -> Self {
				let trimmed = raw.trim();

				$(
					if trimmed.eq_ignore_ascii_case($label)
						$(|| trimmed.eq_ignore_ascii_case($alias))*
					{
						return Self::$variant;
					}
				)+

				Self::Other(trimmed.to_string())
			}

			pub fn label(&self) -> &str {
				match self {
					$(Self::$variant => $label,)+
					Self::Other(raw) => raw,
				}
			}

			pub fn is_recognized(&self) -> bool {
				!matches!(self, Self::Other(_))
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
				f.write_str(self.label())
			}
		}
		impl From<&str> for $name {
			fn from(raw: &str) -> Self {
				Self::parse(raw)
			}
		}
		impl From<String> for $name {
			fn from(raw: String) -> Self {
				Self::parse(&raw)
			}
		}
		impl From<$name> for String {
			fn from(bucket: $name) -> Self {
				bucket.label().to_string()
			}
		}
	};
}

bucket! {
	/// How much time the user has to cook.
	TimeBucket {
		Under20Min => "Under 20 min",
		Under30Min => "Under 30 min",
		NoLimit => "No limit",
	}
}
impl TimeBucket {
	pub fn max_minutes(&self) -> Option<u32> {
		match self {
			Self::Under20Min => Some(20),
			Self::Under30Min => Some(30),
			Self::NoLimit | Self::Other(_) => None,
		}
	}
}

bucket! {
	BudgetBucket {
		Cheap => "Cheap",
		Moderate => "Moderate",
		DoesntMatter => "Doesn't matter",
	}
}

bucket! {
	/// Nutrition goal.
	GoalBucket {
		HighProtein => "High protein ⚡" | "High protein",
		Balanced => "Balanced",
		Light => "Light / low calorie",
	}
}

/// Structured filters selected during a session, sent alongside the free-text query.
///
/// Ingredients are stored lower-cased and unique, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
	pub time: Option<TimeBucket>,
	pub budget: Option<BudgetBucket>,
	pub goal: Option<GoalBucket>,
	ingredients: Vec<String>,
}
impl FilterSelection {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_time(mut self, time: impl Into<TimeBucket>) -> Self {
		self.time = Some(time.into());

		self
	}

	pub fn with_budget(mut self, budget: impl Into<BudgetBucket>) -> Self {
		self.budget = Some(budget.into());

		self
	}

	pub fn with_goal(mut self, goal: impl Into<GoalBucket>) -> Self {
		self.goal = Some(goal.into());

		self
	}

	pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for ingredient in ingredients {
			self.add_ingredient(ingredient.as_ref());
		}

		self
	}

	pub fn ingredients(&self) -> &[String] {
		&self.ingredients
	}

	/// Returns `false` when the input is blank or already selected.
	pub fn add_ingredient(&mut self, raw: &str) -> bool {
		let ingredient = raw.trim().to_lowercase();

		if ingredient.is_empty() || self.ingredients.contains(&ingredient) {
			return false;
		}

		self.ingredients.push(ingredient);

		true
	}

	pub fn remove_ingredient(&mut self, raw: &str) -> bool {
		let ingredient = raw.trim().to_lowercase();
		let before = self.ingredients.len();

		self.ingredients.retain(|existing| existing != &ingredient);

		self.ingredients.len() != before
	}

	pub fn toggle_time(&mut self, time: TimeBucket) {
		self.time = toggled(self.time.take(), time);
	}

	pub fn toggle_budget(&mut self, budget: BudgetBucket) {
		self.budget = toggled(self.budget.take(), budget);
	}

	pub fn toggle_goal(&mut self, goal: GoalBucket) {
		self.goal = toggled(self.goal.take(), goal);
	}

	pub fn clear(&mut self) {
		*self = Self::default();
	}

	pub fn is_empty(&self) -> bool {
		self.time.is_none() && self.budget.is_none() && self.goal.is_none() && self.ingredients.is_empty()
	}

	/// Labels of every set filter in the order time, budget, goal, then ingredients.
	pub fn active_labels(&self) -> Vec<&str> {
		let mut labels = Vec::with_capacity(3 + self.ingredients.len());

		labels.extend(self.time.as_ref().map(TimeBucket::label));
		labels.extend(self.budget.as_ref().map(BudgetBucket::label));
		labels.extend(self.goal.as_ref().map(GoalBucket::label));
		labels.extend(self.ingredients.iter().map(String::as_str));

		labels
	}
}

fn toggled<T>(current: Option<T>, picked: T) -> Option<T>
where
	T: PartialEq,
{
	match current {
		Some(active) if active == picked => None,
		_ => Some(picked),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_known_labels_case_insensitively() {
		assert_eq!(TimeBucket::parse("under 20 MIN"), TimeBucket::Under20Min);
		assert_eq!(GoalBucket::parse("High protein"), GoalBucket::HighProtein);
		assert_eq!(GoalBucket::parse("High protein ⚡"), GoalBucket::HighProtein);
		assert_eq!(BudgetBucket::parse(" Doesn't matter "), BudgetBucket::DoesntMatter);
	}

	#[test]
	fn keeps_unknown_labels_verbatim() {
		let bucket = TimeBucket::parse("Under 45 min");

		assert_eq!(bucket, TimeBucket::Other("Under 45 min".to_string()));
		assert!(!bucket.is_recognized());
		assert_eq!(bucket.max_minutes(), None);
		assert_eq!(bucket.label(), "Under 45 min");
	}

	#[test]
	fn ingredients_are_lowercased_and_unique() {
		let mut filters = FilterSelection::new();

		assert!(filters.add_ingredient(" Egg "));
		assert!(!filters.add_ingredient("egg"));
		assert!(!filters.add_ingredient("   "));
		assert!(filters.add_ingredient("Rice"));
		assert_eq!(filters.ingredients(), ["egg", "rice"]);
		assert!(filters.remove_ingredient("EGG"));
		assert!(!filters.remove_ingredient("egg"));
		assert_eq!(filters.ingredients(), ["rice"]);
	}

	#[test]
	fn toggling_the_active_value_unsets_it() {
		let mut filters = FilterSelection::new();

		filters.toggle_time(TimeBucket::Under20Min);
		assert_eq!(filters.time, Some(TimeBucket::Under20Min));

		filters.toggle_time(TimeBucket::Under30Min);
		assert_eq!(filters.time, Some(TimeBucket::Under30Min));

		filters.toggle_time(TimeBucket::Under30Min);
		assert_eq!(filters.time, None);
	}

	#[test]
	fn clear_resets_everything() {
		let mut filters =
			FilterSelection::new().with_goal("Balanced").with_budget("Cheap").with_ingredients(["kale"]);

		assert!(!filters.is_empty());

		filters.clear();

		assert!(filters.is_empty());
	}

	#[test]
	fn serializes_labels_and_nulls() {
		let filters = FilterSelection::new().with_goal(GoalBucket::HighProtein).with_ingredients(["egg"]);
		let json = serde_json::to_value(&filters).expect("serialize failed");

		assert_eq!(
			json,
			serde_json::json!({
				"time": null,
				"budget": null,
				"goal": "High protein ⚡",
				"ingredients": ["egg"]
			})
		);
	}
}
