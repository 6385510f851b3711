//! Club records consumed by the star map.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// A club record, loaded once from page data and treated as read-only.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Club {
	/// Unique name. Other clubs reference this in `related`.
	pub name: String,
	/// Free-form category, e.g. "Computer Science".
	pub category: Option<String>,
	/// Names of related clubs. May name clubs that do not exist.
	#[serde(deserialize_with = "null_as_default")]
	pub related: Vec<String>,
	/// Invite link.
	pub discord: Option<String>,
	/// Current president.
	pub president: Option<String>,
	/// Member count or description.
	pub members: Option<Members>,
	/// Human-readable recurring schedule, e.g. "Tuesdays 6pm".
	pub meeting_schedule: Option<String>,
	/// Upcoming meetings. `null` reads as empty.
	#[serde(deserialize_with = "null_as_default")]
	pub next_meetings: Vec<Meeting>,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Club {
	/// Whether the category contains `keyword`, ignoring case.
	pub fn category_contains(&self, keyword: &str) -> bool {
		let keyword = keyword.to_lowercase();
		self.category
			.as_deref()
			.is_some_and(|c| c.to_lowercase().contains(&keyword))
	}
}

/// Member count as given by the data source: a number or free text ("~40").
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Members {
	/// Exact member count.
	Count(u64),
	/// Free text.
	Text(String),
}

impl fmt::Display for Members {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Members::Count(n) => write!(f, "{n}"),
			Members::Text(s) => f.write_str(s),
		}
	}
}

/// An upcoming meeting: either a plain description or structured details.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Meeting {
	/// Free text.
	Text(String),
	/// Structured meeting. Every part is optional.
	Details {
		/// Day, e.g. "Mar 3".
		#[serde(default)]
		date: Option<String>,
		/// Start time.
		#[serde(default)]
		time: Option<String>,
		/// Room or venue.
		#[serde(default)]
		location: Option<String>,
	},
}

impl fmt::Display for Meeting {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Meeting::Text(s) => f.write_str(s),
			Meeting::Details {
				date,
				time,
				location,
			} => {
				let when = [date.as_deref(), time.as_deref()]
					.into_iter()
					.flatten()
					.collect::<Vec<_>>()
					.join(" — ");
				match location {
					Some(loc) if when.is_empty() => write!(f, "@ {loc}"),
					Some(loc) => write!(f, "{when} @ {loc}"),
					None => f.write_str(&when),
				}
			}
		}
	}
}

/// Deserialize each element of a JSON array of clubs on its own.
///
/// Records that fail to deserialize are logged and skipped, so one bad entry
/// does not empty the map.
pub fn parse_clubs(records: Vec<serde_json::Value>) -> Vec<Club> {
	records
		.into_iter()
		.enumerate()
		.filter_map(|(i, record)| match Club::deserialize(record) {
			Ok(club) => Some(club),
			Err(e) => {
				log::warn!("club-starmap: skipping club record #{}: {}", i, e);
				None
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bad_records_are_skipped_individually() {
		let json = r#"[
			{ "name": "Robotics" },
			{ "name": "Chess", "president": 42 },
			{ "name": "Film", "next_meetings": [7] },
			"not a club",
			{ "name": "Pottery", "members": "about 15" }
		]"#;
		let records: Vec<serde_json::Value> = serde_json::from_str(json).unwrap();
		let names: Vec<String> = parse_clubs(records).into_iter().map(|c| c.name).collect();
		assert_eq!(names, vec!["Robotics".to_string(), "Pottery".to_string()]);
	}

	#[test]
	fn deserializes_sparse_and_mixed_records() {
		let json = r#"[
			{ "name": "Robotics", "category": "Computer Science", "related": ["AI"], "members": 42,
			  "next_meetings": ["Friday", { "date": "Mar 3", "time": "5pm", "location": "Lab 2" }] },
			{ "name": "Pottery", "category": null, "related": null, "members": "about 15" },
			{ "name": "Chess" }
		]"#;
		let clubs: Vec<Club> = serde_json::from_str(json).unwrap();
		assert_eq!(clubs.len(), 3);
		assert_eq!(clubs[0].members, Some(Members::Count(42)));
		assert_eq!(clubs[0].next_meetings[0].to_string(), "Friday");
		assert_eq!(clubs[0].next_meetings[1].to_string(), "Mar 3 — 5pm @ Lab 2");
		assert_eq!(clubs[1].members.as_ref().unwrap().to_string(), "about 15");
		assert!(clubs[2].related.is_empty());
		assert!(clubs[2].category.is_none());
	}

	#[test]
	fn category_match_is_case_insensitive_substring() {
		let club = Club {
			name: "A".into(),
			category: Some("Computer Science".into()),
			..Club::default()
		};
		assert!(club.category_contains("computer"));
		assert!(club.category_contains("SCIENCE"));
		assert!(!club.category_contains("art"));
		assert!(!Club::default().category_contains("computer"));
	}
}
