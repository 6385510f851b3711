//! Detail view for the selected club.
//!
//! Presentation only. Absent optional fields show a neutral placeholder or are
//! left out; the card never fails on sparse records.

use leptos::prelude::*;

use super::star_map::types::Club;

const UNKNOWN_CATEGORY: &str = "Unknown Category";
const UNKNOWN_PRESIDENT: &str = "Unknown President";
const UNKNOWN_MEMBERS: &str = "Unknown Number of Members";

/// Display strings for one club.
#[derive(Clone, Debug, PartialEq)]
pub struct ClubDetails {
	/// Club name, used as the card title.
	pub name: String,
	/// Category, or "Unknown Category".
	pub category: String,
	/// President, or "Unknown President".
	pub president: String,
	/// Member count or description, or "Unknown Number of Members".
	pub members: String,
	/// Invite link, used as both the anchor target and its text.
	pub discord: Option<String>,
	/// Recurring schedule, omitted when absent.
	pub schedule: Option<String>,
	/// One line per upcoming meeting.
	pub next_meetings: Vec<String>,
	/// Names of related clubs.
	pub related: Vec<String>,
}

impl From<&Club> for ClubDetails {
	fn from(club: &Club) -> Self {
		Self {
			name: club.name.clone(),
			category: club
				.category
				.clone()
				.unwrap_or_else(|| UNKNOWN_CATEGORY.into()),
			president: club
				.president
				.clone()
				.unwrap_or_else(|| UNKNOWN_PRESIDENT.into()),
			members: club
				.members
				.as_ref()
				.map_or_else(|| UNKNOWN_MEMBERS.into(), ToString::to_string),
			discord: club.discord.clone().filter(|d| !d.is_empty()),
			schedule: club.meeting_schedule.clone().filter(|s| !s.is_empty()),
			next_meetings: club.next_meetings.iter().map(ToString::to_string).collect(),
			related: club.related.clone(),
		}
	}
}

/// Overlay card for the selected club. Renders nothing while `club` is `None`.
#[component]
pub fn ClubCard(#[prop(into)] club: Signal<Option<Club>>, on_close: Callback<()>) -> impl IntoView {
	move || {
		club.get().map(|club| {
			let details = ClubDetails::from(&club);
			let discord = details.discord.map(|link| {
				let href = link.clone();
				view! {
					<p>
						<strong>"Discord: "</strong>
						<a href=href target="_blank" rel="noreferrer">{link}</a>
					</p>
				}
			});
			let schedule = details.schedule.map(|s| {
				view! { <p><strong>"Meets: "</strong>{s}</p> }
			});
			let meetings = (!details.next_meetings.is_empty()).then(|| {
				view! {
					<div class="club-card-meetings">
						<strong>"Next meetings:"</strong>
						<ul>
							{details.next_meetings.into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
						</ul>
					</div>
				}
			});
			let related = (!details.related.is_empty()).then(|| {
				view! {
					<div class="club-card-related">
						<strong>"Related:"</strong>
						<ul>
							{details.related.into_iter().map(|r| view! { <li>{r}</li> }).collect_view()}
						</ul>
					</div>
				}
			});

			view! {
				<div class="club-card-overlay" role="dialog" aria-modal="true">
					<div class="club-card">
						<div class="club-card-header">
							<h2>{details.name}</h2>
							<button aria-label="Close" on:click=move |_| on_close.run(())>
								"×"
							</button>
						</div>
						<p class="club-card-category">{details.category}</p>
						<p><strong>"President: "</strong>{details.president}</p>
						<p><strong>"Members: "</strong>{details.members}</p>
						{discord}
						{schedule}
						{meetings}
						{related}
					</div>
				</div>
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::star_map::types::{Meeting, Members};

	#[test]
	fn sparse_club_gets_placeholders() {
		let details = ClubDetails::from(&Club {
			name: "Chess".into(),
			..Club::default()
		});
		assert_eq!(details.category, "Unknown Category");
		assert_eq!(details.president, "Unknown President");
		assert_eq!(details.members, "Unknown Number of Members");
		assert!(details.discord.is_none());
		assert!(details.schedule.is_none());
		assert!(details.next_meetings.is_empty());
	}

	#[test]
	fn full_club_is_shown_as_given() {
		let details = ClubDetails::from(&Club {
			name: "Robotics".into(),
			category: Some("Computer Science".into()),
			president: Some("Sam".into()),
			members: Some(Members::Count(42)),
			discord: Some("https://discord.gg/robots".into()),
			meeting_schedule: Some("Fridays".into()),
			next_meetings: vec![Meeting::Text("Mar 3".into())],
			related: vec!["AI".into()],
		});
		assert_eq!(details.category, "Computer Science");
		assert_eq!(details.members, "42");
		assert_eq!(details.discord.as_deref(), Some("https://discord.gg/robots"));
		assert_eq!(details.next_meetings, vec!["Mar 3".to_string()]);
		assert_eq!(details.related, vec!["AI".to_string()]);
	}

	#[test]
	fn discord_link_is_carried_to_the_card() {
		let details = ClubDetails::from(&Club {
			name: "Robotics".into(),
			discord: Some("https://discord.gg/robots".into()),
			..Club::default()
		});
		let link = details.discord.clone().unwrap();
		assert_eq!(link, "https://discord.gg/robots");
		assert_eq!(details.president, "Unknown President");
	}

	#[test]
	fn empty_links_are_omitted() {
		let details = ClubDetails::from(&Club {
			name: "Film".into(),
			discord: Some(String::new()),
			..Club::default()
		});
		assert!(details.discord.is_none());
	}
}
