//! Sidebar search over the club list.

use leptos::prelude::*;

use super::star_map::types::Club;

/// Ordinals of clubs matching `term`, in club order.
///
/// Case-insensitive substring match against name, category, president and
/// related names. An empty term matches every club.
pub fn filter_clubs(clubs: &[Club], term: &str) -> Vec<usize> {
	let term = term.trim().to_lowercase();
	let matches = |s: &str| s.to_lowercase().contains(&term);
	clubs
		.iter()
		.enumerate()
		.filter(|(_, club)| {
			term.is_empty()
				|| matches(&club.name)
				|| club.category.as_deref().is_some_and(matches)
				|| club.president.as_deref().is_some_and(matches)
				|| club.related.iter().any(|r| matches(r))
		})
		.map(|(i, _)| i)
		.collect()
}

/// Collapsible search panel. Choosing a result selects that club.
#[component]
pub fn ClubSearch(
	#[prop(into)] clubs: Signal<Vec<Club>>,
	selected: RwSignal<Option<usize>>,
) -> impl IntoView {
	let open = RwSignal::new(false);
	let term = RwSignal::new(String::new());

	let results = move || {
		let clubs = clubs.get();
		let hits = filter_clubs(&clubs, &term.get());
		if hits.is_empty() {
			return view! { <p class="club-search-empty">"No clubs found."</p> }.into_any();
		}
		hits.into_iter()
			.map(|ordinal| {
				let club = &clubs[ordinal];
				let category = club.category.clone().unwrap_or_default();
				view! {
					<li class="club-search-result" on:click=move |_| selected.set(Some(ordinal))>
						<h3>{club.name.clone()}</h3>
						<p>{category}</p>
					</li>
				}
			})
			.collect_view()
			.into_any()
	};

	view! {
		<button class="club-search-toggle" on:click=move |_| open.update(|o| *o = !*o)>
			"Search"
		</button>
		<Show when=move || open.get()>
			<div class="club-search">
				<input
					placeholder="Search clubs..."
					prop:value=move || term.get()
					on:input=move |ev| term.set(event_target_value(&ev))
				/>
				<ul class="club-search-results">{results}</ul>
			</div>
		</Show>
	}
}
