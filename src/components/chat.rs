//! "Mission Control" chat panel.
//!
//! Sends one message at a time to the recommendation endpoint and lists the
//! clubs it suggests. Failures are shown inline; the map is never touched.

use leptos::prelude::*;
use log::warn;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::star_map::types::{Club, parse_clubs};

/// Endpoint used when the component is not given one.
pub const DEFAULT_ENDPOINT: &str = "/api/chat";

const FAILURE_REPLY: &str = "Sorry, something went wrong.";

#[derive(Serialize)]
struct ChatRequest<'a> {
	message: &'a str,
}

/// Body returned by the chat endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
	/// Text reply from the bot.
	pub reply: Option<String>,
	/// Suggested clubs. Only an array is honored; records are parsed leniently.
	pub recommendations: Option<serde_json::Value>,
	/// Server-side failure, shown in place of the reply.
	pub error: Option<String>,
}

/// Who wrote a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
	/// Typed by the visitor.
	User,
	/// Returned by the endpoint, or a failure notice.
	Bot,
}

/// One line in the message list.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
	/// Author of the line.
	pub role: ChatRole,
	/// Message text.
	pub text: String,
}

impl ChatMessage {
	fn bot(text: impl Into<String>) -> Self {
		Self {
			role: ChatRole::Bot,
			text: text.into(),
		}
	}
}

/// Conversation state, independent of the DOM.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatLog {
	/// Messages in the order they were sent or received.
	pub messages: Vec<ChatMessage>,
	/// Current "Top matches", replaced by each response that carries some.
	pub recommendations: Vec<Club>,
	/// A request is in flight.
	pub pending: bool,
}

impl ChatLog {
	/// Record the user's message and mark a request as pending.
	///
	/// Returns the trimmed text to send, or `None` when the input is blank or a
	/// request is already in flight.
	pub fn submit(&mut self, input: &str) -> Option<String> {
		let text = input.trim();
		if text.is_empty() || self.pending {
			return None;
		}
		self.messages.push(ChatMessage {
			role: ChatRole::User,
			text: text.to_string(),
		});
		self.pending = true;
		Some(text.to_string())
	}

	/// Apply the outcome of the pending request.
	pub fn receive(&mut self, result: Result<ChatResponse, String>) {
		self.pending = false;
		let ChatResponse {
			reply,
			recommendations,
			error,
		} = match result {
			Ok(resp) => resp,
			Err(e) => {
				warn!("club-starmap: chat request failed: {}", e);
				self.messages.push(ChatMessage::bot(FAILURE_REPLY));
				return;
			}
		};

		if let Some(error) = error.filter(|e| !e.is_empty()) {
			self.messages.push(ChatMessage::bot(error));
			return;
		}
		if let Some(reply) = reply.filter(|r| !r.is_empty()) {
			self.messages.push(ChatMessage::bot(reply));
		}
		if let Some(serde_json::Value::Array(records)) = recommendations {
			self.recommendations = parse_clubs(records);
		}
	}
}

/// Ordinal of the loaded club with the same name as `club`.
pub fn resolve_pick(clubs: &[Club], club: &Club) -> Option<usize> {
	clubs.iter().position(|c| c.name == club.name)
}

/// Decode a response body. A non-JSON body from a failed request reports the
/// HTTP status instead of the parse error.
pub fn decode_response(ok: bool, status: u16, body: &str) -> Result<ChatResponse, String> {
	match serde_json::from_str::<ChatResponse>(body) {
		Ok(resp) => Ok(resp),
		Err(_) if !ok => Err(format!("HTTP {}", status)),
		Err(e) => Err(format!("decode error: {}", e)),
	}
}

/// POST `{"message": ...}` to `endpoint` and decode the reply.
pub async fn post_chat(endpoint: &str, message: &str) -> Result<ChatResponse, String> {
	let body = serde_json::to_string(&ChatRequest { message })
		.map_err(|e| format!("encode error: {}", e))?;

	let opts = RequestInit::new();
	opts.set_method("POST");
	opts.set_mode(RequestMode::Cors);
	opts.set_body(&JsValue::from_str(&body));

	let request = Request::new_with_str_and_init(endpoint, &opts)
		.map_err(|e| format!("request error: {:?}", e))?;
	request
		.headers()
		.set("Content-Type", "application/json")
		.map_err(|e| format!("header error: {:?}", e))?;

	let window = web_sys::window().ok_or("no window")?;
	let resp_value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| format!("fetch error: {:?}", e))?;
	let resp: Response = resp_value
		.dyn_into()
		.map_err(|_| "response is not a Response")?;

	let text = JsFuture::from(resp.text().map_err(|e| format!("text promise error: {:?}", e))?)
		.await
		.map_err(|e| format!("text error: {:?}", e))?;

	decode_response(resp.ok(), resp.status(), &text.as_string().unwrap_or_default())
}

/// Chat panel. Choosing a recommendation selects the matching loaded club, or
/// puts the recommended record in `picked` when it is not on the map.
#[component]
pub fn ClubChat(
	#[prop(into)] clubs: Signal<Vec<Club>>,
	selected: RwSignal<Option<usize>>,
	picked: RwSignal<Option<Club>>,
	#[prop(into, default = DEFAULT_ENDPOINT.to_string())] endpoint: String,
) -> impl IntoView {
	let chat = RwSignal::new(ChatLog::default());
	let input = RwSignal::new(String::new());
	let endpoint = StoredValue::new(endpoint);

	let send = move || {
		let text = input.get_untracked();
		let mut message = None;
		chat.update(|log| message = log.submit(&text));
		let Some(message) = message else { return };
		input.set(String::new());

		let endpoint = endpoint.get_value();
		spawn_local(async move {
			let result = post_chat(&endpoint, &message).await;
			let _ = chat.try_update(|log| log.receive(result));
		});
	};

	let open = move |club: Club| match clubs.with(|c| resolve_pick(c, &club)) {
		Some(ordinal) => {
			picked.set(None);
			selected.set(Some(ordinal));
		}
		None => {
			selected.set(None);
			picked.set(Some(club));
		}
	};

	view! {
		<div class="chat-panel">
			<div class="chat-title">"Mission Control"</div>
			<div class="chat-messages">
				{move || {
					chat.with(|log| {
						log.messages
							.iter()
							.map(|m| {
								let class = match m.role {
									ChatRole::User => "chat-message user",
									ChatRole::Bot => "chat-message bot",
								};
								view! { <div class=class>{m.text.clone()}</div> }
							})
							.collect_view()
					})
				}}
				{move || {
					chat.with(|log| log.pending)
						.then(|| view! { <div class="chat-thinking">"thinking…"</div> })
				}}
			</div>
			<div class="chat-input">
				<input
					type="text"
					placeholder="Ask about clubs or share your interests…"
					prop:value=move || input.get()
					on:input=move |ev| input.set(event_target_value(&ev))
					on:keydown=move |ev| {
						if ev.key() == "Enter" {
							send();
						}
					}
				/>
				<button on:click=move |_| send()>"Send"</button>
			</div>
			{move || {
				let recs = chat.with(|log| log.recommendations.clone());
				(!recs.is_empty()).then(|| {
					view! {
						<div class="chat-recommendations">
							<strong>"Top matches"</strong>
							<ul>
								{recs
									.into_iter()
									.map(|club| {
										let name = club.name.clone();
										let category = club.category.clone();
										view! {
											<li>
												<button
													class="chat-recommendation"
													on:click=move |_| open(club.clone())
												>
													<span>{name}</span>
													{category.map(|c| view! { <span class="chat-category">{c}</span> })}
												</button>
											</li>
										}
									})
									.collect_view()}
							</ul>
						</div>
					}
				})
			}}
		</div>
	}
}
