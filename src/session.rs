//! Who is signed in, and for how long.
//!
//! [`Session`] is owned by the root [`Provider`] and handed to the rest of the
//! app as a [`SessionHandle`] context. All changes go through
//! [`SessionAction`]s so the persisted slot and the query cache are always
//! reset together.

use crate::{
	api::cache::QueryCache,
	config::Config,
	storage::{CredentialSlot, LocalSlot},
	token::{Credential, TokenError, UserId},
};
use derivative::Derivative;
use std::rc::Rc;
use time::OffsetDateTime;
use yew::{html::ChildrenProps, prelude::*};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
	LoggedOut,
	LoggedIn(Credential),
}

/// Why the last session ended without the user asking.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExpiryReason {
	#[error("Your session has expired, please sign in again.")]
	LocalExpiry,
	#[error("The server rejected your session: {0}")]
	ServerRejected(String),
	#[error("Your session could not be read: {0}")]
	InvalidToken(#[from] TokenError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
	/// A fresh credential string from the sign-in endpoint.
	SignedIn(String),
	/// Something observed that the credential is no longer accepted.
	Expired(ExpiryReason),
	/// Re-check the current credential against the clock.
	Revalidate,
	Logout,
}

#[derive(Clone, Derivative)]
#[derivative(PartialEq, Debug)]
pub struct Session {
	state: SessionState,
	last_exit: Option<ExpiryReason>,
	#[derivative(PartialEq = "ignore", Debug = "ignore")]
	slot: Rc<dyn CredentialSlot>,
	#[derivative(PartialEq = "ignore")]
	cache: QueryCache,
}

impl Session {
	/// Restores a persisted credential if it is still usable at `now`.
	pub fn init(slot: Rc<dyn CredentialSlot>, cache: QueryCache, now: OffsetDateTime) -> Self {
		let mut session = Self {
			state: SessionState::LoggedOut,
			last_exit: None,
			slot,
			cache,
		};
		if let Some(raw) = session.slot.load() {
			match accept(&raw, now) {
				Ok(credential) => {
					log::info!(target: "session", "restored session for user {}", credential.subject());
					session.state = SessionState::LoggedIn(credential);
				}
				Err(reason) => {
					log::info!(target: "session", "discarding persisted credential: {reason}");
					session.slot.clear();
					session.last_exit = Some(reason);
				}
			}
		}
		session
	}

	pub fn state(&self) -> &SessionState {
		&self.state
	}

	pub fn credential(&self) -> Option<&Credential> {
		match &self.state {
			SessionState::LoggedIn(credential) => Some(credential),
			SessionState::LoggedOut => None,
		}
	}

	pub fn user_id(&self) -> Option<UserId> {
		self.credential().map(Credential::subject)
	}

	pub fn is_logged_in(&self) -> bool {
		matches!(self.state, SessionState::LoggedIn(_))
	}

	pub fn last_exit(&self) -> Option<&ExpiryReason> {
		self.last_exit.as_ref()
	}

	pub fn cache(&self) -> &QueryCache {
		&self.cache
	}

	pub fn transition(&mut self, action: SessionAction, now: OffsetDateTime) {
		match action {
			SessionAction::SignedIn(raw) => match accept(&raw, now) {
				Ok(credential) => {
					log::info!(target: "session", "signed in as user {}", credential.subject());
					self.slot.save(credential.as_str());
					self.cache.clear();
					self.last_exit = None;
					self.state = SessionState::LoggedIn(credential);
				}
				Err(reason) => {
					log::warn!(target: "session", "sign-in produced an unusable credential: {reason}");
					self.end(Some(reason));
				}
			},
			SessionAction::Expired(reason) => {
				log::info!(target: "session", "session expired: {reason}");
				self.end(Some(reason));
			}
			SessionAction::Revalidate => {
				let expired = self.credential().map_or(false, |credential| credential.is_expired_at(now));
				if expired {
					self.end(Some(ExpiryReason::LocalExpiry));
				}
			}
			SessionAction::Logout => {
				log::info!(target: "session", "logged out");
				self.end(None);
			}
		}
	}

	fn end(&mut self, reason: Option<ExpiryReason>) {
		self.slot.clear();
		self.cache.clear();
		self.last_exit = reason;
		self.state = SessionState::LoggedOut;
	}
}

fn accept(raw: &str, now: OffsetDateTime) -> Result<Credential, ExpiryReason> {
	let credential = Credential::parse(raw)?;
	if credential.is_expired_at(now) {
		return Err(ExpiryReason::LocalExpiry);
	}
	Ok(credential)
}

impl Reducible for Session {
	type Action = SessionAction;

	fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
		let mut next = (*self).clone();
		next.transition(action, OffsetDateTime::now_utc());
		match next != *self {
			true => Rc::new(next),
			false => self,
		}
	}
}

pub type SessionHandle = UseReducerHandle<Session>;

/// Browsers run timers with a signed 32-bit millisecond delay.
const MAX_TIMER_MILLIS: i128 = i32::MAX as i128;

/// One sleep towards a credential's expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryWake {
	/// The delay reaches the expiry instant; revalidate when it fires.
	AtExpiry(u32),
	/// The expiry is further out than one timer can wait; sleep again.
	Rearm(u32),
}

impl ExpiryWake {
	pub fn until(expires_at: OffsetDateTime, now: OffsetDateTime) -> Self {
		let remaining = (expires_at - now).whole_milliseconds().max(0);
		match remaining > MAX_TIMER_MILLIS {
			true => Self::Rearm(MAX_TIMER_MILLIS as u32),
			false => Self::AtExpiry(remaining as u32),
		}
	}
}

#[function_component]
pub fn Provider(props: &ChildrenProps) -> Html {
	let config = use_context::<Config>().expect("Config context is provided by the app root");
	let session = use_reducer({
		let key = config.credential_key;
		move || Session::init(Rc::new(LocalSlot::new(key)), QueryCache::default(), OffsetDateTime::now_utc())
	});

	// Log out when the credential runs out, even if nothing is being fetched.
	let expiry = session.credential().map(Credential::expires_at);
	let wakes = use_state_eq(|| 0u64);
	use_effect_with((expiry, *wakes), {
		let session = session.clone();
		let wakes = wakes.clone();
		move |(expiry, count): &(Option<OffsetDateTime>, u64)| {
			let count = *count;
			let timer = expiry.map(|expires_at| match ExpiryWake::until(expires_at, OffsetDateTime::now_utc()) {
				ExpiryWake::AtExpiry(millis) => gloo_timers::callback::Timeout::new(millis, move || {
					session.dispatch(SessionAction::Revalidate);
				}),
				ExpiryWake::Rearm(millis) => gloo_timers::callback::Timeout::new(millis, move || {
					wakes.set(count.wrapping_add(1));
				}),
			});
			move || drop(timer)
		}
	});

	html! {
		<ContextProvider<SessionHandle> context={session}>
			{props.children.clone()}
		</ContextProvider<SessionHandle>>
	}
}
