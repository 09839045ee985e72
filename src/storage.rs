use gloo_storage::{LocalStorage, Storage};
#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

/// The one persisted value this app owns: the raw credential string.
pub trait CredentialSlot {
	fn load(&self) -> Option<String>;
	fn save(&self, credential: &str);
	fn clear(&self);
}

/// Browser `localStorage`, surviving reloads until logout or expiry.
pub struct LocalSlot {
	key: &'static str,
}
impl LocalSlot {
	pub fn new(key: &'static str) -> Self {
		Self { key }
	}
}
impl CredentialSlot for LocalSlot {
	fn load(&self) -> Option<String> {
		match LocalStorage::raw().get_item(self.key) {
			Ok(value) => value.and_then(stored_credential),
			Err(err) => {
				log::warn!(target: "storage", "could not read the credential slot: {err:?}");
				None
			}
		}
	}

	fn save(&self, credential: &str) {
		if let Err(err) = LocalStorage::raw().set_item(self.key, credential) {
			log::error!(target: "storage", "failed to persist credential: {err:?}");
		}
	}

	fn clear(&self) {
		LocalStorage::delete(self.key);
	}
}

/// The slot holds the bare credential. A json-quoted value (as written by a
/// json storage wrapper) is read back unquoted.
pub fn stored_credential(value: String) -> Option<String> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return None;
	}
	match trimmed.starts_with('"') {
		true => serde_json::from_str::<String>(trimmed).ok().filter(|token| !token.is_empty()),
		false => Some(trimmed.to_owned()),
	}
}

#[cfg(test)]
#[derive(Default, Clone)]
pub struct MemorySlot(Rc<RefCell<Option<String>>>);
#[cfg(test)]
impl MemorySlot {
	pub fn with(credential: impl Into<String>) -> Self {
		Self(Rc::new(RefCell::new(Some(credential.into()))))
	}
}
#[cfg(test)]
impl CredentialSlot for MemorySlot {
	fn load(&self) -> Option<String> {
		self.0.borrow().clone()
	}

	fn save(&self, credential: &str) {
		*self.0.borrow_mut() = Some(credential.to_owned());
	}

	fn clear(&self) {
		*self.0.borrow_mut() = None;
	}
}
