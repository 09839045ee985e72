use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Results of previous queries keyed by operation and variables.
///
/// Every [`clear`](QueryCache::clear) starts a new generation; a request that
/// began in an older generation may not write its result back.
#[derive(Clone, Default)]
pub struct QueryCache(Rc<RefCell<CacheState>>);

#[derive(Default, Debug)]
struct CacheState {
	generation: u64,
	entries: HashMap<String, serde_json::Value>,
}

impl std::fmt::Debug for QueryCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.0.borrow();
		f.debug_struct("QueryCache")
			.field("generation", &state.generation)
			.field("entries", &state.entries.len())
			.finish()
	}
}

impl QueryCache {
	pub fn generation(&self) -> u64 {
		self.0.borrow().generation
	}

	pub fn get(&self, key: &str) -> Option<serde_json::Value> {
		self.0.borrow().entries.get(key).cloned()
	}

	/// Stores `value` unless the cache was cleared after `generation` was read.
	pub fn insert(&self, generation: u64, key: String, value: serde_json::Value) -> bool {
		let mut state = self.0.borrow_mut();
		if state.generation != generation {
			log::debug!(target: "cache", "dropping stale result for {key}");
			return false;
		}
		state.entries.insert(key, value);
		true
	}

	pub fn clear(&self) {
		let mut state = self.0.borrow_mut();
		state.generation += 1;
		state.entries.clear();
	}

	pub fn len(&self) -> usize {
		self.0.borrow().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
