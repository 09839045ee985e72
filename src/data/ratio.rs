pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// XP given (up) versus received (down) through audits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AuditRatio {
	pub up_bytes: f64,
	pub down_bytes: f64,
}

impl AuditRatio {
	/// Missing counters read as zero.
	pub fn new(up_bytes: Option<f64>, down_bytes: Option<f64>) -> Self {
		Self {
			up_bytes: up_bytes.unwrap_or_default().max(0.0),
			down_bytes: down_bytes.unwrap_or_default().max(0.0),
		}
	}

	pub fn up_mb(&self) -> f64 {
		self.up_bytes / BYTES_PER_MB
	}

	pub fn down_mb(&self) -> f64 {
		self.down_bytes / BYTES_PER_MB
	}

	/// Undefined when nothing was received.
	pub fn ratio(&self) -> Option<f64> {
		if self.down_bytes <= 0.0 {
			return None;
		}
		Some(self.up_bytes / self.down_bytes).filter(|ratio| ratio.is_finite())
	}

	pub fn display_ratio(&self) -> String {
		match self.ratio() {
			Some(ratio) => format!("{ratio:.1}"),
			None => "–".to_owned(),
		}
	}

	pub fn verdict(&self) -> &'static str {
		match self.ratio() {
			None => "No audits received yet",
			Some(ratio) if ratio < 1.0 => "You can do better!",
			Some(_) => "Keep it up!",
		}
	}
}
