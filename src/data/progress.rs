use crate::api::queries::RawProgress;

/// Progress only distinguishes graded from not-yet-graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
	Pending,
	Succeeded,
}

impl ProgressStatus {
	pub fn from_grade(grade: Option<f64>) -> Self {
		match grade {
			None => Self::Pending,
			Some(_) => Self::Succeeded,
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Pending => "Pending",
			Self::Succeeded => "Succeeded",
		}
	}

	pub fn css_class(&self) -> &'static str {
		match self {
			Self::Pending => "status-pending",
			Self::Succeeded => "status-pass",
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
	pub id: Option<i64>,
	pub name: Option<String>,
	pub path: Option<String>,
	pub grade: Option<f64>,
	pub created_at: Option<String>,
	pub updated_at: Option<String>,
}

impl ProgressRecord {
	pub fn from_raw(raw: &RawProgress) -> Self {
		let name = raw
			.object
			.as_ref()
			.and_then(|object| object.name.clone())
			.or_else(|| raw.path.as_deref().and_then(last_segment));
		Self {
			id: raw.id,
			name,
			path: raw.path.clone(),
			grade: raw.grade,
			created_at: raw.created_at.clone(),
			updated_at: raw.updated_at.clone(),
		}
	}

	pub fn status(&self) -> ProgressStatus {
		ProgressStatus::from_grade(self.grade)
	}
}

fn last_segment(path: &str) -> Option<String> {
	path.rsplit('/').find(|segment| !segment.is_empty()).map(str::to_owned)
}
