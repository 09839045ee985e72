use crate::api::queries::{RawAudit, RawAuditAggregate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
	Pending,
	Pass,
	Fail,
}

impl AuditStatus {
	pub fn from_grade(grade: Option<f64>) -> Self {
		match grade {
			None => Self::Pending,
			Some(grade) if grade >= 1.0 => Self::Pass,
			Some(_) => Self::Fail,
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Self::Pending => "Pending",
			Self::Pass => "Pass",
			Self::Fail => "Fail",
		}
	}

	pub fn css_class(&self) -> &'static str {
		match self {
			Self::Pending => "status-pending",
			Self::Pass => "status-pass",
			Self::Fail => "status-fail",
		}
	}
}

/// A peer review the user performed.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
	pub id: Option<i64>,
	pub grade: Option<f64>,
	pub created_at: Option<String>,
	pub project: Option<String>,
	/// Login of the captain of the audited group.
	pub peer: Option<String>,
}

impl AuditRecord {
	pub fn from_raw(raw: &RawAudit) -> Self {
		let group = raw.group.as_ref();
		Self {
			id: raw.id,
			grade: raw.grade,
			created_at: raw.created_at.clone(),
			project: group.and_then(|g| g.object.as_ref()).and_then(|o| o.name.clone()),
			peer: group.and_then(|g| g.captain_login.clone()),
		}
	}

	pub fn status(&self) -> AuditStatus {
		AuditStatus::from_grade(self.grade)
	}
}

/// Records of an audit aggregate, plus the count the server reported (or the
/// number of nodes when it did not).
pub fn audit_records(aggregate: Option<&RawAuditAggregate>) -> (Vec<AuditRecord>, u64) {
	let Some(aggregate) = aggregate else {
		return (Vec::new(), 0);
	};
	let records: Vec<_> = aggregate.nodes.iter().map(AuditRecord::from_raw).collect();
	let count = aggregate
		.aggregate
		.as_ref()
		.and_then(|aggregate| aggregate.count)
		.and_then(|count| u64::try_from(count).ok())
		.unwrap_or(records.len() as u64);
	(records, count)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::queries::{RawCount, RawGroup, RawObject};

	#[test]
	fn status_from_grade() {
		assert_eq!(AuditStatus::from_grade(None), AuditStatus::Pending);
		assert_eq!(AuditStatus::from_grade(Some(0.0)), AuditStatus::Fail);
		assert_eq!(AuditStatus::from_grade(Some(1.0)), AuditStatus::Pass);
		assert_eq!(AuditStatus::from_grade(Some(-5.0)), AuditStatus::Fail);
		assert_eq!(AuditStatus::from_grade(Some(0.99)), AuditStatus::Fail);
		assert_eq!(AuditStatus::from_grade(Some(1.6)), AuditStatus::Pass);
	}

	#[test]
	fn record_without_group_has_no_project_or_peer() {
		let record = AuditRecord::from_raw(&RawAudit {
			id: Some(1),
			grade: Some(1.0),
			created_at: None,
			group: None,
		});
		assert_eq!(record.project, None);
		assert_eq!(record.peer, None);
		assert_eq!(record.status(), AuditStatus::Pass);
	}

	#[test]
	fn record_reads_nested_names() {
		let record = AuditRecord::from_raw(&RawAudit {
			id: Some(2),
			grade: None,
			created_at: Some("2024-01-01T00:00:00+00:00".into()),
			group: Some(RawGroup {
				captain_login: Some("bob".into()),
				object: Some(RawObject {
					id: None,
					name: Some("go-reloaded".into()),
					kind: None,
				}),
			}),
		});
		assert_eq!(record.project.as_deref(), Some("go-reloaded"));
		assert_eq!(record.peer.as_deref(), Some("bob"));
		assert_eq!(record.status(), AuditStatus::Pending);
	}

	#[test]
	fn count_falls_back_to_nodes() {
		let node = RawAudit {
			id: None,
			grade: Some(0.5),
			created_at: None,
			group: None,
		};
		let aggregate = RawAuditAggregate {
			aggregate: None,
			nodes: vec![node.clone(), node],
		};
		assert_eq!(audit_records(Some(&aggregate)).1, 2);
		let aggregate = RawAuditAggregate {
			aggregate: Some(RawCount { count: Some(40) }),
			..aggregate
		};
		assert_eq!(audit_records(Some(&aggregate)).1, 40);
		assert_eq!(audit_records(None), (Vec::new(), 0));
	}
}
