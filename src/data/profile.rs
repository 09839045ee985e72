use super::{aggregate_skills, audit_records, AuditRatio, AuditRecord, ProgressRecord, SkillAmount};
use crate::api::queries::{RawUser, UserList};

/// Everything the profile page shows about one user, rebuilt on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
	pub id: Option<i64>,
	pub login: String,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub email: Option<String>,
	/// The platform's own rounding of the ratio, shown next to ours.
	pub reported_ratio: Option<f64>,
	pub ratio: AuditRatio,
	pub skills: Vec<SkillAmount>,
	pub audits: Vec<AuditRecord>,
	pub audit_count: u64,
	pub progress: Vec<ProgressRecord>,
}

impl UserProfile {
	pub fn from_raw(raw: &RawUser) -> Self {
		let (audits, audit_count) = audit_records(raw.audits.as_ref());
		Self {
			id: raw.id,
			login: raw.login.clone().unwrap_or_default(),
			first_name: raw.first_name.clone(),
			last_name: raw.last_name.clone(),
			email: raw.email.clone(),
			reported_ratio: raw.audit_ratio,
			ratio: AuditRatio::new(raw.total_up, raw.total_down),
			skills: aggregate_skills(&raw.skills),
			audits,
			audit_count,
			progress: raw.progresses.iter().map(ProgressRecord::from_raw).collect(),
		}
	}

	/// The first user of a `user(where: {id: ...})` result.
	pub fn from_list(list: &UserList<RawUser>) -> Option<Self> {
		list.user.first().map(Self::from_raw)
	}

	pub fn full_name(&self) -> Option<String> {
		let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
			.into_iter()
			.flatten()
			.map(str::trim)
			.filter(|part| !part.is_empty())
			.collect();
		match parts.is_empty() {
			true => None,
			false => Some(parts.join(" ")),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::AuditStatus;
	use serde_json::json;

	fn profile(value: serde_json::Value) -> Option<UserProfile> {
		let list: UserList<RawUser> = serde_json::from_value(value).unwrap();
		UserProfile::from_list(&list)
	}

	#[test]
	fn full_profile() {
		let profile = profile(json!({ "user": [{
			"id": 42,
			"login": "alice",
			"firstName": "Alice",
			"lastName": "Liddell",
			"email": "alice@example.com",
			"auditRatio": 1.49,
			"totalUp": 3145728,
			"totalDown": 2097152,
			"skills": [
				{ "type": "skill_go", "amount": 40 },
				{ "type": "skill_go", "amount": 55 },
				{ "type": "skill_prog", "amount": 70 }
			],
			"audits": { "nodes": [
				{ "id": 1, "grade": 0.4, "createdAt": "2024-01-02T00:00:00+00:00",
				  "group": { "captainLogin": "bob", "object": { "name": "groupie-tracker" } } }
			] },
			"progresses": [
				{ "id": 9, "grade": null, "path": "/school/div-01/forum", "object": { "name": "forum" } }
			]
		}] }))
		.unwrap();
		assert_eq!(profile.login, "alice");
		assert_eq!(profile.full_name().as_deref(), Some("Alice Liddell"));
		assert_eq!(profile.ratio.display_ratio(), "1.5");
		assert_eq!(profile.reported_ratio, Some(1.49));
		assert_eq!(
			profile.skills.iter().map(|s| (s.label.as_str(), s.amount)).collect::<Vec<_>>(),
			vec![("Elementary programming", 70), ("Go", 55)]
		);
		assert_eq!(profile.audits[0].status(), AuditStatus::Fail);
		assert_eq!(profile.audit_count, 1);
		assert_eq!(profile.progress[0].name.as_deref(), Some("forum"));
	}

	#[test]
	fn sparse_profile_degrades_per_field() {
		let profile = profile(json!({ "user": [{ "login": "bob", "totalDown": "oops", "audits": 5 }] })).unwrap();
		assert_eq!(profile.login, "bob");
		assert_eq!(profile.full_name(), None);
		assert_eq!(profile.ratio.ratio(), None);
		assert!(profile.skills.is_empty());
		assert!(profile.audits.is_empty());
		assert!(profile.progress.is_empty());
	}

	#[test]
	fn string_id_and_numeric_dates_keep_the_profile() {
		let profile = profile(json!({ "user": [{
			"id": "42",
			"login": "alice",
			"audits": { "nodes": [
				{ "id": 1, "grade": 1.0, "createdAt": 1700000000,
				  "group": { "captainLogin": "bob", "object": { "name": "forum" } } }
			] }
		}] }))
		.unwrap();
		assert_eq!(profile.id, Some(42));
		assert_eq!(profile.login, "alice");
		assert_eq!(profile.audits.len(), 1);
		assert_eq!(profile.audits[0].created_at, None);
		assert_eq!(profile.audits[0].project.as_deref(), Some("forum"));
	}

	#[test]
	fn no_user_means_no_profile() {
		assert_eq!(profile(json!({ "user": [] })), None);
		assert_eq!(profile(json!({})), None);
	}
}
