use crate::api::queries::RawTransaction;
use convert_case::{Case, Casing};
use itertools::Itertools;
use std::collections::HashMap;

/// Transaction types for skills are `skill_<category>`.
pub static SKILL_PREFIX: &str = "skill_";
/// How many skills the dashboard shows.
pub const TOP_SKILLS: usize = 6;

static TECHNICAL_SKILLS: phf::Map<&'static str, &'static str> = phf::phf_map! {
	"prog" => "Elementary programming",
	"back-end" => "Back-end",
	"front-end" => "Front-end",
	"algo" => "Elementary algorithms",
	"sys-admin" => "System administration",
	"game" => "Game programming",
};

static TECHNOLOGIES: phf::Map<&'static str, &'static str> = phf::phf_map! {
	"go" => "Go",
	"js" => "JS",
	"php" => "PHP",
	"c" => "C",
	"python" => "Python",
	"html" => "HTML",
	"css" => "CSS",
	"sql" => "SQL",
	"unix" => "Unix",
	"docker" => "Docker",
	"rust" => "Rust",
	"ruby" => "Ruby",
};

#[derive(Debug, Clone, PartialEq)]
pub struct SkillAmount {
	/// Category with the `skill_` prefix removed, lower case.
	pub key: String,
	pub label: String,
	pub amount: i64,
}

/// Display name of a skill category. Unknown categories are title-cased per
/// hyphenated word (`tcp-ip` becomes `Tcp-Ip`).
pub fn skill_label(key: &str) -> String {
	match TECHNICAL_SKILLS.get(key).or_else(|| TECHNOLOGIES.get(key)) {
		Some(label) => (*label).to_owned(),
		None => key.from_case(Case::Kebab).to_case(Case::Train),
	}
}

/// Collapses skill transactions to the best level per category and keeps the
/// strongest [`TOP_SKILLS`]. Rows without a type or a numeric amount are
/// ignored.
pub fn aggregate_skills(rows: &[RawTransaction]) -> Vec<SkillAmount> {
	let mut order = Vec::new();
	let mut best = HashMap::<String, f64>::new();
	for row in rows {
		let (Some(kind), Some(amount)) = (row.kind.as_deref(), row.amount) else {
			continue;
		};
		let kind = kind.to_lowercase();
		let key = kind.strip_prefix(SKILL_PREFIX).unwrap_or(&kind);
		match best.get_mut(key) {
			Some(current) => *current = current.max(amount),
			None => {
				order.push(key.to_owned());
				best.insert(key.to_owned(), amount);
			}
		}
	}
	order
		.into_iter()
		.map(|key| {
			let amount = best.get(&key).copied().unwrap_or_default().round() as i64;
			SkillAmount {
				label: skill_label(&key),
				key,
				amount,
			}
		})
		.sorted_by(|a, b| b.amount.cmp(&a.amount))
		.take(TOP_SKILLS)
		.collect()
}
