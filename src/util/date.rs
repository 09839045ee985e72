use time::{format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime};

/// Parses a platform timestamp (`2024-01-15T10:20:30.123456+00:00`).
pub fn parse(raw: &str) -> Option<OffsetDateTime> {
	OffsetDateTime::parse(raw, &Rfc3339).ok()
}

/// Day-level rendering for tables; unparseable input is shown as-is.
pub fn display_day(raw: &str) -> String {
	let format = format_description!("[year]-[month]-[day]");
	parse(raw)
		.and_then(|instant| instant.format(&format).ok())
		.unwrap_or_else(|| raw.to_owned())
}
