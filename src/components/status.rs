use crate::data::{AuditStatus, ProgressStatus};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct StatusTagProps {
	pub label: &'static str,
	pub class: &'static str,
}

#[function_component]
pub fn StatusTag(StatusTagProps { label, class }: &StatusTagProps) -> Html {
	html! {
		<span class={classes!("tag", *class)}>{*label}</span>
	}
}

impl From<AuditStatus> for StatusTagProps {
	fn from(status: AuditStatus) -> Self {
		Self {
			label: status.label(),
			class: status.css_class(),
		}
	}
}

impl From<ProgressStatus> for StatusTagProps {
	fn from(status: ProgressStatus) -> Self {
		Self {
			label: status.label(),
			class: status.css_class(),
		}
	}
}
