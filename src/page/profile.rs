use crate::{
	api::{
		graphql::FetchPolicy,
		queries::{GetAuditActivity, GetProjectResults, GetUserProfile, ResultsVariables, UserVariables},
	},
	components::{
		query_panel,
		user::{Identification, LogoutButton},
		AuditRatioGraph, SkillsGraph, StatusTag, StatusTagProps,
	},
	data::{audit_records, AuditRecord, ProgressRecord, UserProfile},
	hooks::use_query,
	session::SessionHandle,
	token::UserId,
	util::date,
};
use yew::prelude::*;

/// How many rows the recent results table shows.
const RECENT_RESULTS: u32 = 10;

#[function_component]
pub fn Page() -> Html {
	let session = use_context::<SessionHandle>().expect("session context is provided by the app root");
	let Some(user_id) = session.user_id() else {
		return html!();
	};
	html! {<>
		<nav class="navbar is-dark" role="navigation">
			<div class="navbar-brand">
				<span class="navbar-item"><strong>{"School Profile"}</strong></span>
			</div>
			<div class="navbar-menu is-active">
				<div class="navbar-end">
					<Identification />
					<div class="navbar-item"><LogoutButton /></div>
				</div>
			</div>
		</nav>
		<section class="section">
			<div class="container">
				<Summary {user_id} />
				<Audits {user_id} />
				<RecentResults {user_id} />
			</div>
		</section>
	</>}
}

#[derive(Clone, Copy, PartialEq, Properties)]
pub struct UserProps {
	pub user_id: UserId,
}

#[function_component]
fn Summary(UserProps { user_id }: &UserProps) -> Html {
	let profile = use_query::<GetUserProfile>(UserVariables { user_id: *user_id }, FetchPolicy::NetworkOnly);
	query_panel(&profile, |list| match UserProfile::from_list(list) {
		None => html! {
			<div class="notification is-warning is-light">{"No profile was found for this account."}</div>
		},
		Some(profile) => html! {<>
			<UserInfo profile={profile.clone()} />
			<div class="columns">
				<div class="column"><AuditRatioGraph ratio={profile.ratio} /></div>
				<div class="column"><SkillsGraph skills={profile.skills.clone()} /></div>
			</div>
			<ProjectTable progress={profile.progress.clone()} />
			<p class="has-text-grey">{format!("Audits performed: {}", profile.audit_count)}</p>
		</>},
	})
}

#[derive(PartialEq, Properties)]
struct UserInfoProps {
	profile: UserProfile,
}

#[function_component]
fn UserInfo(UserInfoProps { profile }: &UserInfoProps) -> Html {
	let row = |label: &'static str, value: Option<String>| {
		html! {
			<tr>
				<th>{label}</th>
				<td>{value.unwrap_or_else(|| "–".to_owned())}</td>
			</tr>
		}
	};
	html! {
		<div class="box">
			<h2 class="title is-4">{format!("Welcome, {}", profile.login)}</h2>
			<table class="table is-fullwidth">
				<tbody>
					{row("Name", profile.full_name())}
					{row("Email", profile.email.clone())}
					{row("User id", profile.id.map(|id| id.to_string()))}
					{row("Reported ratio", profile.reported_ratio.map(|ratio| format!("{ratio:.1}")))}
				</tbody>
			</table>
		</div>
	}
}

#[derive(PartialEq, Properties)]
struct ProjectTableProps {
	progress: Vec<ProgressRecord>,
}

#[function_component]
fn ProjectTable(ProjectTableProps { progress }: &ProjectTableProps) -> Html {
	html! {
		<div class="box">
			<h3 class="title is-5">{"Projects"}</h3>
			{progress_table(progress)}
		</div>
	}
}

fn progress_table(records: &[ProgressRecord]) -> Html {
	if records.is_empty() {
		return html!(<p>{"Nothing here yet."}</p>);
	}
	html! {
		<table class="table is-fullwidth is-striped">
			<thead>
				<tr>
					<th>{"Name"}</th>
					<th>{"Status"}</th>
					<th>{"Started"}</th>
					<th>{"Updated"}</th>
				</tr>
			</thead>
			<tbody>
				{for records.iter().map(|record| html! {
					<tr>
						<td title={record.path.clone()}>{record.name.clone().unwrap_or_else(|| "Unknown".to_owned())}</td>
						<td><StatusTag ..StatusTagProps::from(record.status()) /></td>
						<td>{record.created_at.as_deref().map(date::display_day).unwrap_or_default()}</td>
						<td>{record.updated_at.as_deref().map(date::display_day).unwrap_or_default()}</td>
					</tr>
				})}
			</tbody>
		</table>
	}
}

#[function_component]
fn Audits(UserProps { user_id }: &UserProps) -> Html {
	let activity = use_query::<GetAuditActivity>(UserVariables { user_id: *user_id }, FetchPolicy::NetworkOnly);
	query_panel(&activity, |activity| {
		let (records, count) = audit_records(activity.audit_aggregate.as_ref());
		html! {
			<div class="box">
				<h3 class="title is-5">{format!("Audits ({count})")}</h3>
				{audit_table(&records)}
			</div>
		}
	})
}

fn audit_table(records: &[AuditRecord]) -> Html {
	if records.is_empty() {
		return html!(<p>{"No audits yet."}</p>);
	}
	html! {
		<table class="table is-fullwidth is-striped">
			<thead>
				<tr>
					<th>{"Project"}</th>
					<th>{"Captain"}</th>
					<th>{"Grade"}</th>
					<th>{"Result"}</th>
					<th>{"Date"}</th>
				</tr>
			</thead>
			<tbody>
				{for records.iter().map(|record| html! {
					<tr>
						<td>{record.project.clone().unwrap_or_else(|| "Unknown".to_owned())}</td>
						<td>{record.peer.clone().unwrap_or_else(|| "–".to_owned())}</td>
						<td>{record.grade.map(|grade| format!("{grade:.2}")).unwrap_or_default()}</td>
						<td><StatusTag ..StatusTagProps::from(record.status()) /></td>
						<td>{record.created_at.as_deref().map(date::display_day).unwrap_or_default()}</td>
					</tr>
				})}
			</tbody>
		</table>
	}
}

#[function_component]
fn RecentResults(UserProps { user_id }: &UserProps) -> Html {
	let variables = ResultsVariables {
		user_id: *user_id,
		limit: RECENT_RESULTS,
	};
	let results = use_query::<GetProjectResults>(variables, FetchPolicy::NetworkOnly);
	query_panel(&results, |list| {
		let records: Vec<_> = list.progress.iter().map(ProgressRecord::from_raw).collect();
		html! {
			<div class="box">
				<h3 class="title is-5">{"Recent results"}</h3>
				{progress_table(&records)}
			</div>
		}
	})
}
