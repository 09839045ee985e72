//! The GraphQL operations this app issues, and the shapes it reads back.
//!
//! Every field the platform sends is optional here; the shapers in
//! [`crate::data`] decide what a missing value means.

use super::graphql::Query;
use crate::{token::UserId, util::lenient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserVariables {
	#[serde(rename = "userId")]
	pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsVariables {
	#[serde(rename = "userId")]
	pub user_id: UserId,
	pub limit: u32,
}

/// The signed-in account, as the engine resolves it from the credential.
pub struct GetUser;
impl Query for GetUser {
	const NAME: &'static str = "GetUser";
	const DOCUMENT: &'static str = r#"
query GetUser {
  user(limit: 1) {
    id
    login
  }
}"#;
	type Variables = ();
	type Data = UserList<RawIdentity>;
}

pub struct GetUserProfile;
impl Query for GetUserProfile {
	const NAME: &'static str = "GetUserProfile";
	const DOCUMENT: &'static str = r#"
query GetUserProfile($userId: Int!) {
  user(where: {id: {_eq: $userId}}) {
    id
    login
    firstName
    lastName
    email
    auditRatio
    totalUp
    totalDown
    skills: transactions(
      where: {
        userId: {_eq: $userId},
        type: {_like: "skill_%"},
        amount: {_gt: 0}
      }
      order_by: [{amount: desc}]
    ) {
      type
      amount
    }
    audits: audits_aggregate(
      where: {
        auditorId: {_eq: $userId},
        grade: {_is_null: false}
      }
      order_by: {createdAt: desc}
    ) {
      nodes {
        id
        grade
        createdAt
        group {
          captainLogin
          object {
            name
          }
        }
      }
    }
    progresses(
      where: {userId: {_eq: $userId}, object: {type: {_eq: "project"}}}
      order_by: {updatedAt: desc}
    ) {
      id
      path
      object {
        id
        name
        type
      }
      grade
      createdAt
      updatedAt
    }
  }
}"#;
	type Variables = UserVariables;
	type Data = UserList<RawUser>;
}

/// Audits the user performed that have been graded.
pub struct GetAuditActivity;
impl Query for GetAuditActivity {
	const NAME: &'static str = "GetAuditActivity";
	const DOCUMENT: &'static str = r#"
query GetAuditActivity($userId: Int!) {
  audit_aggregate(
    where: {auditorId: {_eq: $userId}, grade: {_is_null: false}}
    order_by: {createdAt: desc}
  ) {
    aggregate {
      count
    }
    nodes {
      id
      grade
      createdAt
      group {
        captainLogin
        object {
          name
        }
      }
    }
  }
}"#;
	type Variables = UserVariables;
	type Data = AuditActivity;
}

/// Most recent progress rows of any kind (projects, exercises, checkpoints).
pub struct GetProjectResults;
impl Query for GetProjectResults {
	const NAME: &'static str = "GetProjectResults";
	const DOCUMENT: &'static str = r#"
query GetProjectResults($userId: Int!, $limit: Int!) {
  progress(
    where: {userId: {_eq: $userId}}
    limit: $limit
    order_by: {createdAt: desc}
  ) {
    id
    grade
    createdAt
    updatedAt
    path
    object {
      id
      name
      type
    }
  }
}"#;
	type Variables = ResultsVariables;
	type Data = ProgressList;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct UserList<T> {
	#[serde(default, deserialize_with = "lenient::seq")]
	pub user: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawIdentity {
	#[serde(default, deserialize_with = "lenient::integer")]
	pub id: Option<i64>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub login: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
	#[serde(default, deserialize_with = "lenient::integer")]
	pub id: Option<i64>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub login: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub first_name: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub last_name: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub email: Option<String>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub audit_ratio: Option<f64>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub total_up: Option<f64>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub total_down: Option<f64>,
	#[serde(default, deserialize_with = "lenient::seq")]
	pub skills: Vec<RawTransaction>,
	#[serde(default, deserialize_with = "lenient::record")]
	pub audits: Option<RawAuditAggregate>,
	#[serde(default, deserialize_with = "lenient::seq")]
	pub progresses: Vec<RawProgress>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTransaction {
	#[serde(rename = "type", default, deserialize_with = "lenient::text")]
	pub kind: Option<String>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawAuditAggregate {
	#[serde(default, deserialize_with = "lenient::record")]
	pub aggregate: Option<RawCount>,
	#[serde(default, deserialize_with = "lenient::seq")]
	pub nodes: Vec<RawAudit>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCount {
	#[serde(default, deserialize_with = "lenient::integer")]
	pub count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAudit {
	#[serde(default, deserialize_with = "lenient::integer")]
	pub id: Option<i64>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub grade: Option<f64>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub created_at: Option<String>,
	#[serde(default, deserialize_with = "lenient::record")]
	pub group: Option<RawGroup>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroup {
	#[serde(default, deserialize_with = "lenient::text")]
	pub captain_login: Option<String>,
	#[serde(default, deserialize_with = "lenient::record")]
	pub object: Option<RawObject>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawObject {
	#[serde(default, deserialize_with = "lenient::integer")]
	pub id: Option<i64>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub name: Option<String>,
	#[serde(rename = "type", default, deserialize_with = "lenient::text")]
	pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProgress {
	#[serde(default, deserialize_with = "lenient::integer")]
	pub id: Option<i64>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub grade: Option<f64>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub created_at: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub updated_at: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub path: Option<String>,
	#[serde(default, deserialize_with = "lenient::record")]
	pub object: Option<RawObject>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditActivity {
	#[serde(default, deserialize_with = "lenient::record")]
	pub audit_aggregate: Option<RawAuditAggregate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressList {
	#[serde(default, deserialize_with = "lenient::seq")]
	pub progress: Vec<RawProgress>,
}
