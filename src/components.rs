pub mod audit_ratio_graph;
pub use audit_ratio_graph::AuditRatioGraph;

mod auth_switch;
pub use auth_switch::*;

mod panel;
pub use panel::*;

pub mod skills_graph;
pub use skills_graph::SkillsGraph;

mod status;
pub use status::*;

pub mod user;
