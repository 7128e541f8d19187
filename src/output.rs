//! Output formatters (human and JSONL)

pub mod human;
pub mod jsonl;
pub mod rule_status;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;
pub use rule_status::{
    RuleState, RuleStatus, RuleStatusHumanFormatter, RuleStatusJsonlFormatter, rule_statuses,
};
