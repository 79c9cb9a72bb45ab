//! Turning script metadata into a `pip install` command.

pub mod plan;

pub use plan::{
    decide_install, plan_install, quote_argument, InstallDecision, InstallPlan, PIP_INSTALL_ARGS,
};
