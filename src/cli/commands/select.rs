//! select and clear commands

use crate::cli::context::{fail, CommandContext, EXIT_OK};
use crate::core::state::{ComplianceType, Plan};
use clap::Args;

/// Arguments for the select command
#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("choice")
        .required(true)
        .multiple(true)
        .args(["compliance", "plan"])
))]
pub struct SelectArgs {
    /// Compliance framework (EUDR, "Rainforest Alliance" or FSC)
    #[arg(long)]
    pub compliance: Option<ComplianceType>,

    /// Subscription plan (basic, pro or ultra)
    #[arg(long)]
    pub plan: Option<Plan>,
}

impl SelectArgs {
    /// Execute the select command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        if let Some(compliance) = self.compliance {
            if let Err(e) = ctx.state.set_compliance_type(compliance) {
                return Ok(fail(&e, "Failed to store compliance type"));
            }
            tracing::info!(compliance = %compliance, "Selected compliance type");
            println!("✅ Compliance type: {compliance}");
        }

        if let Some(plan) = self.plan {
            if let Err(e) = ctx.state.set_plan(plan) {
                return Ok(fail(&e, "Failed to store plan"));
            }
            tracing::info!(plan = %plan, "Selected plan");
            println!("✅ Plan: {plan}");
        }

        Ok(EXIT_OK)
    }
}

/// Arguments for the clear command
#[derive(Args, Debug)]
pub struct ClearArgs {}

impl ClearArgs {
    /// Execute the clear command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        match ctx.state.clear_analysis() {
            Ok(()) => {
                println!("🧹 Stored analysis results cleared");
                Ok(EXIT_OK)
            }
            Err(e) => Ok(fail(&e, "Failed to clear results")),
        }
    }
}
