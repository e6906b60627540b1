//! login, logout and status commands

use crate::cli::context::{fail, CommandContext, EXIT_CONFIG, EXIT_OK};
use crate::core::state::SessionStatus;
use chrono::Utc;
use clap::Args;

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// User name to record for the session
    pub username: String,
}

impl LoginArgs {
    /// Execute the login command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let username = self.username.trim();
        if username.is_empty() {
            eprintln!("❌ User name must not be empty");
            return Ok(EXIT_CONFIG);
        }

        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        match ctx.state.login(username, Utc::now()) {
            Ok(session) => {
                println!("✅ Logged in as {}", session.display_name());
                println!(
                    "   Session valid for {} hours",
                    ctx.config.session.ttl_hours
                );
                Ok(EXIT_OK)
            }
            Err(e) => Ok(fail(&e, "Failed to store session")),
        }
    }
}

/// Arguments for the logout command
#[derive(Args, Debug)]
pub struct LogoutArgs {}

impl LogoutArgs {
    /// Execute the logout command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        match ctx.state.logout() {
            Ok(()) => {
                println!("👋 Logged out");
                Ok(EXIT_OK)
            }
            Err(e) => Ok(fail(&e, "Failed to clear session")),
        }
    }
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };
        let now = Utc::now();
        let ttl = ctx.config.session.ttl();

        println!("📊 Whisp Status");
        println!();

        println!("Session:");
        match ctx.state.check_session(now, ttl) {
            Ok(SessionStatus::Active(session)) => {
                println!("  User: {}", session.display_name());
                if let Some(login_time) = session.login_time {
                    println!("  Logged in: {}", login_time.format("%Y-%m-%d %H:%M:%S UTC"));
                }
                if let Some(remaining) = session.remaining(now, ttl) {
                    println!(
                        "  Expires in: {}h {:02}m",
                        remaining.num_hours(),
                        remaining.num_minutes() % 60
                    );
                }
            }
            Ok(SessionStatus::Expired(session)) => {
                println!("  ⚠️  Session for {} expired and was cleared", session.display_name());
            }
            Ok(SessionStatus::LoggedOut) => println!("  Not logged in"),
            Err(e) => return Ok(fail(&e, "Failed to read session")),
        }

        println!();
        println!("Preferences:");
        let compliance = ctx.state.compliance_type().ok().flatten();
        let plan = ctx.state.plan().ok().flatten();
        println!(
            "  Compliance: {}",
            compliance.map_or("not selected".to_string(), |c| c.to_string())
        );
        println!(
            "  Plan: {}",
            plan.map_or("not selected".to_string(), |p| p.to_string())
        );

        println!();
        println!("Analysis:");
        match ctx.state.load_analysis() {
            Ok(Some(stored)) => {
                println!(
                    "  Source: {}",
                    stored.file_name.as_deref().unwrap_or("viewer URL")
                );
                println!("  Payload shape: {}", stored.payload.shape().as_str());
                println!("  Features: {}", stored.payload.features().len());
            }
            Ok(None) => println!("  No stored results"),
            Err(e) => return Ok(fail(&e, "Failed to read stored results")),
        }
        println!("  State file: {}", ctx.config.state.path);

        Ok(EXIT_OK)
    }
}
