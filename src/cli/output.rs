//! Plain-text tables for command output.

use crate::api::dto::{ApprovalTicket, Role, User};
use crate::config::Config;
use crate::request::ErrorPayload;

const MASK: &str = "••••••••";

pub fn users_table(users: &[User]) -> String {
    let mut out = format!("{:<12} {:<24} {:<32} {:<12}\n", "ID", "NAME", "EMAIL", "ROLE");
    for user in users {
        out.push_str(&format!(
            "{:<12} {:<24} {:<32} {:<12}\n",
            user.id,
            user.name,
            user.email,
            user.role.as_deref().unwrap_or("-"),
        ));
    }
    out
}

pub fn roles_table(roles: &[Role]) -> String {
    let mut out = format!("{:<12} {}\n", "ID", "NAME");
    for role in roles {
        out.push_str(&format!("{:<12} {}\n", role.id, role.name));
    }
    out
}

pub fn tickets_table(tickets: &[ApprovalTicket]) -> String {
    let mut out = format!(
        "{:<12} {:<32} {:<12} {:<20}\n",
        "ID", "TITLE", "STATUS", "REQUESTED BY"
    );
    for ticket in tickets {
        out.push_str(&format!(
            "{:<12} {:<32} {:<12} {:<20}\n",
            ticket.id,
            ticket.title,
            ticket.status.as_deref().unwrap_or("-"),
            ticket.requested_by.as_deref().unwrap_or("-"),
        ));
    }
    out
}

/// One `• message` line per backend message.
pub fn failure(error: &ErrorPayload) -> String {
    error.bullet_lines().join("\n")
}

/// Config as TOML with tokens replaced by a mask.
pub fn masked_config(config: &Config) -> Result<String, toml::ser::Error> {
    let mut masked = config.clone();
    for token in [&mut masked.auth.access_token, &mut masked.auth.refresh_token] {
        if token.is_some() {
            *token = Some(MASK.to_string());
        }
    }
    toml::to_string_pretty(&masked)
}
