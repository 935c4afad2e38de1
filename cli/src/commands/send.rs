//! SEND command - Post a notification to the receiver.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use notify_core::InboundNotification;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{HumanReadable, output};

/// Arguments for the send command.
#[derive(Args)]
pub struct SendArgs {
    /// Notification type, e.g. ACCOUNT_DELETED
    #[arg(long = "type", value_name = "TYPE", conflicts_with = "raw")]
    pub notification_type: Option<String>,

    /// Subject identifier sent as `sub` (omitted when not given or empty)
    #[arg(long, conflicts_with = "raw")]
    pub sub: Option<String>,

    /// Extra payload field as key=value; value is parsed as JSON when possible
    #[arg(long = "field", value_name = "KEY=VALUE", conflicts_with = "raw")]
    pub fields: Vec<String>,

    /// Send this text verbatim as the request body
    #[arg(long)]
    pub raw: Option<String>,
}

/// Outcome of posting one notification.
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub status: u16,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Log line the receiver is expected to emit for this payload.
    pub expected_log: String,
}

impl HumanReadable for SendResponse {
    fn print_human(&self) {
        if self.status == 200 {
            println!("{}", "Notification acknowledged".green().bold());
        } else {
            println!("{}", "Notification not acknowledged".red().bold());
        }
        println!();
        println!("  {} {}", "Status:".cyan(), self.status);
        println!("  {} {}", "Body:".cyan(), self.body);
        if let Some(id) = &self.request_id {
            println!("  {} {}", "Request ID:".cyan(), id);
        }
        println!("  {} {}", "Expected log:".cyan(), self.expected_log);
    }
}

/// Split a `key=value` argument. Values that parse as JSON keep their type.
fn parse_field(arg: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = arg.split_once('=') else {
        bail!("invalid field {arg:?}: expected KEY=VALUE");
    };
    if key.is_empty() {
        bail!("invalid field {arg:?}: key is empty");
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Build the request body for the given arguments.
fn build_body(args: &SendArgs) -> Result<String> {
    if let Some(raw) = &args.raw {
        return Ok(raw.clone());
    }

    let mut fields = Map::new();
    for field in &args.fields {
        let (key, value) = parse_field(field)?;
        fields.insert(key, value);
    }

    // --field may also carry notification_type or sub; explicit flags win.
    let mut notification = InboundNotification::from_value(Value::Object(fields));
    if let Some(notification_type) = &args.notification_type {
        notification.notification_type = notification_type.clone();
    }
    if let Some(sub) = &args.sub {
        notification.subject_id = sub.clone();
    }

    Ok(serde_json::to_string(&notification)?)
}

/// The log line the receiver should write for `body`.
fn expected_log(body: &str) -> String {
    let notification = InboundNotification::from_body(body.as_bytes());
    notification.kind().describe(&notification.subject_id)
}

/// Execute the send command.
pub async fn execute(url: &str, human: bool, args: SendArgs) -> Result<()> {
    let body = build_body(&args)?;

    let client = reqwest::Client::new();
    let response = client
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body.clone())
        .send()
        .await
        .with_context(|| format!("failed to reach receiver at {url}"))?;

    let status = response.status().as_u16();
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let response_body = response.text().await?;

    output(
        &SendResponse {
            status,
            body: response_body,
            request_id,
            expected_log: expected_log(&body),
        },
        human,
    )
}
