//! Message templates, one per channel

use crate::channel::Channel;
use crate::target::ServiceInfo;

const UNKNOWN_SERVICE: &str = "unknown service";

/// Render the message for `channel`
pub fn render(channel: Channel, failed: bool, info: Option<&ServiceInfo>) -> String {
    match channel {
        Channel::Email => email_template(failed, info),
        Channel::Sms => sms_template(failed, info),
        Channel::Phone => call_template(failed, info),
    }
}

pub fn email_template(failed: bool, info: Option<&ServiceInfo>) -> String {
    let name = service_name(info);
    let (subject, body) = if failed {
        (
            format!("[ALERT] {} is down", name),
            format!("The check for {} is failing.", describe(info)),
        )
    } else {
        (
            format!("[OK] {} is back up", name),
            format!("The check for {} has recovered.", describe(info)),
        )
    };
    format!("Subject: {}\n\n{}\n", subject, body)
}

pub fn sms_template(failed: bool, info: Option<&ServiceInfo>) -> String {
    let state = if failed { "DOWN" } else { "UP" };
    format!("{}: {}", state, service_name(info))
}

pub fn call_template(failed: bool, info: Option<&ServiceInfo>) -> String {
    if failed {
        format!(
            "This is an automated alert. The service {} is not responding.",
            service_name(info)
        )
    } else {
        format!(
            "This is an automated notice. The service {} is responding again.",
            service_name(info)
        )
    }
}

fn service_name(info: Option<&ServiceInfo>) -> &str {
    match info {
        Some(info) if !info.name.is_empty() => &info.name,
        _ => UNKNOWN_SERVICE,
    }
}

fn describe(info: Option<&ServiceInfo>) -> String {
    match info {
        Some(info) if !info.host.is_empty() && !info.kind.is_empty() => {
            format!("{} ({} {})", service_name(Some(info)), info.kind, info.host)
        }
        Some(info) if !info.host.is_empty() => {
            format!("{} ({})", service_name(Some(info)), info.host)
        }
        _ => service_name(info).to_string(),
    }
}
