use autoconf_common::config::ConfigTarget;
use autoconf_core::sync::ServiceStatus;
use autoconf_protocols::http::Health;
use colored::*;

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn health_to_str(health: &Health) -> &'static str {
    match health {
        Health::Healthy => "up",
        Health::Unhealthy(_) => "unhealthy",
        Health::Unreachable(_) => "not detected",
    }
}

/// One tree row per service: its URL and the probe verdict.
pub fn service_to_detail(status: &ServiceStatus) -> Detail {
    let color: Color = if status.health.is_healthy() {
        colors::HEALTHY
    } else {
        colors::UNHEALTHY
    };
    let verdict: String = format!("({})", health_to_str(&status.health));
    let value: ColoredString = format!(
        "{} {}",
        status.record.url.color(colors::IPV4_ADDR),
        verdict.color(color)
    )
    .normal();

    (status.service.name.clone(), value)
}

pub fn target_to_detail(target: &ConfigTarget, ok: bool) -> Detail {
    let path: ColoredString = if ok {
        target.path.display().to_string().color(colors::TEXT_DEFAULT)
    } else {
        target.path.display().to_string().red()
    };
    (target.app.clone(), path)
}
