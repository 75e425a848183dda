//! Dismissible alert banners.
//!
//! Dismissal is one-way: a dismissed alert fades out and never comes back.

use std::str::FromStr;
use std::time::{Duration, Instant};

/// Fade-out time between dismissal and removal.
pub const FADE_DURATION: Duration = Duration::from_millis(300);

/// Style/severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Info => "info",
            AlertKind::Success => "success",
            AlertKind::Warning => "warning",
            AlertKind::Error => "error",
        }
    }
}

impl FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "info" => Ok(AlertKind::Info),
            "success" => Ok(AlertKind::Success),
            "warning" => Ok(AlertKind::Warning),
            "error" => Ok(AlertKind::Error),
            other => Err(format!("unknown alert kind '{}'", other)),
        }
    }
}

/// Lifecycle of an alert on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Visible,
    Fading { since: Instant },
    Dismissed,
}

/// A single alert banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: Option<String>,
    pub message: String,
    pub dismissible: bool,
    phase: AlertPhase,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            message: message.into(),
            dismissible: false,
            phase: AlertPhase::Visible,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn dismissible(mut self) -> Self {
        self.dismissible = true;
        self
    }

    pub fn phase(&self) -> AlertPhase {
        self.phase
    }

    /// True while the banner should be drawn (including the fade).
    pub fn is_shown(&self) -> bool {
        !matches!(self.phase, AlertPhase::Dismissed)
    }

    /// Starts the fade-out. Ignored for non-dismissible or already dismissed alerts.
    pub fn dismiss(&mut self, now: Instant) -> bool {
        if !self.dismissible || self.phase != AlertPhase::Visible {
            return false;
        }
        self.phase = AlertPhase::Fading { since: now };
        true
    }

    /// Completes the fade once [`FADE_DURATION`] has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let AlertPhase::Fading { since } = self.phase
            && now.saturating_duration_since(since) >= FADE_DURATION
        {
            self.phase = AlertPhase::Dismissed;
        }
    }
}

/// Parses `KIND:MESSAGE` or `KIND:TITLE:MESSAGE`. Alerts given this way are dismissible.
impl FromStr for Alert {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(3, ':').collect();
        let alert = match parts.as_slice() {
            [message] => Alert::new(AlertKind::Info, message.trim()),
            [kind, message] => Alert::new(kind.parse()?, message.trim()),
            [kind, title, message] => {
                Alert::new(kind.parse()?, message.trim()).with_title(title.trim())
            }
            _ => return Err(format!("invalid alert '{}'", s)),
        };
        if alert.message.is_empty() {
            return Err(format!("alert '{}' has no message", s));
        }
        Ok(alert.dismissible())
    }
}

/// Ordered set of alert banners.
#[derive(Debug, Clone, Default)]
pub struct AlertStack {
    alerts: Vec<Alert>,
}

impl AlertStack {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    pub fn push(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    /// Alerts still on screen, in order.
    pub fn shown(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| a.is_shown())
    }

    /// Dismisses the first visible dismissible alert. Returns true if one was dismissed.
    pub fn dismiss_first(&mut self, now: Instant) -> bool {
        self.alerts.iter_mut().any(|a| a.dismiss(now))
    }

    pub fn tick(&mut self, now: Instant) {
        for alert in &mut self.alerts {
            alert.tick(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kind_is_info() {
        assert_eq!(AlertKind::default(), AlertKind::Info);
        assert_eq!("".parse::<AlertKind>().unwrap(), AlertKind::Info);
    }

    #[test]
    fn test_non_dismissible_ignores_dismiss() {
        let now = Instant::now();
        let mut alert = Alert::new(AlertKind::Warning, "disk almost full");
        assert!(!alert.dismiss(now));
        assert_eq!(alert.phase(), AlertPhase::Visible);
    }

    #[test]
    fn test_dismiss_is_irreversible() {
        let now = Instant::now();
        let mut alert = Alert::new(AlertKind::Info, "hello").dismissible();
        assert!(alert.dismiss(now));
        assert!(alert.is_shown());

        alert.tick(now + Duration::from_millis(100));
        assert!(matches!(alert.phase(), AlertPhase::Fading { .. }));

        alert.tick(now + FADE_DURATION);
        assert_eq!(alert.phase(), AlertPhase::Dismissed);
        assert!(!alert.is_shown());

        assert!(!alert.dismiss(now + Duration::from_secs(1)));
        alert.tick(now + Duration::from_secs(2));
        assert_eq!(alert.phase(), AlertPhase::Dismissed);
    }

    #[test]
    fn test_parse_alert_arg() {
        let a: Alert = "warning:Heads up:Maintenance at 22:00".parse().unwrap();
        assert_eq!(a.kind, AlertKind::Warning);
        assert_eq!(a.title.as_deref(), Some("Heads up"));
        assert_eq!(a.message, "Maintenance at 22:00");
        assert!(a.dismissible);

        let b: Alert = "plain message".parse().unwrap();
        assert_eq!(b.kind, AlertKind::Info);
        assert!("bogus:text".parse::<Alert>().is_err());
        assert!("error:".parse::<Alert>().is_err());
    }

    #[test]
    fn test_stack_dismisses_first_dismissible() {
        let now = Instant::now();
        let mut stack = AlertStack::new(vec![
            Alert::new(AlertKind::Error, "sticky"),
            Alert::new(AlertKind::Info, "one").dismissible(),
            Alert::new(AlertKind::Info, "two").dismissible(),
        ]);
        assert!(stack.dismiss_first(now));
        stack.tick(now + FADE_DURATION);
        let shown: Vec<&str> = stack.shown().map(|a| a.message.as_str()).collect();
        assert_eq!(shown, vec!["sticky", "two"]);

        assert!(stack.dismiss_first(now));
        stack.tick(now + FADE_DURATION);
        assert!(!stack.dismiss_first(now));
        assert_eq!(stack.shown().count(), 1);
    }
}
