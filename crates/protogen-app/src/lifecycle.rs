//! App lifecycle state machine.
//!
//! ```text
//! Created ──(resources, user data, resolution)──▶ Configured
//! Configured ──initialize──▶ Initialized ──set_active──▶ Active ⇄ Inactive
//!                      └──(failure)──▶ Failed
//! any ──shutdown──▶ Destroyed
//! ```

use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, SanityError};

/// The lifecycle state of an app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Constructed; configuration not yet complete.
    Created,
    /// Directories and resolution received.
    Configured,
    /// Initialized, activation not yet signalled.
    Initialized,
    /// Initialized and in the foreground.
    Active,
    /// Initialized and in the background.
    Inactive,
    /// Shut down; only idempotent calls remain valid.
    Destroyed,
    /// Initialization failed.
    Failed(String),
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Configured => write!(f, "configured"),
            Self::Initialized => write!(f, "initialized"),
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Destroyed => write!(f, "destroyed"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// One of the configuration calls a host makes before initialization.
///
/// Ordered by the sequence the host must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigStep {
    /// `set_resources_directory`.
    ResourcesDirectory,
    /// `set_user_data_directory`.
    UserDataDirectory,
    /// `set_device_resolution`.
    DeviceResolution,
}

impl ConfigStep {
    /// Name of the app operation this step corresponds to.
    #[must_use]
    pub fn operation(self) -> &'static str {
        match self {
            Self::ResourcesDirectory => "set_resources_directory",
            Self::UserDataDirectory => "set_user_data_directory",
            Self::DeviceResolution => "set_device_resolution",
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            Self::ResourcesDirectory => Some(Self::UserDataDirectory),
            Self::UserDataDirectory => Some(Self::DeviceResolution),
            Self::DeviceResolution => None,
        }
    }
}

/// Tracks the app's state and enforces the host call ordering.
///
/// Ordering violations are rejected and also remembered, so that a host
/// which ignores the returned error still sees them in
/// [`Lifecycle::sanity_check`].
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: AppState,
    expected: Option<ConfigStep>,
    violations: Vec<String>,
    pending_active: Option<bool>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// A freshly created app.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AppState::Created,
            expected: Some(ConfigStep::ResourcesDirectory),
            violations: Vec::new(),
            pending_active: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Whether every configuration step has been received.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.expected.is_none()
    }

    /// Ordering violations recorded so far.
    #[must_use]
    pub fn violations(&self) -> &[String] {
        &self.violations
    }

    /// Validate and record a configuration call.
    ///
    /// Steps must arrive in order; repeating a step already received updates
    /// it. Once configured, the resolution may be set
    /// again at any time; the directories may be set again only until
    /// initialization starts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Destroyed`] after shutdown and
    /// [`AppError::OutOfOrder`] for any other rejected call.
    pub fn record_step(&mut self, step: ConfigStep) -> AppResult<()> {
        if self.state == AppState::Destroyed {
            return Err(AppError::Destroyed);
        }

        match self.expected {
            Some(expected) if expected == step => {
                self.expected = step.next();
                if self.expected.is_none() {
                    self.state = AppState::Configured;
                    info!("App configured");
                }
                Ok(())
            },
            Some(expected) if step < expected => {
                debug!(operation = step.operation(), "Configuration step repeated");
                Ok(())
            },
            Some(expected) => Err(self.violation(
                step,
                format!(
                    "{} called before {}",
                    step.operation(),
                    expected.operation()
                ),
            )),
            None if step == ConfigStep::DeviceResolution => {
                debug!("Device resolution changed");
                Ok(())
            },
            None if self.state == AppState::Configured => Ok(()),
            None => Err(self.violation(
                step,
                format!("{} called after initialization", step.operation()),
            )),
        }
    }

    fn violation(&mut self, step: ConfigStep, message: String) -> AppError {
        warn!(operation = step.operation(), state = %self.state, "{message}");
        self.violations.push(message);
        AppError::OutOfOrder {
            operation: step.operation(),
            state: self.state.clone(),
        }
    }

    /// Check that initialization may start.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotConfigured`] before configuration completes,
    /// [`AppError::AlreadyInitialized`] if initialization was already
    /// attempted and [`AppError::Destroyed`] after shutdown.
    pub fn begin_initialize(&self) -> AppResult<()> {
        match &self.state {
            AppState::Configured => Ok(()),
            AppState::Created => Err(AppError::NotConfigured {
                state: self.state.clone(),
            }),
            AppState::Destroyed => Err(AppError::Destroyed),
            AppState::Initialized
            | AppState::Active
            | AppState::Inactive
            | AppState::Failed(_) => Err(AppError::AlreadyInitialized),
        }
    }

    /// Record the outcome of initialization.
    ///
    /// An activation requested before initialization is applied now.
    pub fn finish_initialize(&mut self, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.state = match self.pending_active.take() {
                    Some(true) => AppState::Active,
                    Some(false) => AppState::Inactive,
                    None => AppState::Initialized,
                };
                info!(state = %self.state, "App initialized");
            },
            Err(reason) => {
                warn!(reason = %reason, "App initialization failed");
                self.state = AppState::Failed(reason);
            },
        }
    }

    /// Apply the host's foreground/background signal.
    ///
    /// Before initialization the request is only remembered. After shutdown or
    /// a failed initialization it is ignored.
    pub fn set_active(&mut self, active: bool) {
        match self.state {
            AppState::Initialized | AppState::Active | AppState::Inactive => {
                self.state = if active {
                    AppState::Active
                } else {
                    AppState::Inactive
                };
                debug!(state = %self.state, "Activation changed");
            },
            AppState::Created | AppState::Configured => {
                debug!(active, "Activation requested before initialization");
                self.pending_active = Some(active);
            },
            AppState::Destroyed | AppState::Failed(_) => {
                debug!(active, state = %self.state, "Activation ignored");
            },
        }
    }

    /// Move to [`AppState::Destroyed`]. Returns `false` if already there.
    pub fn mark_destroyed(&mut self) -> bool {
        if self.state == AppState::Destroyed {
            return false;
        }
        self.state = AppState::Destroyed;
        true
    }

    /// Report every problem known to the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns a [`SanityError`] listing recorded ordering violations,
    /// incomplete configuration, a failed initialization or a destroyed app.
    pub fn sanity_check(&self) -> Result<(), SanityError> {
        let mut problems = self.violations.clone();

        if let Some(step) = self.expected {
            problems.push(format!("configuration incomplete: {} not called", step.operation()));
        }
        match &self.state {
            AppState::Failed(reason) => problems.push(format!("initialization failed: {reason}")),
            AppState::Destroyed => problems.push("app has been destroyed".to_owned()),
            _ => {},
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SanityError { problems })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Lifecycle {
        let mut lifecycle = Lifecycle::new();
        lifecycle.record_step(ConfigStep::ResourcesDirectory).unwrap();
        lifecycle.record_step(ConfigStep::UserDataDirectory).unwrap();
        lifecycle.record_step(ConfigStep::DeviceResolution).unwrap();
        lifecycle
    }

    #[test]
    fn test_in_order_configuration() {
        let lifecycle = configured();
        assert_eq!(lifecycle.state(), &AppState::Configured);
        assert!(lifecycle.is_configured());
        lifecycle.sanity_check().unwrap();
    }

    #[test]
    fn test_out_of_order_is_rejected_and_reported() {
        let mut lifecycle = Lifecycle::new();
        let err = lifecycle.record_step(ConfigStep::DeviceResolution).unwrap_err();
        assert_eq!(
            err,
            AppError::OutOfOrder {
                operation: "set_device_resolution",
                state: AppState::Created,
            }
        );

        lifecycle.record_step(ConfigStep::ResourcesDirectory).unwrap();
        lifecycle.record_step(ConfigStep::UserDataDirectory).unwrap();
        lifecycle.record_step(ConfigStep::DeviceResolution).unwrap();

        let report = lifecycle.sanity_check().unwrap_err();
        assert_eq!(report.problems.len(), 1);
        assert!(report.problems[0].contains("set_device_resolution called before set_resources_directory"));
    }

    #[test]
    fn test_repeated_step_before_configured_is_an_update() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.record_step(ConfigStep::ResourcesDirectory).unwrap();
        lifecycle.record_step(ConfigStep::ResourcesDirectory).unwrap();
        lifecycle.record_step(ConfigStep::UserDataDirectory).unwrap();
        lifecycle.record_step(ConfigStep::ResourcesDirectory).unwrap();
        lifecycle.record_step(ConfigStep::DeviceResolution).unwrap();

        assert_eq!(lifecycle.state(), &AppState::Configured);
        assert!(lifecycle.violations().is_empty());
        lifecycle.sanity_check().unwrap();
    }

    #[test]
    fn test_incomplete_configuration_fails_sanity() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.record_step(ConfigStep::ResourcesDirectory).unwrap();
        let report = lifecycle.sanity_check().unwrap_err();
        assert!(report.problems[0].contains("set_user_data_directory"));
    }

    #[test]
    fn test_initialize_requires_configuration() {
        let lifecycle = Lifecycle::new();
        assert!(matches!(
            lifecycle.begin_initialize(),
            Err(AppError::NotConfigured { .. })
        ));
    }

    #[test]
    fn test_initialize_twice() {
        let mut lifecycle = configured();
        lifecycle.begin_initialize().unwrap();
        lifecycle.finish_initialize(Ok(()));
        assert_eq!(lifecycle.state(), &AppState::Initialized);
        assert_eq!(lifecycle.begin_initialize(), Err(AppError::AlreadyInitialized));
    }

    #[test]
    fn test_resolution_may_change_after_initialization() {
        let mut lifecycle = configured();
        lifecycle.finish_initialize(Ok(()));
        lifecycle.record_step(ConfigStep::DeviceResolution).unwrap();
        assert!(matches!(
            lifecycle.record_step(ConfigStep::ResourcesDirectory),
            Err(AppError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_directories_may_be_reset_before_initialization() {
        let mut lifecycle = configured();
        lifecycle.record_step(ConfigStep::UserDataDirectory).unwrap();
        assert!(lifecycle.violations().is_empty());
    }

    #[test]
    fn test_early_activation_is_applied_on_initialize() {
        let mut lifecycle = configured();
        lifecycle.set_active(true);
        assert_eq!(lifecycle.state(), &AppState::Configured);
        lifecycle.finish_initialize(Ok(()));
        assert_eq!(lifecycle.state(), &AppState::Active);

        lifecycle.set_active(false);
        assert_eq!(lifecycle.state(), &AppState::Inactive);
    }

    #[test]
    fn test_failed_initialization() {
        let mut lifecycle = configured();
        lifecycle.finish_initialize(Err("boom".into()));
        assert_eq!(lifecycle.state(), &AppState::Failed("boom".into()));
        let report = lifecycle.sanity_check().unwrap_err();
        assert!(report.to_string().contains("initialization failed: boom"));
    }

    #[test]
    fn test_destroyed_rejects_configuration() {
        let mut lifecycle = configured();
        assert!(lifecycle.mark_destroyed());
        assert!(!lifecycle.mark_destroyed());
        assert_eq!(
            lifecycle.record_step(ConfigStep::DeviceResolution),
            Err(AppError::Destroyed)
        );
        assert_eq!(lifecycle.begin_initialize(), Err(AppError::Destroyed));
    }
}
