//! # Configuration
//!
//! Process-wide settings for stack capture.
//!
//! The configuration is fixed the first time it is read. A host application that
//! wants a non-default depth calls [`init`] before creating any annotated error;
//! otherwise the value comes from `STACKWRAP_MAX_STACK_DEPTH` or the default.
//!
//! ```rust,no_run
//! use stackwrap_core::config::{self, StackConfig};
//!
//! config::init(StackConfig::default().with_max_stack_depth(128)).expect("configured twice");
//! assert_eq!(config::current().max_stack_depth, 128);
//! ```

use std::env;

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::{TraceError, TraceResult};

/// Number of frames captured when nothing else is configured.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 50;

/// Environment variable consulted on first use when [`init`] was not called.
pub const MAX_STACK_DEPTH_ENV: &str = "STACKWRAP_MAX_STACK_DEPTH";

static CONFIG: OnceCell<StackConfig> = OnceCell::new();

/// Stack capture settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackConfig
{
    /// Maximum number of raw frames stored per captured stack. Deeper stacks are
    /// truncated silently.
    pub max_stack_depth: usize,
}

impl Default for StackConfig
{
    fn default() -> Self
    {
        Self {
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
        }
    }
}

impl StackConfig
{
    /// Replace the maximum capture depth.
    #[must_use]
    pub fn with_max_stack_depth(mut self, max_stack_depth: usize) -> Self
    {
        self.max_stack_depth = max_stack_depth;
        self
    }

    /// Build a configuration from `STACKWRAP_MAX_STACK_DEPTH`, falling back to the default
    /// when the variable is unset.
    ///
    /// ## Errors
    ///
    /// Returns [`TraceError::InvalidStackDepth`] if the variable is set but is not a
    /// positive integer.
    pub fn from_env() -> TraceResult<Self>
    {
        match env::var(MAX_STACK_DEPTH_ENV) {
            Ok(raw) => Ok(Self::default().with_max_stack_depth(parse_depth(&raw)?)),
            Err(_) => Ok(Self::default()),
        }
    }

    fn validate(self) -> TraceResult<Self>
    {
        if self.max_stack_depth == 0 {
            return Err(TraceError::InvalidStackDepth("depth must be at least 1".into()));
        }
        Ok(self)
    }
}

/// Fix the process-wide configuration.
///
/// ## Errors
///
/// - [`TraceError::InvalidStackDepth`] for a zero depth
/// - [`TraceError::AlreadyConfigured`] if [`init`] already ran or a stack was already
///   captured with the environment/default configuration
pub fn init(config: StackConfig) -> TraceResult<()>
{
    let config = config.validate()?;
    CONFIG.set(config).map_err(|_| TraceError::AlreadyConfigured {
        current: current().max_stack_depth,
    })?;
    debug!(max_stack_depth = config.max_stack_depth, "stack capture configured");
    Ok(())
}

/// The configuration in effect, initialising it from the environment on first use.
pub fn current() -> StackConfig
{
    *CONFIG.get_or_init(|| {
        StackConfig::from_env().unwrap_or_else(|err| {
            warn!(%err, "ignoring {MAX_STACK_DEPTH_ENV}");
            StackConfig::default()
        })
    })
}

fn parse_depth(raw: &str) -> TraceResult<usize>
{
    let depth = raw
        .trim()
        .parse::<usize>()
        .map_err(|err| TraceError::InvalidStackDepth(format!("{raw:?}: {err}")))?;
    if depth == 0 {
        return Err(TraceError::InvalidStackDepth(format!("{raw:?}: depth must be at least 1")));
    }
    Ok(depth)
}
