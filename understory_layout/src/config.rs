// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine-wide settings shared by one or more layouts.

use core::fmt;

use log::Level;

bitflags::bitflags! {
    /// Compatibility switches for long-standing layout quirks.
    ///
    /// These are carried on the [`Config`] so callers that replay trees from
    /// other engines can record which behavior they expect. The flexbox engine
    /// used by this crate always computes standards-conforming results.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Errata: u32 {
        /// A stretched flex item's basis is the container's cross size.
        const STRETCH_FLEX_BASIS = 0b0001;
        /// Absolutely positioned items without insets ignore the container's padding.
        const ABSOLUTE_POSITION_WITHOUT_INSETS_EXCLUDES_PADDING = 0b0010;
        /// Percentages on absolutely positioned items resolve against the inner size.
        const ABSOLUTE_PERCENT_AGAINST_INNER_SIZE = 0b0100;
        /// Every known quirk.
        const ALL = Self::STRETCH_FLEX_BASIS.bits()
            | Self::ABSOLUTE_POSITION_WITHOUT_INSETS_EXCLUDES_PADDING.bits()
            | Self::ABSOLUTE_PERCENT_AGAINST_INNER_SIZE.bits();
        /// The quirk set of classic (pre-conformance) engines.
        const CLASSIC = Self::ALL.bits() & !Self::ABSOLUTE_PERCENT_AGAINST_INNER_SIZE.bits();
    }
}

impl Errata {
    /// No quirks.
    pub const NONE: Self = Self::empty();
}

impl Default for Errata {
    fn default() -> Self {
        Self::NONE
    }
}

/// Receives diagnostics instead of the [`log`] facade.
pub type Logger = Box<dyn Fn(Level, &str) + Send + Sync>;

/// Engine-wide layout settings plus an optional payload of type `G`.
///
/// A `Config` lives independently of any [`Layout`](crate::Layout). Share one
/// between several layouts by wrapping it in an [`Arc`](std::sync::Arc) and
/// passing it to [`Layout::with_config`](crate::Layout::with_config); settings
/// are read on every node creation and layout pass, so finish setting up the
/// config before sharing it.
///
/// ```rust
/// use std::sync::Arc;
/// use understory_layout::{Config, Layout};
///
/// let mut config = Config::<&str>::with_context("shared");
/// config.set_point_scale_factor(2.0);
/// let config = Arc::new(config);
///
/// let a: Layout<(), &str> = Layout::with_config(Arc::clone(&config));
/// let b: Layout<(), &str> = Layout::with_config(config);
/// assert_eq!(a.config().map(|c| *c.context()), Some("shared"));
/// assert_eq!(b.point_scale_factor(), 2.0);
/// ```
pub struct Config<G = ()> {
    point_scale_factor: f32,
    use_web_defaults: bool,
    errata: Errata,
    logger: Option<Logger>,
    context: G,
}

impl<G: fmt::Debug> fmt::Debug for Config<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("point_scale_factor", &self.point_scale_factor)
            .field("use_web_defaults", &self.use_web_defaults)
            .field("errata", &self.errata)
            .field("logger", &self.logger.is_some())
            .field("context", &self.context)
            .finish()
    }
}

impl<G: Default> Default for Config<G> {
    fn default() -> Self {
        Self::with_context(G::default())
    }
}

impl<G: Default> Config<G> {
    /// Create a config with default settings and a default payload.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G> Config<G> {
    /// Create a config with default settings carrying `context`.
    pub fn with_context(context: G) -> Self {
        Self {
            point_scale_factor: 1.0,
            use_web_defaults: false,
            errata: Errata::NONE,
            logger: None,
            context,
        }
    }

    /// Physical pixels per layout point.
    ///
    /// Computed edges are snapped to a grid of `1 / point_scale_factor`.
    /// Zero disables rounding.
    pub fn point_scale_factor(&self) -> f32 {
        self.point_scale_factor
    }

    /// Set the pixel density used for rounding.
    ///
    /// Negative and non-finite values disable rounding, like zero.
    pub fn set_point_scale_factor(&mut self, point_scale_factor: f32) {
        self.point_scale_factor = if point_scale_factor.is_finite() && point_scale_factor > 0.0 {
            point_scale_factor
        } else {
            0.0
        };
    }

    /// Whether new nodes start from CSS defaults (row direction, shrinkable,
    /// stretched lines) rather than the classic column defaults.
    pub fn use_web_defaults(&self) -> bool {
        self.use_web_defaults
    }

    /// Choose the default style family for nodes created afterwards.
    pub fn set_use_web_defaults(&mut self, use_web_defaults: bool) {
        self.use_web_defaults = use_web_defaults;
    }

    /// Recorded compatibility switches.
    pub fn errata(&self) -> Errata {
        self.errata
    }

    /// Record compatibility switches.
    pub fn set_errata(&mut self, errata: Errata) {
        self.errata = errata;
    }

    /// Route diagnostics to `logger` instead of the [`log`] facade.
    pub fn set_logger(&mut self, logger: impl Fn(Level, &str) + Send + Sync + 'static) {
        self.logger = Some(Box::new(logger));
    }

    /// Send diagnostics back to the [`log`] facade.
    pub fn clear_logger(&mut self) {
        self.logger = None;
    }

    /// The config payload.
    pub fn context(&self) -> &G {
        &self.context
    }

    /// The config payload, mutably.
    pub fn context_mut(&mut self) -> &mut G {
        &mut self.context
    }

    pub(crate) fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        match &self.logger {
            Some(logger) => logger(level, &args.to_string()),
            None => log::log!(level, "{args}"),
        }
    }
}
