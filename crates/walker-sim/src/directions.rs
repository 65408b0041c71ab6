//! Route sources.
//!
//! A route source turns an origin/destination pair into an ordered point list
//! before any traversal starts. It is not part of the engine's contract: the
//! engine only ever sees `Some(route)` or `None`.

use std::collections::HashMap;

use thiserror::Error;

use walker_core::enums::TransportMode;
use walker_core::{Route, Waypoint};

/// One directions query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub mode: TransportMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    #[error("no {mode:?} route found")]
    NotFound { mode: TransportMode },
    #[error("directions provider unavailable: {0}")]
    Unavailable(String),
}

/// Anything that can answer a directions query.
pub trait DirectionsProvider {
    fn directions(&mut self, request: &DirectionsRequest) -> Result<Route, DirectionsError>;
}

/// Two-attempt strategy: the requested mode first, then the fallback mode once.
pub struct FallbackRouteSource<P> {
    provider: P,
    fallback_mode: TransportMode,
}

impl<P: DirectionsProvider> FallbackRouteSource<P> {
    /// Falls back to driving directions, which cover the most ground.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            fallback_mode: TransportMode::Automobile,
        }
    }

    pub fn with_fallback_mode(mut self, mode: TransportMode) -> Self {
        self.fallback_mode = mode;
        self
    }

    /// Resolve a route, or `None` if both attempts failed.
    pub fn resolve(
        &mut self,
        origin: Waypoint,
        destination: Waypoint,
        mode: TransportMode,
    ) -> Option<Route> {
        let mut request = DirectionsRequest {
            origin,
            destination,
            mode,
        };
        match self.provider.directions(&request) {
            Ok(route) => return Some(route),
            Err(e) if mode == self.fallback_mode => {
                log::warn!("failed to get directions: {e}");
                return None;
            }
            Err(e) => {
                log::warn!("failed to get {mode:?} directions ({e}), retrying as {:?}", self.fallback_mode);
            }
        }

        request.mode = self.fallback_mode;
        match self.provider.directions(&request) {
            Ok(route) => Some(route),
            Err(e) => {
                log::warn!("failed to get any directions: {e}");
                None
            }
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_inner(self) -> P {
        self.provider
    }
}

/// Straight line from origin to destination, whatever the mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectProvider;

impl DirectionsProvider for DirectProvider {
    fn directions(&mut self, request: &DirectionsRequest) -> Result<Route, DirectionsError> {
        Ok(Route::direct(request.origin, request.destination))
    }
}

/// Pre-resolved routes keyed by transport mode, e.g. loaded from files.
///
/// Every query for a mode returns that mode's route regardless of endpoints.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    routes: HashMap<TransportMode, Route>,
    queries: Vec<TransportMode>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, mode: TransportMode, route: Route) -> Self {
        self.routes.insert(mode, route);
        self
    }

    /// Modes queried so far, in order.
    pub fn queries(&self) -> &[TransportMode] {
        &self.queries
    }
}

impl DirectionsProvider for StaticProvider {
    fn directions(&mut self, request: &DirectionsRequest) -> Result<Route, DirectionsError> {
        self.queries.push(request.mode);
        self.routes
            .get(&request.mode)
            .cloned()
            .ok_or(DirectionsError::NotFound { mode: request.mode })
    }
}
