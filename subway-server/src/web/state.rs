//! Application state for the web layer.

use crate::service::LineService;
use crate::store::StationDirectory;

/// Shared application state.
///
/// Contains the collaborators needed to handle requests. Both fields are
/// internally reference-counted, so the state clones cheaply per request.
#[derive(Clone)]
pub struct AppState {
    /// Station directory
    pub stations: StationDirectory,

    /// Line service
    pub lines: LineService,
}

impl AppState {
    /// Create a new app state.
    pub fn new(stations: StationDirectory, lines: LineService) -> Self {
        Self { stations, lines }
    }
}
