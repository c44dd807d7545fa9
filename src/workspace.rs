//! Workspace for reusing allocated memory between multiple filter applications

use std::cell::RefCell;
use std::fmt;
use std::fmt::Debug;
use thread_local::ThreadLocal;

/// Collection of all thread local workspaces used to reduce allocations on subsequent filter
/// applications
#[derive(Default)]
pub struct FilterWorkspace {
    local_workspaces: ThreadLocal<RefCell<LocalFilterWorkspace>>,
}

impl FilterWorkspace {
    /// Returns a reference to a thread local workspace, initializes it with the given grid node
    /// capacity if not already initialized
    pub(crate) fn get_local_with_capacity(
        &self,
        capacity: usize,
    ) -> &RefCell<LocalFilterWorkspace> {
        self.local_workspaces
            .get_or(|| RefCell::new(LocalFilterWorkspace::with_capacity(capacity)))
    }
}

impl Clone for FilterWorkspace {
    /// Returns a new default workspace without any allocated memory
    fn clone(&self) -> Self {
        FilterWorkspace::default()
    }
}

impl Debug for FilterWorkspace {
    /// Only print the name of type to the formatter
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterWorkspace").finish()
    }
}

/// Workspace used by [`AmFilter::apply`](crate::AmFilter::apply) internally to re-use
/// allocated memory
#[derive(Default)]
pub(crate) struct LocalFilterWorkspace {
    /// Storage for the grid blueprint density
    pub grid_blueprint_density: Vec<f64>,
    /// Storage for the grid support density of the layer recursion
    pub grid_support_density: Vec<f64>,
    /// Storage for the grid printable density
    pub grid_printable_density: Vec<f64>,
}

impl LocalFilterWorkspace {
    /// Constructs a workspace with capacity for the given number of grid nodes
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            grid_blueprint_density: Vec::with_capacity(capacity),
            grid_support_density: Vec::with_capacity(capacity),
            grid_printable_density: Vec::with_capacity(capacity),
        }
    }
}
