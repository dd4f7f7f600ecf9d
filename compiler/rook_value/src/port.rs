//! Opaque I/O capability handles.
//!
//! The interpreter core never performs I/O. A port is a token minted by the
//! host's I/O layer; the core only stores it, compares it and renders it.

use std::fmt;

use rook_ir::Name;

/// Handle to a host-owned I/O resource.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PortHandle {
    scheme: Name,
    token: u64,
}

impl PortHandle {
    /// Handle for resource `token` under `scheme` (e.g. `file`).
    pub fn new(scheme: Name, token: u64) -> Self {
        PortHandle { scheme, token }
    }

    /// The scheme the host registered this port under.
    pub fn scheme(&self) -> Name {
        self.scheme
    }

    /// Host-assigned token.
    pub fn token(&self) -> u64 {
        self.token
    }
}

impl fmt::Display for PortHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#[port {}:{}]", self.scheme, self.token)
    }
}
