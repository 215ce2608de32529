use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Vertex ID, unique in this system, usually use u32.
pub type VInt = u32;

/// An undirected edge, stored with the smaller endpoint first so the same
/// pair keys a map identically no matter which direction discovered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    pub u: VInt,
    pub v: VInt,
}

impl Edge {
    pub fn new(a: VInt, b: VInt) -> Edge {
        if a <= b {
            Edge { u: a, v: b }
        } else {
            Edge { u: b, v: a }
        }
    }

    pub fn endpoints(&self) -> (VInt, VInt) {
        (self.u, self.v)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.u, self.v)
    }
}
