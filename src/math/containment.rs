//! Three-way volume classification

/// How a volume relates to another volume
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Containment {
    /// No overlap
    Disjoint,
    /// Partial overlap
    Intersects,
    /// Fully inside
    Contains,
}

impl Containment {
    pub fn is_disjoint(self) -> bool {
        self == Containment::Disjoint
    }

    pub fn is_contained(self) -> bool {
        self == Containment::Contains
    }
}
