//! Entity identification records.

use irondis_core::WireRecord;

/// Unique identifier of a simulated entity.
///
/// Entities are addressed by the site running the simulation, the
/// application within that site and the entity within that application.
#[derive(Debug, Clone, Copy, Default, WireRecord)]
#[wire(name = "EntityID")]
pub struct EntityId {
    /// Site number.
    pub site: u16,
    /// Application number within the site.
    pub application: u16,
    /// Entity number within the application.
    pub entity: u16,
}

impl EntityId {
    /// Creates an entity identifier.
    #[must_use]
    pub const fn new(site: u16, application: u16, entity: u16) -> Self {
        Self {
            site,
            application,
            entity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_layout() {
        let id = EntityId::new(1, 2, 0x0304);
        assert_eq!(EntityId::NAME, "EntityID");
        assert_eq!(EntityId::WIRE_SIZE, 6);
        assert_eq!(id.to_bytes(), [0, 1, 0, 2, 3, 4]);
        assert_eq!(EntityId::from_bytes(&id.to_bytes()).unwrap(), id);
    }

    #[test]
    fn test_hash_set_membership() {
        let mut seen = HashSet::new();
        assert!(seen.insert(EntityId::new(1, 1, 7)));
        assert!(seen.insert(EntityId::new(1, 7, 1)));
        assert!(!seen.insert(EntityId::new(1, 1, 7)));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_wire_hash_order() {
        let a = EntityId::new(1, 2, 3);
        let b = EntityId::new(3, 2, 1);
        assert_eq!(a.wire_hash(), (1 << 10) ^ (2 << 5) ^ 3);
        assert_ne!(a.wire_hash(), b.wire_hash());
    }
}
