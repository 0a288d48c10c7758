//! Supply and logistics records.

use irondis_core::WireRecord;

/// Fuel storage reload capability of an entity.
///
/// Wire layout (14 bytes, big-endian):
///
/// | Offset | Width | Field |
/// |---|---|---|
/// | 0 | 4 | standardQuantity |
/// | 4 | 4 | maximumQuantity |
/// | 8 | 1 | standardQuantityReloadTime |
/// | 9 | 1 | maximumQuantityReloadTime |
/// | 10 | 1 | fuelMeasurementUnits |
/// | 11 | 1 | fuelType |
/// | 12 | 1 | fuelLocation |
/// | 13 | 1 | padding |
///
/// The padding byte round-trips and takes part in equality and hashing.
#[derive(Debug, Clone, Copy, Default, WireRecord)]
pub struct StorageFuelReload {
    /// Standard quantity of fuel loaded.
    pub standard_quantity: u32,
    /// Maximum quantity of fuel loaded.
    pub maximum_quantity: u32,
    /// Seconds to reload the standard quantity.
    pub standard_quantity_reload_time: u8,
    /// Seconds to reload the maximum quantity.
    pub maximum_quantity_reload_time: u8,
    /// Fuel measurement units enumeration code.
    pub fuel_measurement_units: u8,
    /// Fuel type enumeration code.
    pub fuel_type: u8,
    /// Fuel location enumeration code.
    pub fuel_location: u8,
    /// Reserved.
    #[wire(padding)]
    pub padding: u8,
}

/// Fuel currently held in one storage location.
#[derive(Debug, Clone, Copy, Default, WireRecord)]
pub struct StorageFuel {
    /// Quantity of fuel, in `fuel_measurement_units`.
    pub fuel_quantity: u32,
    /// Fuel measurement units enumeration code.
    pub fuel_measurement_units: u8,
    /// Fuel type enumeration code.
    pub fuel_type: u8,
    /// Fuel location enumeration code.
    pub fuel_location: u8,
    /// Reserved.
    #[wire(padding)]
    pub padding: u8,
}
