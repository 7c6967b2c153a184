use std::{collections::BTreeMap, fmt};

use uuid::Uuid;

use crate::error::UnitError;

/// Result type used by the unit layer.
pub type UnitResult<T> = Result<T, UnitError>;

/// A fundamental physical quantity that a unit measures.
///
/// Every unit maps onto exactly one dimension, and a value carries at most one
/// unit per dimension on each side of its fraction bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    /// Distances, such as meters or miles.
    Length,
    /// Masses, such as grams or pounds.
    Mass,
    /// Durations, such as seconds or hours.
    Time,
    /// Temperatures, such as kelvin or fahrenheit.
    Temperature,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Time => "time",
            Self::Temperature => "temperature",
        };
        f.write_str(name)
    }
}

/// Describes one named unit as an affine map onto its dimension.
///
/// A value `v` expressed in this unit corresponds to `offset + scale * v` in
/// the dimension's base representation. Linear units have a zero offset;
/// temperature scales use the offset.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitInformation {
    /// Unique name of the unit within its system.
    pub name:      String,
    /// The dimension this unit measures.
    pub dimension: Dimension,
    /// Additive term of the affine map.
    pub offset:    f64,
    /// Multiplicative term of the affine map.
    pub scale:     f64,
}

impl UnitInformation {
    /// Creates an affine unit description.
    #[must_use]
    pub fn new(name: impl Into<String>, dimension: Dimension, offset: f64, scale: f64) -> Self {
        Self { name: name.into(),
               dimension,
               offset,
               scale }
    }

    /// Creates a unit with no offset, `base = scale * value`.
    #[must_use]
    pub fn linear(name: impl Into<String>, dimension: Dimension, scale: f64) -> Self {
        Self::new(name, dimension, 0.0, scale)
    }

    /// Maps a value in this unit to the dimension's base representation.
    #[must_use]
    pub fn to_base(&self, value: f64) -> f64 {
        self.offset + value * self.scale
    }

    /// Maps a base-representation value back into this unit.
    #[must_use]
    pub fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.scale
    }
}

/// Opaque identity of a [`UnitSystem`].
///
/// Allocated once per system at construction. Two systems are compatible only
/// if their ids are equal, never because their contents happen to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitSystemId(Uuid);

impl fmt::Display for UnitSystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registry of named units.
///
/// The system is populated with [`UnitSystem::add_unit`] at startup and is
/// read-only afterwards; values share it through an `Rc`. Equality is identity:
/// two systems built from identical unit tables still compare unequal.
///
/// # Example
/// ```
/// use unitcalc::interpreter::value::unit_system::{Dimension, UnitInformation, UnitSystem};
///
/// let mut units = UnitSystem::new();
/// units.add_unit(UnitInformation::linear("meter", Dimension::Length, 1.0)).unwrap();
/// units.add_unit(UnitInformation::linear("kilometer", Dimension::Length, 1000.0)).unwrap();
///
/// assert_eq!(units.convert(2.5, "kilometer", "meter").unwrap(), 2500.0);
/// assert_ne!(units, UnitSystem::new());
/// ```
#[derive(Debug)]
pub struct UnitSystem {
    id:    UnitSystemId,
    units: BTreeMap<String, UnitInformation>,
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for UnitSystem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for UnitSystem {}

impl UnitSystem {
    /// Creates an empty unit system with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self { id:    UnitSystemId(Uuid::new_v4()),
               units: BTreeMap::new(), }
    }

    /// Returns the identity of this system.
    #[must_use]
    pub const fn id(&self) -> UnitSystemId {
        self.id
    }

    /// Registers a new unit.
    ///
    /// # Errors
    /// Returns [`UnitError::UnitAlreadyExists`] if a unit with the same name is
    /// already registered; the system is left unchanged.
    pub fn add_unit(&mut self, info: UnitInformation) -> UnitResult<()> {
        if self.units.contains_key(&info.name) {
            return Err(UnitError::UnitAlreadyExists(info.name));
        }

        tracing::debug!(system = %self.id,
                        unit = %info.name,
                        dimension = %info.dimension,
                        "registered unit");
        self.units.insert(info.name.clone(), info);
        Ok(())
    }

    /// Looks up a unit by name.
    #[must_use]
    pub fn unit(&self, name: &str) -> Option<&UnitInformation> {
        self.units.get(name)
    }

    /// Returns `true` if a unit with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Returns the dimension measured by the named unit.
    ///
    /// # Errors
    /// Returns [`UnitError::UnknownUnit`] if the name is not registered.
    pub fn dimension(&self, name: &str) -> UnitResult<Dimension> {
        self.lookup(name).map(|info| info.dimension)
    }

    /// Converts `value` from one unit to another of the same dimension.
    ///
    /// The value is first mapped into the base representation through the
    /// source unit's affine map, then out through the target unit's inverse.
    ///
    /// # Errors
    /// - [`UnitError::UnknownUnit`] if either name is not registered.
    /// - [`UnitError::IncompatibleUnits`] if the units measure different
    ///   dimensions.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> UnitResult<f64> {
        let source = self.lookup(from)?;
        let target = self.lookup(to)?;

        if source.dimension != target.dimension {
            return Err(UnitError::incompatible(format!("cannot convert {from} ({}) to {to} ({})",
                                                       source.dimension, target.dimension)));
        }

        Ok(target.from_base(source.to_base(value)))
    }

    /// Iterates over the registered units in name order.
    pub fn units(&self) -> impl Iterator<Item = &UnitInformation> {
        self.units.values()
    }

    /// Returns the number of registered units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if no unit is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    fn lookup(&self, name: &str) -> UnitResult<&UnitInformation> {
        self.units
            .get(name)
            .ok_or_else(|| UnitError::UnknownUnit(name.to_string()))
    }
}
