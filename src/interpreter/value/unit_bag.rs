use std::{collections::BTreeMap, fmt};

use crate::{
    error::UnitError,
    interpreter::value::unit_system::{Dimension, UnitResult, UnitSystem},
};

/// A unit name raised to a positive integer power, such as `meter^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPower {
    /// Name of the unit as registered in the unit system.
    pub name:  String,
    /// How many times the unit is repeated.
    pub count: u32,
}

impl fmt::Display for UnitPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}^{}", self.name, self.count)
        }
    }
}

/// One side of a compound unit: the product of unit powers found in a
/// numerator or in a denominator, keyed by dimension.
///
/// A bag holds at most one unit name per dimension. Repeating the same unit
/// increments its count; mixing two names of one dimension is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitBag {
    entries: BTreeMap<Dimension, UnitPower>,
}

impl UnitBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups a list of unit names by dimension.
    ///
    /// # Errors
    /// - [`UnitError::UnknownUnit`] if a name is not registered in `system`.
    /// - [`UnitError::DifferentUnitsForSameBase`] if two different names share
    ///   a dimension.
    ///
    /// # Example
    /// ```
    /// use unitcalc::{
    ///     builtin::builtin_unit_system,
    ///     error::UnitError,
    ///     interpreter::value::{unit_bag::UnitBag, unit_system::Dimension},
    /// };
    ///
    /// let units = builtin_unit_system();
    /// let bag = UnitBag::from_names(&units, &["meter", "second", "meter"]).unwrap();
    /// assert_eq!(bag.get(Dimension::Length).unwrap().count, 2);
    /// assert_eq!(bag.to_string(), "meter^2*second");
    ///
    /// let err = UnitBag::from_names(&units, &["meter", "foot"]).unwrap_err();
    /// assert!(matches!(err, UnitError::DifferentUnitsForSameBase { .. }));
    /// ```
    pub fn from_names(system: &UnitSystem, names: &[&str]) -> UnitResult<Self> {
        let mut bag = Self::new();
        for name in names {
            let dimension = system.dimension(name)?;
            bag.push(dimension, name, 1)?;
        }
        Ok(bag)
    }

    /// Returns the unit recorded for `dimension`, if any.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> Option<&UnitPower> {
        self.entries.get(&dimension)
    }

    /// Returns `true` if the bag holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of distinct dimensions in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the entries in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &UnitPower)> {
        self.entries.iter().map(|(dimension, power)| (*dimension, power))
    }

    /// Returns `true` if both bags cover the same dimensions with the same
    /// repeat counts, whatever unit names represent them.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
        && self.entries.iter().all(|(dimension, power)| {
                                   other.entries
                                        .get(dimension)
                                        .is_some_and(|theirs| theirs.count == power.count)
                               })
    }

    /// Adds `count` repetitions of `name` under `dimension`.
    pub(crate) fn push(&mut self, dimension: Dimension, name: &str, count: u32) -> UnitResult<()> {
        match self.entries.get_mut(&dimension) {
            Some(existing) if existing.name == name => {
                let overflow = || UnitError::CountOverflow { unit: name.to_string() };
                existing.count = existing.count.checked_add(count).ok_or_else(overflow)?;
            },
            Some(existing) => {
                return Err(UnitError::DifferentUnitsForSameBase { dimension,
                                                                  first: existing.name.clone(),
                                                                  second: name.to_string() });
            },
            None => {
                self.entries.insert(dimension,
                                    UnitPower { name: name.to_string(),
                                                count });
            },
        }
        Ok(())
    }

    /// Adds every entry of `other` to this bag.
    pub(crate) fn merge(&mut self, other: &Self) -> UnitResult<()> {
        for (dimension, power) in other.iter() {
            self.push(dimension, &power.name, power.count)?;
        }
        Ok(())
    }

    /// Replaces the unit name recorded for `dimension`.
    pub(crate) fn rename(&mut self, dimension: Dimension, name: &str) {
        if let Some(power) = self.entries.get_mut(&dimension) {
            power.name = name.to_string();
        }
    }

    /// Sets the count for `dimension`, removing the entry when it drops to zero.
    pub(crate) fn set_count(&mut self, dimension: Dimension, count: u32) {
        if count == 0 {
            self.entries.remove(&dimension);
        } else if let Some(power) = self.entries.get_mut(&dimension) {
            power.count = count;
        }
    }

    /// Multiplies every count by `factor`; a zero factor empties the bag.
    pub(crate) fn raised(&self, factor: u32) -> UnitResult<Self> {
        if factor == 0 {
            return Ok(Self::new());
        }

        let mut entries = BTreeMap::new();
        for (dimension, power) in self.iter() {
            let count = power.count
                             .checked_mul(factor)
                             .ok_or_else(|| UnitError::CountOverflow { unit: power.name.clone() })?;
            entries.insert(dimension,
                           UnitPower { name: power.name.clone(),
                                       count });
        }
        Ok(Self { entries })
    }
}

impl fmt::Display for UnitBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, power) in self.entries.values().enumerate() {
            if i > 0 {
                f.write_str("*")?;
            }
            write!(f, "{power}")?;
        }
        Ok(())
    }
}
