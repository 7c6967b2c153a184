use std::{fmt, mem, rc::Rc};

use crate::{
    error::{Error, UnitError},
    interpreter::value::{
        unit_bag::UnitBag,
        unit_system::{Dimension, UnitResult, UnitSystem},
    },
    util::num::{f64_to_i32_checked, factorial, power},
};

/// Which side of the fraction bar a unit sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Numerator,
    Denominator,
}

/// A numeric value, optionally tagged with a compound unit.
///
/// The unit is kept as two [`UnitBag`]s, the product of units in the
/// numerator and the product in the denominator. A value with units is bound
/// to the [`UnitSystem`] that defines them; a plain number is unbound and
/// combines freely with values from any system.
///
/// Primaries are immutable. Every operation returns a new value.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use unitcalc::{builtin::builtin_unit_system, interpreter::value::primary::Primary};
///
/// let units = Rc::new(builtin_unit_system());
/// let distance = Primary::with_unit(1.0, &units, "kilometer").unwrap();
/// let extra = Primary::with_unit(500.0, &units, "meter").unwrap();
///
/// let total = distance.add(&extra).unwrap();
/// assert_eq!(total.value(), 1500.0);
/// assert_eq!(total.to_string(), "1500 meter");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Primary {
    value:       f64,
    unit_system: Option<Rc<UnitSystem>>,
    numerator:   UnitBag,
    denominator: UnitBag,
}

impl From<f64> for Primary {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl Primary {
    /// Creates a dimensionless value that is not bound to any unit system.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value,
               unit_system: None,
               numerator: UnitBag::new(),
               denominator: UnitBag::new() }
    }

    /// Creates a value carrying a single unit.
    ///
    /// # Errors
    /// Returns [`UnitError::UnknownUnit`] if `unit` is not registered.
    pub fn with_unit(value: f64, system: &Rc<UnitSystem>, unit: &str) -> UnitResult<Self> {
        Self::with_units(value, system, &[unit], &[])
    }

    /// Creates a value carrying a compound unit.
    ///
    /// Each list is grouped by dimension. A dimension that ends up on both
    /// sides is cancelled, converting the value as needed, so `meter/foot`
    /// becomes a dimensionless ratio.
    ///
    /// # Errors
    /// - [`UnitError::UnknownUnit`] if a name is not registered.
    /// - [`UnitError::DifferentUnitsForSameBase`] if one list mixes two units of
    ///   the same dimension.
    ///
    /// # Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use unitcalc::{builtin::builtin_unit_system, interpreter::value::primary::Primary};
    ///
    /// let units = Rc::new(builtin_unit_system());
    /// let g = Primary::with_units(9.81, &units, &["meter"], &["second", "second"]).unwrap();
    /// assert_eq!(g.to_string(), "9.81 meter/second^2");
    ///
    /// assert!(Primary::with_units(1.0, &units, &["meter", "foot"], &[]).is_err());
    /// ```
    pub fn with_units(value: f64,
                      system: &Rc<UnitSystem>,
                      numerator: &[&str],
                      denominator: &[&str])
                      -> UnitResult<Self> {
        let numerator = UnitBag::from_names(system, numerator)?;
        let denominator = UnitBag::from_names(system, denominator)?;

        Self::from_parts(value, Some(Rc::clone(system)), numerator, denominator).simplified()
    }

    const fn from_parts(value: f64,
                        unit_system: Option<Rc<UnitSystem>>,
                        numerator: UnitBag,
                        denominator: UnitBag)
                        -> Self {
        Self { value,
               unit_system,
               numerator,
               denominator }
    }

    /// Returns the numeric value, in whatever units the value carries.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Returns the units multiplied in the numerator.
    #[must_use]
    pub const fn numerator(&self) -> &UnitBag {
        &self.numerator
    }

    /// Returns the units multiplied in the denominator.
    #[must_use]
    pub const fn denominator(&self) -> &UnitBag {
        &self.denominator
    }

    /// Returns the unit system this value is bound to, if any.
    #[must_use]
    pub const fn unit_system(&self) -> Option<&Rc<UnitSystem>> {
        self.unit_system.as_ref()
    }

    /// Returns `true` if the value carries no units.
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }

    /// Adds two values whose units have the same shape.
    ///
    /// The left operand is converted into the right operand's units before the
    /// addition, and the result carries the right operand's units.
    ///
    /// # Errors
    /// Returns [`UnitError::IncompatibleUnits`] if the operands belong to
    /// different unit systems or their units have different dimensions or
    /// repeat counts.
    pub fn add(&self, other: &Self) -> UnitResult<Self> {
        self.additive(other, "add", |a, b| a + b)
    }

    /// Subtracts `other` from `self`; see [`Primary::add`] for the unit rules.
    ///
    /// # Errors
    /// Returns [`UnitError::IncompatibleUnits`] under the same conditions as
    /// [`Primary::add`].
    pub fn subtract(&self, other: &Self) -> UnitResult<Self> {
        self.additive(other, "subtract", |a, b| a - b)
    }

    /// Floating-point remainder with the sign of the dividend.
    ///
    /// Follows the unit rules of [`Primary::add`].
    ///
    /// # Errors
    /// - [`UnitError::IncompatibleUnits`] as for [`Primary::add`].
    /// - [`UnitError::DivisionByZero`] if `other` is zero.
    pub fn remainder(&self, other: &Self) -> UnitResult<Self> {
        if other.value == 0.0 {
            return Err(UnitError::DivisionByZero);
        }
        self.additive(other, "take the remainder of", |a, b| a % b)
    }

    /// Multiplies two values, combining their units.
    ///
    /// Wherever both operands measure the same dimension, the left operand is
    /// first converted into the right operand's unit, so the product keeps a
    /// single unit per dimension. Matching numerator and denominator
    /// dimensions cancel.
    ///
    /// # Errors
    /// Returns [`UnitError::IncompatibleUnits`] if the operands belong to
    /// different unit systems.
    ///
    /// # Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use unitcalc::{builtin::builtin_unit_system, interpreter::value::primary::Primary};
    ///
    /// let units = Rc::new(builtin_unit_system());
    /// let speed = Primary::with_units(3.0, &units, &["meter"], &["second"]).unwrap();
    /// let time = Primary::with_unit(2.0, &units, "minute").unwrap();
    ///
    /// let distance = speed.multiply(&time).unwrap();
    /// assert!((distance.value() - 360.0).abs() < 1e-9);
    /// assert_eq!(distance.unit_string(), "meter");
    /// ```
    pub fn multiply(&self, other: &Self) -> UnitResult<Self> {
        let system = self.shared_system(other)?;
        let lhs = self.converted_towards(other)?;

        let mut numerator = lhs.numerator;
        numerator.merge(&other.numerator)?;
        let mut denominator = lhs.denominator;
        denominator.merge(&other.denominator)?;

        Self::from_parts(lhs.value * other.value, system, numerator, denominator).simplified()
    }

    /// Divides `self` by `other`, as multiplication by the reciprocal.
    ///
    /// # Errors
    /// - [`UnitError::DivisionByZero`] if `other` is zero.
    /// - [`UnitError::IncompatibleUnits`] as for [`Primary::multiply`].
    pub fn divide(&self, other: &Self) -> UnitResult<Self> {
        if other.value == 0.0 {
            return Err(UnitError::DivisionByZero);
        }
        self.multiply(&other.reciprocal())
    }

    /// Raises `self` to a dimensionless exponent.
    ///
    /// The numeric rules of [`power`] apply to the values. A value with units
    /// may only be raised to an integer power: unit counts are multiplied, a
    /// negative exponent moves the units across the fraction bar and a zero
    /// exponent yields a dimensionless result.
    ///
    /// # Errors
    /// - [`UnitError::IncompatibleUnits`] if the operands belong to different
    ///   unit systems, the exponent carries units, or a unit-bearing base has
    ///   a non-integer exponent.
    /// - [`UnitError::CountOverflow`] if a unit count no longer fits.
    /// - Runtime errors from [`power`] for values without a real result.
    pub fn power(&self, exponent: &Self) -> Result<Self, Error> {
        let system = self.shared_system(exponent)?;
        if !exponent.is_dimensionless() {
            let reason = format!("the exponent {exponent} must be dimensionless");
            return Err(UnitError::incompatible(reason).into());
        }

        let value = power(self.value, exponent.value)?;
        if self.is_dimensionless() {
            return Ok(Self::from_parts(value, system, UnitBag::new(), UnitBag::new()));
        }

        let n = f64_to_i32_checked(exponent.value).ok_or_else(|| {
                    UnitError::incompatible(format!("cannot raise {} to the non-integer power {}",
                                                    self.unit_string(),
                                                    exponent.value))
                })?;
        let mut numerator = self.numerator.raised(n.unsigned_abs())?;
        let mut denominator = self.denominator.raised(n.unsigned_abs())?;
        if n < 0 {
            mem::swap(&mut numerator, &mut denominator);
        }

        Ok(Self::from_parts(value, system, numerator, denominator))
    }

    /// Computes `Γ(x + 1)` of the value. The result is dimensionless.
    ///
    /// # Errors
    /// Returns a runtime error if the value is negative.
    pub fn factorial(&self) -> Result<Self, Error> {
        Ok(Self::new(factorial(self.value)?))
    }

    /// Returns the value with its sign flipped; units are preserved.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self { value: -self.value,
               ..self.clone() }
    }

    /// Returns the value unchanged (unary plus).
    #[must_use]
    pub fn identity(&self) -> Self {
        self.clone()
    }

    /// Returns `1 / self`, with numerator and denominator swapped.
    #[must_use]
    pub fn reciprocal(&self) -> Self {
        Self::from_parts(1.0 / self.value,
                         self.unit_system.clone(),
                         self.denominator.clone(),
                         self.numerator.clone())
    }

    /// Re-expresses the value in another choice of units of the same shape.
    ///
    /// # Errors
    /// - [`UnitError::UnknownUnit`] or [`UnitError::DifferentUnitsForSameBase`]
    ///   if the target lists are invalid.
    /// - [`UnitError::IncompatibleUnits`] if the value is not bound to a unit
    ///   system or the target has a different shape.
    ///
    /// # Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use unitcalc::{builtin::builtin_unit_system, interpreter::value::primary::Primary};
    ///
    /// let units = Rc::new(builtin_unit_system());
    /// let boiling = Primary::with_unit(100.0, &units, "celsius").unwrap();
    /// let f = boiling.convert_to(&["fahrenheit"], &[]).unwrap();
    /// assert!((f.value() - 212.0).abs() < 1e-9);
    /// ```
    pub fn convert_to(&self, numerator: &[&str], denominator: &[&str]) -> UnitResult<Self> {
        let Some(system) = &self.unit_system else {
            return Err(UnitError::incompatible(format!("{self} is not bound to a unit system")));
        };

        let target = Self::with_units(1.0, system, numerator, denominator)?;
        if !self.same_shape(&target) {
            return Err(UnitError::incompatible(format!("cannot convert {} to {}",
                                                       self.unit_string(),
                                                       target.unit_string())));
        }

        self.converted_towards(&target)
    }

    /// Returns the unit part of the value, such as `meter/second^2`, or an
    /// empty string for a dimensionless value.
    #[must_use]
    pub fn unit_string(&self) -> String {
        match (self.numerator.is_empty(), self.denominator.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.numerator.to_string(),
            (numerator_empty, false) => {
                let top = if numerator_empty { "1".to_string() } else { self.numerator.to_string() };
                if self.denominator.len() == 1 {
                    format!("{top}/{}", self.denominator)
                } else {
                    format!("{top}/({})", self.denominator)
                }
            },
        }
    }

    /// Returns the unit system both operands can share.
    ///
    /// An unbound operand adopts the other's system; two bound operands must
    /// have the same identity.
    fn shared_system(&self, other: &Self) -> UnitResult<Option<Rc<UnitSystem>>> {
        match (&self.unit_system, &other.unit_system) {
            (Some(mine), Some(theirs)) if mine.id() != theirs.id() => {
                Err(UnitError::incompatible("the operands belong to different unit systems"))
            },
            (Some(mine), _) => Ok(Some(Rc::clone(mine))),
            (None, theirs) => Ok(theirs.clone()),
        }
    }

    /// Returns `true` if both values have the same dimensions with the same
    /// repeat counts on each side of the fraction bar.
    fn same_shape(&self, other: &Self) -> bool {
        self.numerator.same_shape(&other.numerator) && self.denominator.same_shape(&other.denominator)
    }

    fn additive(&self,
                other: &Self,
                verb: &str,
                combine: impl Fn(f64, f64) -> f64)
                -> UnitResult<Self> {
        let system = self.shared_system(other)?;
        if !self.same_shape(other) {
            return Err(UnitError::incompatible(format!("cannot {verb} '{}' and '{}'",
                                                       self.unit_string(),
                                                       other.unit_string())));
        }

        let lhs = self.converted_towards(other)?;
        Ok(Self::from_parts(combine(lhs.value, other.value),
                            system,
                            other.numerator.clone(),
                            other.denominator.clone()))
    }

    /// Returns the unit this value uses for `dimension`, on either side.
    fn unit_for(&self, dimension: Dimension) -> Option<&str> {
        self.numerator
            .get(dimension)
            .or_else(|| self.denominator.get(dimension))
            .map(|power| power.name.as_str())
    }

    /// Converts `self`, dimension by dimension, into the units `target` uses
    /// wherever both measure the same dimension.
    fn converted_towards(&self, target: &Self) -> UnitResult<Self> {
        let mut result = self.clone();
        let Some(system) = self.unit_system.as_deref() else {
            return Ok(result);
        };

        for (side, bag) in [(Side::Numerator, &self.numerator), (Side::Denominator, &self.denominator)] {
            for (dimension, power) in bag.iter() {
                let Some(to) = target.unit_for(dimension) else {
                    continue;
                };
                if to == power.name {
                    continue;
                }

                result.value = rescale(system, result.value, &power.name, to, power.count, side)?;
                match side {
                    Side::Numerator => result.numerator.rename(dimension, to),
                    Side::Denominator => result.denominator.rename(dimension, to),
                }
            }
        }

        Ok(result)
    }

    /// Cancels dimensions that appear in both the numerator and the
    /// denominator, converting the cancelled denominator factors into the
    /// numerator's unit first when they differ.
    fn simplified(mut self) -> UnitResult<Self> {
        let shared: Vec<Dimension> = self.numerator
                                         .iter()
                                         .filter(|(dimension, _)| self.denominator.get(*dimension).is_some())
                                         .map(|(dimension, _)| dimension)
                                         .collect();
        if shared.is_empty() {
            return Ok(self);
        }
        let Some(system) = self.unit_system.clone() else {
            return Ok(self);
        };

        for dimension in shared {
            let (Some(top), Some(bottom)) =
                (self.numerator.get(dimension).cloned(), self.denominator.get(dimension).cloned())
            else {
                continue;
            };

            // Only the cancelled factors change unit; leftovers keep their own.
            let cancelled = top.count.min(bottom.count);
            if top.name != bottom.name {
                self.value = rescale(&system,
                                     self.value,
                                     &bottom.name,
                                     &top.name,
                                     cancelled,
                                     Side::Denominator)?;
            }

            self.numerator.set_count(dimension, top.count - cancelled);
            self.denominator.set_count(dimension, bottom.count - cancelled);
        }

        Ok(self)
    }
}

/// Re-expresses `value` after replacing `count` factors of `from` with `to`.
///
/// Numerator factors go through the unit system's conversion directly.
/// Denominator factors convert the reciprocal: `v' = 1 / convert(1 / v)`.
fn rescale(system: &UnitSystem,
           value: f64,
           from: &str,
           to: &str,
           count: u32,
           side: Side)
           -> UnitResult<f64> {
    let mut value = value;
    for _ in 0..count {
        value = match side {
            Side::Numerator => system.convert(value, from, to)?,
            Side::Denominator => 1.0 / system.convert(1.0 / value, from, to)?,
        };
    }
    Ok(value)
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit_string())
        }
    }
}
