use crate::interpreter::value::unit_system::{Dimension, UnitInformation, UnitSystem};

/// Returns the descriptions of every built-in unit.
///
/// Length is based on the meter, mass on the kilogram, time on the second and
/// temperature on the degree Celsius.
///
/// # Example
/// ```
/// use unitcalc::{builtin::builtin_units, interpreter::value::unit_system::Dimension};
///
/// let units = builtin_units();
/// let mile = units.iter().find(|unit| unit.name == "mile").unwrap();
/// assert_eq!(mile.dimension, Dimension::Length);
/// assert_eq!(mile.scale, 1609.344);
/// ```
#[must_use]
pub fn builtin_units() -> Vec<UnitInformation> {
    use Dimension::{Length, Mass, Temperature, Time};

    vec![UnitInformation::linear("meter", Length, 1.0),
         UnitInformation::linear("kilometer", Length, 1000.0),
         UnitInformation::linear("inch", Length, 0.0254),
         UnitInformation::linear("foot", Length, 0.3048),
         UnitInformation::linear("mile", Length, 1609.344),
         UnitInformation::linear("league", Length, 4800.0),
         UnitInformation::linear("kilogram", Mass, 1.0),
         UnitInformation::linear("gram", Mass, 0.001),
         UnitInformation::linear("tonne", Mass, 1000.0),
         UnitInformation::linear("pound", Mass, 0.45),
         UnitInformation::linear("second", Time, 1.0),
         UnitInformation::linear("minute", Time, 60.0),
         UnitInformation::linear("hour", Time, 3600.0),
         UnitInformation::new("kelvin", Temperature, -273.15, 1.0),
         UnitInformation::linear("celsius", Temperature, 1.0),
         UnitInformation::new("fahrenheit", Temperature, -32.0 * 5.0 / 9.0, 5.0 / 9.0)]
}

/// Creates a unit system holding every unit from [`builtin_units`].
///
/// Each call allocates a new system with its own identity.
///
/// # Example
/// ```
/// use unitcalc::builtin::builtin_unit_system;
///
/// let units = builtin_unit_system();
/// assert_eq!(units.convert(1.0, "mile", "meter").unwrap(), 1609.344);
/// assert!((units.convert(212.0, "fahrenheit", "celsius").unwrap() - 100.0).abs() < 1e-9);
/// assert_ne!(units, builtin_unit_system());
/// ```
#[must_use]
pub fn builtin_unit_system() -> UnitSystem {
    let mut system = UnitSystem::new();
    for info in builtin_units() {
        if let Err(e) = system.add_unit(info) {
            tracing::warn!(error = %e, "skipped built-in unit");
        }
    }
    system
}
