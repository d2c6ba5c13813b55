// pl-core/src/units.rs

use uom::si::f64::{Frequency as UomFrequency, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Frequency = UomFrequency;
pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

/// Value of a time quantity in seconds.
#[inline]
pub fn seconds(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

/// Value of a frequency quantity in hertz.
#[inline]
pub fn hertz(f: Frequency) -> f64 {
    use uom::si::frequency::hertz;
    f.get::<hertz>()
}
