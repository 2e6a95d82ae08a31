//! Initial condition descriptors
//!
//! An initial condition is given as a compact descriptor string: a name
//! followed by a parenthesized, comma-separated argument list. Names are
//! matched by literal prefix.
//!
//! | Descriptor | Effect on `u(x, 0)` |
//! |---|---|
//! | `const(v)` | every zero entry set to `v` |
//! | `step(left,xmid,right)` | `left` where `x < xmid`, `right` elsewhere |
//! | `ramp(left,right)` | linear from `left` at node 0 to `right` at the last node |
//! | `rand(seed,base,amp)` | seeded uniform values in `[base-amp, base+amp)` |
//! | `sin(...)` | `u[0] = dx`, `u[i] = π·(u[i-1] + dx)` (growing sequence, not a sine) |
//! | `spikes(base,amp,loc,...)` | zero entries set to `base`, then `u[loc] = amp` per pair |
//!
//! Any other descriptor parses to [`InitialCondition::Unrecognized`] and
//! leaves the vector untouched.
//!
//! # Example
//!
//! ```rust
//! use heateq::physics::InitialCondition;
//! use nalgebra::DVector;
//!
//! let ic: InitialCondition = "ramp(0,1)".parse().unwrap();
//! let mut u = DVector::zeros(5);
//! ic.apply(&mut u, 0.25);
//! assert!((u[4] - 1.0).abs() < 1e-12);
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::DVector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{HeatError, HeatResult};

/// Parsed initial condition
#[derive(Debug, Clone, PartialEq)]
pub enum InitialCondition {
    /// `const(v)`
    Constant(f64),

    /// `step(left,xmid,right)`
    Step { left: f64, xmid: f64, right: f64 },

    /// `ramp(left,right)`
    Ramp { left: f64, right: f64 },

    /// `rand(seed,base,amp)`
    Random { seed: u64, base: f64, amplitude: f64 },

    /// `sin(...)`, arguments ignored
    Sine,

    /// `spikes(base,amp1,loc1,amp2,loc2,...)`
    Spikes { base: f64, spikes: Vec<(f64, usize)> },

    /// Anything else, kept verbatim
    Unrecognized(String),
}

impl InitialCondition {
    /// Parse a descriptor string
    ///
    /// # Errors
    ///
    /// A recognized descriptor with a missing or non-numeric argument.
    pub fn parse(descriptor: &str) -> HeatResult<Self> {
        let args = Arguments::new(descriptor);

        let ic = if descriptor.starts_with("const(") {
            Self::Constant(args.float(0)?)
        } else if descriptor.starts_with("step(") {
            Self::Step {
                left: args.float(0)?,
                xmid: args.float(1)?,
                right: args.float(2)?,
            }
        } else if descriptor.starts_with("ramp(") {
            Self::Ramp {
                left: args.float(0)?,
                right: args.float(1)?,
            }
        } else if descriptor.starts_with("rand(") {
            Self::Random {
                seed: args.integer(0)? as u64,
                base: args.float(1)?,
                amplitude: args.float(2)?,
            }
        } else if descriptor.starts_with("sin(") {
            Self::Sine
        } else if descriptor.starts_with("spikes(") {
            let base = args.float(0)?;
            let mut spikes = Vec::new();
            let mut position = 1;
            // Pairs only; a trailing unpaired value is ignored
            while position + 1 < args.len() {
                let amplitude = args.float(position)?;
                let location = args.integer(position + 1)?;
                if location >= 0 {
                    spikes.push((amplitude, location as usize));
                }
                position += 2;
            }
            Self::Spikes { base, spikes }
        } else {
            log::warn!("unrecognized initial condition {descriptor:?}, leaving u(x,0) = 0");
            Self::Unrecognized(descriptor.to_string())
        };

        Ok(ic)
    }

    /// Fill `previous` (expected pre-zeroed) on a grid with spacing `dx`
    pub fn apply(&self, previous: &mut DVector<f64>, dx: f64) {
        let nx = previous.len();
        if nx == 0 {
            return;
        }

        match self {
            Self::Constant(value) => fill_zeros(previous, *value),

            Self::Step { left, xmid, right } => {
                let mut x = 0.0;
                for value in previous.iter_mut() {
                    *value = if x < *xmid { *left } else { *right };
                    x += dx;
                }
            }

            Self::Ramp { left, right } => {
                let dv = (right - left) / (nx - 1) as f64;
                previous[0] = *left;
                for i in 1..nx {
                    previous[i] = previous[i - 1] + dv;
                }
            }

            Self::Random { seed, base, amplitude } => {
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                for value in previous.iter_mut() {
                    let u: f64 = rng.random();
                    *value = base + amplitude * (2.0 * u - 1.0);
                }
            }

            Self::Sine => {
                previous[0] = dx;
                for i in 1..nx {
                    previous[i] = PI * (previous[i - 1] + dx);
                }
            }

            Self::Spikes { base, spikes } => {
                fill_zeros(previous, *base);
                for &(amplitude, location) in spikes {
                    if location < nx {
                        previous[location] = amplitude;
                    }
                }
            }

            Self::Unrecognized(_) => {}
        }
    }

    /// True unless the descriptor was unrecognized
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl FromStr for InitialCondition {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for InitialCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => write!(f, "const({v})"),
            Self::Step { left, xmid, right } => write!(f, "step({left},{xmid},{right})"),
            Self::Ramp { left, right } => write!(f, "ramp({left},{right})"),
            Self::Random { seed, base, amplitude } => write!(f, "rand({seed},{base},{amplitude})"),
            Self::Sine => write!(f, "sin()"),
            Self::Spikes { base, spikes } => {
                write!(f, "spikes({base}")?;
                for (amplitude, location) in spikes {
                    write!(f, ",{amplitude},{location}")?;
                }
                write!(f, ")")
            }
            Self::Unrecognized(text) => write!(f, "{text}"),
        }
    }
}

fn fill_zeros(values: &mut DVector<f64>, fill: f64) {
    for value in values.iter_mut().filter(|v| **v == 0.0) {
        *value = fill;
    }
}

// =================================================================================================
// Argument list
// =================================================================================================

/// Comma-separated text between the first `(` and the first `)`
struct Arguments<'a> {
    descriptor: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> Arguments<'a> {
    fn new(descriptor: &'a str) -> Self {
        let fields = match descriptor.find('(') {
            Some(open) => {
                let rest = &descriptor[open + 1..];
                let inner = match rest.find(')') {
                    Some(close) => &rest[..close],
                    None => rest,
                };
                inner.split(',').map(str::trim).collect()
            }
            None => Vec::new(),
        };

        Self { descriptor, fields }
    }

    fn len(&self) -> usize {
        self.fields.len()
    }

    fn field(&self, position: usize) -> HeatResult<&'a str> {
        self.fields
            .get(position)
            .copied()
            .ok_or_else(|| HeatError::MissingArgument {
                descriptor: self.descriptor.to_string(),
                position,
            })
    }

    fn float(&self, position: usize) -> HeatResult<f64> {
        let text = self.field(position)?;
        text.parse().map_err(|_| self.invalid(position, text))
    }

    fn integer(&self, position: usize) -> HeatResult<i64> {
        let text = self.field(position)?;
        text.parse().map_err(|_| self.invalid(position, text))
    }

    fn invalid(&self, position: usize, text: &str) -> HeatError {
        HeatError::InvalidArgument {
            descriptor: self.descriptor.to_string(),
            position,
            value: text.to_string(),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn generate(descriptor: &str, nx: usize, dx: f64) -> DVector<f64> {
        let mut u = DVector::zeros(nx);
        InitialCondition::parse(descriptor).unwrap().apply(&mut u, dx);
        u
    }

    #[test]
    fn test_const_fills_every_node() {
        let u = generate("const(1)", 11, 0.1);
        assert_eq!(u.len(), 11);
        assert!(u.iter().all(|v| *v == 1.0));
    }

    #[test]
    fn test_const_only_touches_zero_entries() {
        let mut u = DVector::from_vec(vec![0.0, 2.0, 0.0]);
        InitialCondition::Constant(7.0).apply(&mut u, 0.5);
        assert_eq!(u, DVector::from_vec(vec![7.0, 2.0, 7.0]));
    }

    #[test]
    fn test_step() {
        let u = generate("step(1,0.5,3)", 11, 0.1);
        for i in 0..5 {
            assert_eq!(u[i], 1.0, "node {i}");
        }
        for i in 6..11 {
            assert_eq!(u[i], 3.0, "node {i}");
        }
    }

    #[test]
    fn test_ramp() {
        let u = generate("ramp(0,1)", 11, 0.1);
        for i in 0..11 {
            assert_relative_eq!(u[i], i as f64 / 10.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rand_is_seeded_and_bounded() {
        let a = generate("rand(42,5,0.5)", 50, 0.02);
        let b = generate("rand(42,5,0.5)", 50, 0.02);
        let c = generate("rand(7,5,0.5)", 50, 0.02);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|v| *v >= 4.5 && *v < 5.5));
    }

    #[test]
    fn test_sin_is_literal_recursion() {
        let dx = 0.25;
        let u = generate("sin(PI*x)", 5, dx);

        assert_eq!(u[0], dx);
        for i in 1..5 {
            assert_relative_eq!(u[i], PI * (u[i - 1] + dx), max_relative = 1e-15);
        }
        assert!(u.iter().zip(u.iter().skip(1)).all(|(a, b)| b > a));
    }

    #[test]
    fn test_spikes() {
        let u = generate("spikes(1,5,2,9,4,8,99)", 6, 0.2);
        assert_eq!(u, DVector::from_vec(vec![1.0, 1.0, 5.0, 1.0, 9.0, 1.0]));
    }

    #[test]
    fn test_spikes_ignores_trailing_value() {
        let ic = InitialCondition::parse("spikes(0.5,2,1,3)").unwrap();
        assert_eq!(ic, InitialCondition::Spikes { base: 0.5, spikes: vec![(2.0, 1)] });
    }

    #[test]
    fn test_unrecognized_is_silent_no_op() {
        let ic = InitialCondition::parse("gauss(1,2)").unwrap();
        assert!(!ic.is_recognized());

        let mut u = DVector::zeros(4);
        ic.apply(&mut u, 0.1);
        assert!(u.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_matching_is_by_literal_prefix() {
        // Name must be followed directly by '('
        assert!(!InitialCondition::parse("const 1").unwrap().is_recognized());
        assert!(!InitialCondition::parse("CONST(1)").unwrap().is_recognized());
        assert_eq!(
            InitialCondition::parse("const(2.5)trailing").unwrap(),
            InitialCondition::Constant(2.5)
        );
    }

    #[test]
    fn test_arguments_are_trimmed() {
        let ic: InitialCondition = "ramp( 1 , 2 )".parse().unwrap();
        assert_eq!(ic, InitialCondition::Ramp { left: 1.0, right: 2.0 });
    }

    #[test]
    fn test_malformed_number_is_error() {
        let err = InitialCondition::parse("step(0,mid,1)").unwrap_err();
        assert!(matches!(err, HeatError::InvalidArgument { position: 1, .. }));

        let err = InitialCondition::parse("rand(1.5,0,1)").unwrap_err();
        assert!(matches!(err, HeatError::InvalidArgument { position: 0, .. }));
    }

    #[test]
    fn test_missing_argument_is_error() {
        let err = InitialCondition::parse("ramp(0)").unwrap_err();
        assert!(matches!(err, HeatError::MissingArgument { position: 1, .. }));
    }

    #[test]
    fn test_display_round_trips_recognized_forms() {
        for text in ["const(1)", "step(0,0.5,1)", "ramp(0,1)", "rand(3,1,0.5)", "spikes(0,1,2)"] {
            let ic: InitialCondition = text.parse().unwrap();
            assert_eq!(ic.to_string().parse::<InitialCondition>().unwrap(), ic);
        }
    }
}
