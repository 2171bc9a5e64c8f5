//! Bracketed bisection for the steady-state speed cubic
//!
//! The power balance reduces to `a·x³ + c·x + d = 0` with `a > 0`. There is
//! no quadratic term, so the derivative `3a·x² + c` is non-negative for all
//! `x` when `c ≥ 0`, and for `x ≥ sqrt(-c / 3a)` when `c < 0`. Starting the
//! bracket at that point means the cubic is monotone over the whole search
//! range and bisection converges to the largest real root.

/// Cubic without a quadratic term: `a·x³ + c·x + d`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub a: f64,
    pub c: f64,
    pub d: f64,
}

impl Cubic {
    pub fn new(a: f64, c: f64, d: f64) -> Self {
        Self { a, c, d }
    }

    /// Pure evaluator capturing only the three coefficients
    pub fn evaluator(&self) -> impl Fn(f64) -> f64 {
        let Cubic { a, c, d } = *self;
        move |x| a * x * x * x + c * x + d
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        (self.evaluator())(x)
    }

    /// Point above which the cubic is strictly increasing, if it has a
    /// local extremum at all
    pub fn monotone_from(&self) -> Option<f64> {
        let s = -self.c / (3.0 * self.a);
        (s > 0.0).then(|| s.sqrt())
    }
}

/// Outcome of a bisection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisection {
    /// Lower end of the final bracket
    pub root: f64,
    pub iterations: u32,
}

/// Bisect `[lo, hi]` keeping `f(lo) < 0 ≤ f(hi)` until narrower than `tolerance`
pub fn bisect<F>(f: F, mut lo: f64, mut hi: f64, tolerance: f64) -> Bisection
where
    F: Fn(f64) -> f64,
{
    let mut iterations = 0;
    while hi - lo > tolerance {
        let mid = (hi + lo) / 2.0;
        if f(mid) < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
        iterations += 1;
    }

    Bisection {
        root: lo,
        iterations,
    }
}

/// Finds the largest real root of a `Cubic` within a fixed bracket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSolver {
    /// Magnitude of the outer bracket ends
    pub bound: f64,
    /// Absolute bracket width at which bisection stops
    pub tolerance: f64,
}

impl Default for RootSolver {
    fn default() -> Self {
        Self::new(1e8, 1e-8)
    }
}

impl RootSolver {
    pub fn new(bound: f64, tolerance: f64) -> Self {
        Self { bound, tolerance }
    }

    pub fn largest_root(&self, cubic: &Cubic) -> f64 {
        debug_assert!(cubic.a > 0.0, "leading coefficient must be positive");

        let lo = cubic.monotone_from().unwrap_or(-self.bound);
        let result = bisect(cubic.evaluator(), lo, self.bound, self.tolerance);

        tracing::trace!(
            a = cubic.a,
            c = cubic.c,
            d = cubic.d,
            root = result.root,
            iterations = result.iterations,
            "Solved cubic"
        );

        result.root
    }
}
