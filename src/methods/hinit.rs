//! Compute an initial step size guess

use crate::{Float, core::ode::ODE, core::tolerance::Tolerances};

/// Compute an initial step size guess for an explicit method of order `iord`.
///
/// `f0` is the derivative at `(t, y)`. The heuristic takes one explicit Euler
/// step to estimate the second derivative and returns a step of roughly
/// `(0.01 / max(|f'|, |f|))^(1/iord)`, never larger than `hmax`. Returns the
/// step together with the number of RHS evaluations spent.
#[allow(clippy::too_many_arguments)]
pub(crate) fn hinit<F>(
    f: &F,
    t: Float,
    y: &[Float],
    p: &[Float],
    f0: &[Float],
    iord: usize,
    hmax: Float,
    tol: &Tolerances,
) -> (Float, usize)
where
    F: ODE + ?Sized,
{
    let n = y.len();
    // Zero tolerances would make every weight vanish; fall back to a unit scale.
    let scale = |i: usize, v: Float| {
        let sk = tol.weight(i, v, v);
        if sk > 0.0 { sk } else { 1.0 }
    };

    let mut dnf: Float = 0.0;
    let mut dny: Float = 0.0;
    for i in 0..n {
        let sk = scale(i, y[i]);
        dnf += (f0[i] / sk) * (f0[i] / sk);
        dny += (y[i] / sk) * (y[i] / sk);
    }

    let mut h = if dnf <= 1e-10 || dny <= 1e-10 {
        1.0e-6
    } else {
        (dny / dnf).sqrt() * 0.01
    };
    if !h.is_finite() || h <= 0.0 {
        h = 1.0e-6;
    }
    h = h.min(hmax);

    // Explicit Euler step: y1 = y + h * f0
    let y1: Vec<Float> = y.iter().zip(f0).map(|(yi, fi)| yi + h * fi).collect();
    let mut f1 = vec![0.0; n];
    f.ode(t + h, &y1, p, &mut f1);

    // Estimate second derivative
    let mut der2: Float = 0.0;
    for i in 0..n {
        let df = (f1[i] - f0[i]) / scale(i, y[i]);
        der2 += df * df;
    }
    der2 = der2.sqrt() / h;

    let der12 = der2.abs().max(dnf.sqrt());
    let h1 = if der12 <= 1.0e-15 {
        (1.0e-6 as Float).max(h * 1.0e-3)
    } else {
        (0.01 / der12).powf(1.0 / iord as Float)
    };

    let h_final = (100.0 * h).min(h1).min(hmax);
    if h_final.is_finite() && h_final > 0.0 {
        (h_final, 1)
    } else {
        (h.min(hmax), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Decay;

    impl ODE for Decay {
        fn ode(&self, _t: Float, y: &[Float], _p: &[Float], dydt: &mut [Float]) {
            dydt[0] = -y[0];
        }
    }

    #[test]
    fn guess_is_positive_and_bounded() {
        let tol = Tolerances::new(1e-8, 1e-8);
        let (h, nfev) = hinit(&Decay, 0.0, &[1.0], &[], &[-1.0], 8, 10.0, &tol);
        assert!(h > 0.0 && h <= 10.0);
        assert_eq!(nfev, 1);

        let (h_capped, _) = hinit(&Decay, 0.0, &[1.0], &[], &[-1.0], 8, 1e-4, &tol);
        assert!(h_capped <= 1e-4);
    }

    #[test]
    fn zero_tolerances_still_give_a_finite_guess() {
        let tol = Tolerances::new(0.0, 0.0);
        let (h, _) = hinit(&Decay, 0.0, &[1.0], &[], &[-1.0], 5, 1.0, &tol);
        assert!(h.is_finite() && h > 0.0);
    }
}
