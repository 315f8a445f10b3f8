//! Asymmetric stransverse mass by bisection
//!
//! For a trial parent mass M every decay hypothesis (visible daughter
//! plus invisible daughter of known mass) confines the invisible
//! transverse momentum to the interior of a conic section. M_T2 is the
//! smallest M for which the two conics, one expressed in terms of the
//! other through the missing transverse momentum constraint, overlap.
//!
//! The overlap test uses the characteristic polynomial det(λA + B) of
//! the two conic matrices: the conics are separated if and only if it
//! has two distinct positive roots. See
//! C.G. Lester, B. Nachman, [arXiv:1411.4312](https://arxiv.org/abs/1411.4312).
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Transverse kinematics of a visible daughter
#[derive(Deserialize, Serialize, Copy, Clone, Debug, Default, PartialEq)]
pub struct Transverse {
    /// Mass
    pub m: f64,
    pub px: f64,
    pub py: f64,
}

impl Transverse {
    pub fn new(m: f64, px: f64, py: f64) -> Self {
        Self { m, px, py }
    }

    fn pt_sq(&self) -> f64 {
        self.px * self.px + self.py * self.py
    }

    fn scaled(self, factor: f64) -> Self {
        Self::new(self.m * factor, self.px * factor, self.py * factor)
    }
}

/// Input for the stransverse mass
#[derive(Deserialize, Serialize, Copy, Clone, Debug, Default, PartialEq)]
pub struct Mt2Input {
    /// The two visible daughters
    pub visible: [Transverse; 2],
    /// Missing transverse momentum (x, y)
    pub missing: [f64; 2],
    /// Assumed masses of the two invisible daughters
    pub invisible_masses: [f64; 2],
}

/// The stransverse mass M_T2
pub fn mt2(input: &Mt2Input) -> f64 {
    mt2_squared(input).sqrt()
}

/// The square of the stransverse mass M_T2
///
/// Negative masses are replaced by their absolute values. The bisection
/// runs until the bracket can no longer be narrowed in floating-point
/// arithmetic, so the result does not depend on a precision goal.
pub fn mt2_squared(input: &Mt2Input) -> f64 {
    let Mt2Input {
        visible,
        missing,
        invisible_masses,
    } = *input;
    let all_finite = visible
        .iter()
        .flat_map(|v| [v.m, v.px, v.py])
        .chain(missing)
        .chain(invisible_masses)
        .all(f64::is_finite);
    if !all_finite {
        return f64::NAN;
    }
    let mut vis = visible.map(|v| Transverse::new(v.m.abs(), v.px, v.py));
    let mut inv = invisible_masses.map(f64::abs);
    // the second hypothesis is the one with the larger mass threshold
    if vis[0].m + inv[0] > vis[1].m + inv[1] {
        vis.swap(0, 1);
        inv.swap(0, 1);
    }
    let m_min = vis[1].m + inv[1];

    let scale_sq = (vis[0].m * vis[0].m
        + vis[1].m * vis[1].m
        + inv[0] * inv[0]
        + inv[1] * inv[1]
        + vis[0].pt_sq()
        + vis[1].pt_sq()
        + missing[0] * missing[0]
        + missing[1] * missing[1])
        / 8.;
    if scale_sq == 0. {
        return 0.;
    }

    // at threshold the second conic shrinks to a single point
    if vis[1].m > 0. {
        let r = inv[1] / vis[1].m;
        let q = [missing[0] - r * vis[1].px, missing[1] - r * vis[1].py];
        if transverse_mass(&vis[0], inv[0], q) <= m_min {
            debug!("M_T2 at threshold {m_min}");
            return m_min * m_min;
        }
    }

    let scale = scale_sq.sqrt();
    let vis = vis.map(|v| v.scaled(1. / scale));
    let inv = inv.map(|m| m / scale);
    let missing = missing.map(|p| p / scale);
    let mut lower = m_min / scale;
    let mut upper = upper_bound(&vis, &inv, missing);
    debug!("M_T2 bracket [{}, {}]", lower * scale, upper * scale);

    if upper > lower {
        let conics = Conics::new(&vis, &inv, missing);
        loop {
            let trial = 0.5 * (lower + upper);
            if trial <= lower || trial >= upper {
                break;
            }
            if conics.are_disjoint(trial) {
                lower = trial;
            } else {
                upper = trial;
            }
        }
    }
    trace!("M_T2 = {}", upper * scale);
    upper * upper * scale_sq
}

/// Transverse mass of a visible daughter and an invisible daughter of
/// mass `m_inv` and transverse momentum `q`
pub fn transverse_mass(vis: &Transverse, m_inv: f64, q: [f64; 2]) -> f64 {
    let et_vis = (vis.m * vis.m + vis.pt_sq()).sqrt();
    let et_inv = (m_inv * m_inv + q[0] * q[0] + q[1] * q[1]).sqrt();
    let mt_sq = vis.m * vis.m + m_inv * m_inv
        + 2. * (et_vis * et_inv - vis.px * q[0] - vis.py * q[1]);
    mt_sq.max(0.).sqrt()
}

// any split of the missing momentum gives an upper bound
fn upper_bound(vis: &[Transverse; 2], inv: &[f64; 2], missing: [f64; 2]) -> f64 {
    let mut candidates = vec![
        [0.5 * missing[0], 0.5 * missing[1]],
        [0., 0.],
        missing,
    ];
    if vis[0].m > 0. {
        let r = inv[0] / vis[0].m;
        candidates.push([r * vis[0].px, r * vis[0].py]);
    }
    if vis[1].m > 0. {
        let r = inv[1] / vis[1].m;
        candidates.push([missing[0] - r * vis[1].px, missing[1] - r * vis[1].py]);
    }
    candidates
        .into_iter()
        .map(|q| {
            let q2 = [missing[0] - q[0], missing[1] - q[1]];
            transverse_mass(&vis[0], inv[0], q).max(transverse_mass(&vis[1], inv[1], q2))
        })
        .fold(f64::INFINITY, f64::min)
}

type Matrix = [[f64; 3]; 3];

struct Conics {
    vis: [Transverse; 2],
    inv: [f64; 2],
    missing: [f64; 2],
}

impl Conics {
    fn new(vis: &[Transverse; 2], inv: &[f64; 2], missing: [f64; 2]) -> Self {
        Self {
            vis: *vis,
            inv: *inv,
            missing,
        }
    }

    fn are_disjoint(&self, m: f64) -> bool {
        let a = conic(&self.vis[0], self.inv[0], m);
        let b = conic(&self.vis[1], self.inv[1], m);
        // express the second conic in terms of q_1 = p_miss - q_2
        let t = [
            [-1., 0., self.missing[0]],
            [0., -1., self.missing[1]],
            [0., 0., 1.],
        ];
        let b = mul(&transpose(&t), &mul(&b, &t));
        let coeff = [
            det(&a),
            trace_of_product(&adjugate(&a), &b),
            trace_of_product(&a, &adjugate(&b)),
            det(&b),
        ];
        has_two_distinct_positive_roots(coeff)
    }
}

// interior of the conic is where (q_x, q_y, 1) C (q_x, q_y, 1)^T <= 0
fn conic(vis: &Transverse, m_inv: f64, m: f64) -> Matrix {
    let Transverse { m: m_vis, px, py } = *vis;
    let m_vis_sq = m_vis * m_vis;
    let et_sq = m_vis_sq + px * px + py * py;
    let k = m * m - m_vis_sq - m_inv * m_inv;
    [
        [m_vis_sq + py * py, -px * py, -0.5 * k * px],
        [-px * py, m_vis_sq + px * px, -0.5 * k * py],
        [-0.5 * k * px, -0.5 * k * py, et_sq * m_inv * m_inv - 0.25 * k * k],
    ]
}

fn has_two_distinct_positive_roots(coeff: [f64; 4]) -> bool {
    let norm = coeff.iter().fold(0., |acc: f64, c| acc.max(c.abs()));
    if norm == 0. {
        return false;
    }
    let [a, b, c, d] = coeff.map(|c| c / norm);
    if d == 0. {
        return false;
    }
    let nreal_distinct = if a == 0. {
        if b == 0. {
            return false;
        }
        if c * c - 4. * b * d > 0. {
            2
        } else {
            0
        }
    } else {
        let disc = 18. * a * b * c * d - 4. * b * b * b * d + b * b * c * c
            - 4. * a * c * c * c
            - 27. * a * a * d * d;
        if disc > 0. {
            3
        } else {
            0
        }
    };
    if nreal_distinct == 0 {
        return false;
    }
    // all roots are real and non-zero, so Descartes' rule is exact
    let signs: Vec<bool> = [a, b, c, d]
        .into_iter()
        .filter(|c| *c != 0.)
        .map(|c| c > 0.)
        .collect();
    let sign_changes = signs.windows(2).filter(|w| w[0] != w[1]).count();
    sign_changes == 2
}

fn det(m: &Matrix) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

fn adjugate(m: &Matrix) -> Matrix {
    let mut adj = [[0.; 3]; 3];
    for (i, row) in adj.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            // cofactor of m[j][i]
            let (r0, r1) = others(j);
            let (c0, c1) = others(i);
            let minor = m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0];
            *entry = if (i + j) % 2 == 0 { minor } else { -minor };
        }
    }
    adj
}

fn others(i: usize) -> (usize, usize) {
    match i {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

fn trace_of_product(a: &Matrix, b: &Matrix) -> f64 {
    (0..3)
        .flat_map(|i| (0..3).map(move |j| (i, j)))
        .map(|(i, j)| a[i][j] * b[j][i])
        .sum()
}

fn transpose(m: &Matrix) -> Matrix {
    let mut t = [[0.; 3]; 3];
    for (i, row) in m.iter().enumerate() {
        for (j, entry) in row.iter().enumerate() {
            t[j][i] = *entry;
        }
    }
    t
}

fn mul(a: &Matrix, b: &Matrix) -> Matrix {
    let mut res = [[0.; 3]; 3];
    for (i, row) in res.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn input(
        vis1: (f64, f64, f64),
        vis2: (f64, f64, f64),
        missing: [f64; 2],
        invisible_masses: [f64; 2],
    ) -> Mt2Input {
        Mt2Input {
            visible: [
                Transverse::new(vis1.0, vis1.1, vis1.2),
                Transverse::new(vis2.0, vis2.1, vis2.2),
            ],
            missing,
            invisible_masses,
        }
    }

    #[test]
    fn separated_circles() {
        // unit circles around the origin and around (3, 0)
        let a = [[1., 0., 0.], [0., 1., 0.], [0., 0., -1.]];
        let b = [[1., 0., -3.], [0., 1., 0.], [-3., 0., 8.]];
        let coeff = [
            det(&a),
            trace_of_product(&adjugate(&a), &b),
            trace_of_product(&a, &adjugate(&b)),
            det(&b),
        ];
        assert!(has_two_distinct_positive_roots(coeff));

        let b = [[1., 0., -1.], [0., 1., 0.], [-1., 0., 0.]];
        let coeff = [
            det(&a),
            trace_of_product(&adjugate(&a), &b),
            trace_of_product(&a, &adjugate(&b)),
            det(&b),
        ];
        assert!(!has_two_distinct_positive_roots(coeff));
    }

    #[test]
    fn adjugate_inverse() {
        let m = [[2., 1., 0.], [1., 3., -1.], [0., -1., 4.]];
        let adj = adjugate(&m);
        let prod = mul(&m, &adj);
        let d = det(&m);
        for (i, row) in prod.iter().enumerate() {
            for (j, entry) in row.iter().enumerate() {
                let expected = if i == j { d } else { 0. };
                assert!((entry - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn no_missing_momentum() {
        log_init();
        let input = input((10., 3., -4.), (20., -30., 1.), [0., 0.], [0., 0.]);
        assert_eq!(mt2(&input), 20.);
    }

    #[test]
    fn visibles_at_rest() {
        log_init();
        // q_1 = q_2 = p_miss / 2 balances m^2 + 2 m |q_i|
        let input = input((10., 0., 0.), (10., 0., 0.), [20., 0.], [0., 0.]);
        let expected = 300_f64.sqrt();
        let res = mt2(&input);
        assert!((res - expected).abs() < 1e-6 * expected, "{res}");
    }

    #[test]
    fn bounds_and_symmetry() {
        log_init();
        let inputs = [
            input((5., 40., 10.), (3., -20., 35.), [-15., -40.], [0., 0.]),
            input((0.1, 100., 0.), (0.2, 0., -80.), [-60., 50.], [50., 50.]),
            input((4.8, -33., 7.), (80., 21., 13.), [10., -25.], [0., 100.]),
        ];
        for input in inputs {
            let res = mt2(&input);
            let lower = (input.visible[0].m + input.invisible_masses[0])
                .max(input.visible[1].m + input.invisible_masses[1]);
            let upper = transverse_mass(
                &input.visible[0],
                input.invisible_masses[0],
                [0.5 * input.missing[0], 0.5 * input.missing[1]],
            )
            .max(transverse_mass(
                &input.visible[1],
                input.invisible_masses[1],
                [0.5 * input.missing[0], 0.5 * input.missing[1]],
            ));
            assert!(res >= lower * (1. - 1e-12), "{res} < {lower}");
            assert!(res <= upper * (1. + 1e-12), "{res} > {upper}");

            let swapped = Mt2Input {
                visible: [input.visible[1], input.visible[0]],
                missing: input.missing,
                invisible_masses: [input.invisible_masses[1], input.invisible_masses[0]],
            };
            let res_swapped = mt2(&swapped);
            assert!((res - res_swapped).abs() <= 1e-9 * res.max(1.));
        }
    }

    #[test]
    fn degenerate_input() {
        assert_eq!(mt2(&Mt2Input::default()), 0.);
        let input = input((f64::NAN, 0., 0.), (1., 0., 0.), [0., 0.], [0., 0.]);
        assert!(mt2(&input).is_nan());
    }
}
