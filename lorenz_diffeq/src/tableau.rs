/// Coefficients of an explicit Runge-Kutta method.
///
/// `a` is strictly lower triangular, `c[s]` is the time fraction of stage `s`
/// and `b` holds the weights used to combine the stages into the step.
pub struct ButcherTableau<const STAGES: usize> {
    pub a: [[f64; STAGES]; STAGES],
    pub b: [f64; STAGES],
    pub c: [f64; STAGES],
    pub order: usize,
}

impl ButcherTableau<4> {
    // usage is ButcherTableau::<4>::RK4
    pub const RK4: Self = Self {
        a: [
            [0., 0., 0., 0.],
            [1. / 2., 0., 0., 0.],
            [0., 1. / 2., 0., 0.],
            [0., 0., 1., 0.],
        ],
        b: [1. / 6., 1. / 3., 1. / 3., 1. / 6.],
        c: [0., 1.0 / 2.0, 1.0 / 2.0, 1.0],
        order: 4,
    };
}

impl ButcherTableau<7> {
    // usage is ButcherTableau::<7>::DORMANDPRINCE5
    // the embedded 4th order weights are left out since the step is never adapted
    pub const DORMANDPRINCE5: Self = Self {
        a: [
            [0., 0., 0., 0., 0., 0., 0.],
            [1. / 5., 0., 0., 0., 0., 0., 0.],
            [3. / 40., 9. / 40., 0., 0., 0., 0., 0.],
            [44. / 45., -56. / 15., 32. / 9., 0., 0., 0., 0.],
            [
                19372. / 6561.,
                -25360. / 2187.,
                64448. / 6561.,
                -212. / 729.,
                0.,
                0.,
                0.,
            ],
            [
                9017. / 3168.,
                -355. / 33.,
                46732. / 5247.,
                49. / 176.,
                -5103. / 18656.,
                0.,
                0.,
            ],
            [
                35. / 384.,
                0.,
                500. / 1113.,
                125. / 192.,
                -2187. / 6784.,
                11. / 84.,
                0.,
            ],
        ],
        b: [
            35. / 384.,
            0.,
            500. / 1113.,
            125. / 192.,
            -2187. / 6784.,
            11. / 84.,
            0.,
        ],
        c: [0., 1. / 5., 3. / 10., 4. / 5., 8. / 9., 1.0, 1.0],
        order: 5,
    };
}

impl<const STAGES: usize> ButcherTableau<STAGES> {
    /// Number of leading stages that contribute to the step.
    ///
    /// Trailing stages with zero weight only exist for error estimation, so the
    /// fixed-step solver can skip evaluating them.
    pub fn active_stages(&self) -> usize {
        self.b
            .iter()
            .rposition(|b| *b != 0.0)
            .map_or(0, |i| i + 1)
    }
}
