use crate::{
    error::{AppError, AppResult},
    models::{Movie, RateRequest},
};

/// Running average for one metric: `value` is the mean of exactly `count`
/// votes, each in [0, 5].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricState {
    pub value: f64,
    pub count: u32,
}

impl MetricState {
    /// Prior state for one metric. A persisted counter is used verbatim;
    /// otherwise a present value means the record predates counters and is
    /// treated as one prior vote. `fallback` stands in for the value when
    /// the record never stored one.
    fn prior(value: Option<f64>, count: Option<u32>, fallback: f64) -> Self {
        let count = count.unwrap_or(if value.is_some() { 1 } else { 0 });
        Self { value: value.unwrap_or(fallback), count }
    }

    fn apply(self, vote: f64) -> Self {
        let total = self.value * self.count as f64 + vote;
        Self { value: round1(total / (self.count + 1) as f64), count: self.count + 1 }
    }
}

/// Half-away-from-zero rounding to one decimal place.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[derive(Clone, Copy, Debug)]
pub struct Votes {
    pub gore: f64,
    pub scares: f64,
    pub jumpscares: f64,
    pub suspense: f64,
}

pub fn validate(req: &RateRequest) -> AppResult<Votes> {
    Ok(Votes {
        gore: check("gore", req.gore)?,
        scares: check("scares", req.scares)?,
        jumpscares: check("jumpscares", req.jumpscares)?,
        suspense: check("suspense", req.suspense)?,
    })
}

fn check(name: &str, vote: Option<f64>) -> AppResult<f64> {
    match vote {
        Some(v) if (0.0..=5.0).contains(&v) => Ok(v),
        _ => Err(AppError::Invalid(format!("invalid field: {name}"))),
    }
}

/// Folds one set of votes into all four metrics. Priors are read before any
/// field is written, since the suspense fallback depends on the pre-update
/// scares value.
pub fn apply_rating(movie: &mut Movie, votes: Votes) {
    let gore = MetricState::prior(movie.gore, movie.gore_count, 0.0);
    let scares = MetricState::prior(movie.scares, movie.scares_count, 0.0);
    let jumpscares = MetricState::prior(movie.jumpscares, movie.jumps_count, 0.0);
    let suspense =
        MetricState::prior(movie.suspense, movie.suspense_count, movie.scares.unwrap_or(3.0));

    let gore = gore.apply(votes.gore);
    movie.gore = Some(gore.value);
    movie.gore_count = Some(gore.count);

    let scares = scares.apply(votes.scares);
    movie.scares = Some(scares.value);
    movie.scares_count = Some(scares.count);

    let jumpscares = jumpscares.apply(votes.jumpscares);
    movie.jumpscares = Some(jumpscares.value);
    movie.jumps_count = Some(jumpscares.count);

    let suspense = suspense.apply(votes.suspense);
    movie.suspense = Some(suspense.value);
    movie.suspense_count = Some(suspense.count);
}
