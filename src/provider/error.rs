use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("propagation error: {0}")]
    Propagation(String),
    #[error("invalid position: altitude {altitude_deg} deg, azimuth {azimuth_deg} deg")]
    InvalidPosition { altitude_deg: f64, azimuth_deg: f64 },
    #[error("invalid tle format")]
    InvalidTleFormat,
    #[error("invalid tle: {0}")]
    InvalidTle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
}
