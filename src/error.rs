use thiserror::Error;

pub type TooltipResult<T> = Result<T, TooltipError>;

#[derive(Debug, Error)]
pub enum TooltipError {
    #[error("invalid plot area: width={width}, height={height}")]
    InvalidPlotArea { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
