use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("bar with x={x} appended out of order (last stored x={last_x})")]
    OutOfOrderBar { x: f64, last_x: f64 },

    #[error("transposed axes are not supported by candlestick/volume rendering")]
    TransposedAxes,

    #[error("invalid data: {0}")]
    InvalidData(String),
}
