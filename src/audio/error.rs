use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AudioError {
    #[error("Audio output device error: {0}")]
    DeviceError(String),

    #[error("Invalid audio url: {0}")]
    InvalidUrl(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}
