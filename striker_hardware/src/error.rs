use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("read from empty {0} queue")]
    QueueEmpty(&'static str),
    #[error("{device} fault: {message}")]
    Fault {
        device: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, HwError>;
