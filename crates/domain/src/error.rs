#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("request failed with status {0}")]
    RequestFailed(u16),
    #[error("corrupt data: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for WriteError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => WriteError::Storage(storage),
            ReadError::Other(other) => WriteError::Other(other),
            ReadError::RequestFailed(status) => {
                WriteError::Other(format!("request failed with status {status}").into())
            }
            ReadError::Corrupt(reason) => WriteError::Other(reason.into()),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("storage unavailable")]
    Unavailable,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_from_read_error() {
        assert!(matches!(
            WriteError::from(ReadError::Storage(StorageError::Unavailable)),
            WriteError::Storage(StorageError::Unavailable)
        ));
        assert!(matches!(
            WriteError::from(ReadError::Other("foo".into())),
            WriteError::Other(error) if error.to_string() == "foo"
        ));
        assert!(matches!(
            WriteError::from(ReadError::RequestFailed(503)),
            WriteError::Other(error) if error.to_string() == "request failed with status 503"
        ));
        assert!(matches!(
            WriteError::from(ReadError::Corrupt("bad".to_string())),
            WriteError::Other(error) if error.to_string() == "bad"
        ));
    }

    #[test]
    fn test_read_error_display() {
        assert_eq!(
            ReadError::RequestFailed(404).to_string(),
            "request failed with status 404"
        );
        assert_eq!(
            ReadError::Storage(StorageError::NoConnection).to_string(),
            "no connection"
        );
    }
}
