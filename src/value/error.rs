#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyErrorCode {
    Reconstruction,
    UnsupportedShape,
}

impl std::fmt::Display for CopyErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CopyErrorCode::Reconstruction => "RECONSTRUCTION",
            CopyErrorCode::UnsupportedShape => "UNSUPPORTED_SHAPE",
        };
        write!(f, "{}", name)
    }
}

impl CopyErrorCode {
    pub fn is_fatal(self) -> bool {
        // Every copy failure aborts the whole invocation; there is no
        // partial-result mode.
        matches!(
            self,
            CopyErrorCode::Reconstruction | CopyErrorCode::UnsupportedShape
        )
    }
}

/// Error raised while copying a value graph. `class_name` identifies the
/// offending type when the failure came from object reconstruction.
#[derive(Debug, Clone)]
pub struct CopyError {
    pub message: String,
    pub code: CopyErrorCode,
    pub class_name: Option<String>,
}

impl CopyError {
    pub fn reconstruction(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: CopyErrorCode::Reconstruction,
            class_name: Some(class_name.into()),
        }
    }

    pub fn unsupported_shape(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: CopyErrorCode::UnsupportedShape,
            class_name: None,
        }
    }
}

impl std::fmt::Display for CopyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.class_name {
            Some(class_name) => {
                write!(f, "{}: {} ({})", self.code, self.message, class_name)
            }
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for CopyError {}
