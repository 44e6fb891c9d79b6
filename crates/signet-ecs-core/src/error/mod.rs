use std::error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EntityOutOfBounds,
    EntityNotAlive,
    TooManyEntities,
    TooManyComponents,
    DuplicateComponent,
    MissingComponent,
    UnregisteredComponent,
    DuplicateSystem,
    UnregisteredSystem,
    SystemInUse,
    InvalidConfig,
    Other,
}

pub struct Error {
    kind: ErrorKind,
    msg: String,
    source: Option<Box<dyn error::Error + Send + Sync>>
}

impl Error {
    #[inline]
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Error {
            kind,
            msg: msg.into(),
            source: None,
        }
    }

    #[inline]
    pub fn other<E>(error: E) -> Self
    where
        E: Into<Box<dyn error::Error + Send + Sync>>
    {
        let error = error.into();

        Error {
            kind: ErrorKind::Other,
            msg: format!("{}", error),
            source: Some(error),
        }
    }

    pub fn rethrow(self, loc: &str) -> Self {
        Error {
            msg: format!("{}\n\tat {}", self.message(), loc),
            ..self
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self::new(ErrorKind::Other, value)
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self::new(ErrorKind::Other, value)
    }
}

impl std::fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::fmt::Debug for Error {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.msg)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &_)
    }
}

pub type Result<V, E=Error> = std::result::Result<V, E>;
