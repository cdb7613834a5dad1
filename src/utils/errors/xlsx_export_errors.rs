use thiserror::Error;

#[derive(Debug, Error)]
pub enum XlsxExportError {
    #[error("xlsx writer error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("result has {count} columns, a worksheet holds at most {max}")]
    TooManyColumns { count: usize, max: usize },

    #[error("result has {count} rows (header included), a worksheet holds at most {max}")]
    TooManyRows { count: usize, max: usize },

    // Function context (preserves typed inner error)
    #[error("{func}: {source}")]
    Context {
        func: &'static str,
        #[source]
        source: Box<XlsxExportError>,
    },
}

impl XlsxExportError {
    pub fn root(&self) -> &XlsxExportError {
        match self {
            XlsxExportError::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

pub trait ErrCtx<T> {
    fn ctx(self, func: &'static str) -> Result<T, XlsxExportError>;
}

impl<T, E> ErrCtx<T> for Result<T, E>
where
    E: Into<XlsxExportError>,
{
    fn ctx(self, func: &'static str) -> Result<T, XlsxExportError> {
        self.map_err(|e| XlsxExportError::Context {
            func,
            source: Box::new(e.into()),
        })
    }
}
