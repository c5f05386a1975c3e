use crate::codec::CodecError;
use crate::sierra::binary::BinaryDecodeError;

/// Errors that can occur while reading a SierraECG document
#[derive(Debug, thiserror::Error)]
pub enum SierraError {
    /// Document type or version is not one this crate understands
    #[error("Files of type {doc_type} {doc_ver} are unsupported")]
    UnsupportedFormat {
        /// Value of `documentinfo/documenttype`
        doc_type: String,
        /// Value of `documentinfo/documentversion`
        doc_ver: String,
    },

    /// Declared payload `dataencoding` is not recognized
    #[error("Waveform data encoding unsupported: {0}")]
    UnsupportedEncoding(String),

    /// Declared waveform compression method is not recognized
    #[error("Waveform data compression algorithm unsupported: {0}")]
    UnsupportedCompression(String),

    /// Required XML element is missing
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// Required XML attribute is missing
    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Element the attribute was looked up on
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// Text or attribute value could not be interpreted as a number
    #[error("Invalid value for {field}: '{value}'")]
    InvalidValue {
        /// Element or attribute the value came from
        field: String,
        /// Offending raw value
        value: String,
    },

    /// Compression codec returned a different number of leads than labelled
    #[error("Codec returned {actual} leads, expected {expected}")]
    LeadCountMismatch {
        /// Number of resolved lead labels
        expected: usize,
        /// Number of sequences returned by the codec
        actual: usize,
    },

    /// A decoded lead does not hold `duration * samplingrate / 1000` samples
    #[error("Lead {label} has {actual} samples, expected {expected}")]
    LeadLength {
        /// Lead label
        label: String,
        /// Sample count derived from the geometry
        expected: usize,
        /// Sample count actually decoded
        actual: usize,
    },

    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// I/O error while reading the document
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// UTF-8 encoding error in element or attribute names
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// Error decoding the binary waveform payload
    #[error("Binary decode error: {0}")]
    BinaryError(#[from] BinaryDecodeError),

    /// Error raised by the waveform compression codec
    #[error("Codec error: {0}")]
    CodecError(#[from] CodecError),
}

impl SierraError {
    /// Whether this error belongs to the "unsupported format" family: an
    /// unknown document type/version, payload encoding or compression method.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(
            self,
            SierraError::UnsupportedFormat { .. }
                | SierraError::UnsupportedEncoding(_)
                | SierraError::UnsupportedCompression(_)
        )
    }

    pub(crate) fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        SierraError::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}
