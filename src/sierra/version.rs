//! Document type and schema version gate

use log::debug;

use super::document::DocumentAccessor;
use super::SierraError;

/// Document types this crate can decode
pub const SUPPORTED_DOCUMENT_TYPES: [&str; 2] = ["SierraECG", "PhilipsECG"];

/// Schema revisions this crate can decode
pub const SUPPORTED_DOCUMENT_VERSIONS: [&str; 4] = ["1.03", "1.04", "1.04.01", "1.04.02"];

/// Validated document identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentVersion {
    /// `documentinfo/documenttype`
    pub doc_type: String,
    /// `documentinfo/documentversion`
    pub doc_ver: String,
}

impl DocumentVersion {
    /// Whether the type/version pair is on the allow-list
    pub fn is_supported(doc_type: &str, doc_ver: &str) -> bool {
        SUPPORTED_DOCUMENT_TYPES.contains(&doc_type) && SUPPORTED_DOCUMENT_VERSIONS.contains(&doc_ver)
    }
}

/// Read `documentinfo` and fail unless type and version are both supported
pub fn assert_version<D: DocumentAccessor>(root: &D) -> Result<DocumentVersion, SierraError> {
    let doc_info = root.required_child("documentinfo")?;
    let doc_type = doc_info.required_child("documenttype")?.text();
    let doc_ver = doc_info.required_child("documentversion")?.text();

    if !DocumentVersion::is_supported(doc_type, doc_ver) {
        return Err(SierraError::UnsupportedFormat {
            doc_type: doc_type.to_string(),
            doc_ver: doc_ver.to_string(),
        });
    }

    debug!("Document is {} {}", doc_type, doc_ver);
    Ok(DocumentVersion {
        doc_type: doc_type.to_string(),
        doc_ver: doc_ver.to_string(),
    })
}
