//! Utility functions

/// Lowercased extension of an uploaded file name, if any.
pub fn file_extension(name: &str) -> Option<String> {
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    name.rsplit_once('.')
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Strips directory components and characters unsafe for a blob file name.
pub fn sanitize_file_name(name: &str) -> String {
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension("receipt.PDF"), Some("pdf".to_string()));
        assert_eq!(file_extension("a/b/scan.jpeg"), Some("jpeg".to_string()));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension(".hidden"), None);
    }

    #[test]
    fn sanitize_drops_path_components() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("my receipt (1).pdf"), "my_receipt__1_.pdf");
    }
}
