//! Bundled configuration templates

use super::OverlayKind;
use crate::error::OverlayError;
use crate::fs::FileSystem;
use std::path::PathBuf;

/// ESLint flat config enabling only `@typescript-eslint/no-floating-promises`
pub const ESLINT_TEMPLATE: &str = include_str!("../../templates/eslint.config.mjs");

/// Minimal tsconfig giving the typed lint rules a program to work with
pub const TSCONFIG_TEMPLATE: &str = include_str!("../../templates/tsconfig.json");

/// Where the contents of an overlay file come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Compiled into the binary
    Embedded(&'static str),
    /// Read from disk at run time
    File(PathBuf),
}

impl TemplateSource {
    pub fn embedded(kind: OverlayKind) -> Self {
        match kind {
            OverlayKind::LintConfig => TemplateSource::Embedded(ESLINT_TEMPLATE),
            OverlayKind::TypeCheckConfig => TemplateSource::Embedded(TSCONFIG_TEMPLATE),
        }
    }

    /// Load the full template contents
    pub fn resolve(&self, fs: &dyn FileSystem) -> Result<Vec<u8>, OverlayError> {
        match self {
            TemplateSource::Embedded(contents) => Ok(contents.as_bytes().to_vec()),
            TemplateSource::File(path) => {
                fs.read(path)
                    .map_err(|source| OverlayError::TemplateResolve {
                        name: path.display().to_string(),
                        source,
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use std::path::Path;

    #[test]
    fn test_eslint_template_enables_rule() {
        assert!(ESLINT_TEMPLATE.contains("\"@typescript-eslint/no-floating-promises\": \"warn\""));
        assert!(ESLINT_TEMPLATE.contains("**/node_modules/**"));
        assert!(ESLINT_TEMPLATE.contains("project: true"));
    }

    #[test]
    fn test_tsconfig_template_excludes_dependencies() {
        assert!(TSCONFIG_TEMPLATE.contains("\"noEmit\": true"));
        assert!(TSCONFIG_TEMPLATE.contains("\"exclude\": [\"node_modules\"]"));
    }

    #[test]
    fn test_tsconfig_template_is_json() {
        let value: serde_json::Value = serde_json::from_str(TSCONFIG_TEMPLATE).unwrap();
        assert!(value["compilerOptions"]["allowJs"].as_bool().unwrap());
    }

    #[test]
    fn test_resolve_embedded() {
        let fs = MockFileSystem::new();
        let bytes = TemplateSource::embedded(OverlayKind::LintConfig)
            .resolve(&fs)
            .unwrap();

        assert_eq!(bytes, ESLINT_TEMPLATE.as_bytes());
    }

    #[test]
    fn test_resolve_file() {
        let fs = MockFileSystem::new();
        fs.add_file("templates/tsconfig.json", "{\"compilerOptions\": {}}");

        let bytes = TemplateSource::File(PathBuf::from("/mock/templates/tsconfig.json"))
            .resolve(&fs)
            .unwrap();

        assert_eq!(bytes, b"{\"compilerOptions\": {}}");
    }

    #[test]
    fn test_resolve_missing_file() {
        let fs = MockFileSystem::new();

        let err = TemplateSource::File(Path::new("/mock/templates/tsconfig.json").to_path_buf())
            .resolve(&fs)
            .unwrap_err();

        assert!(matches!(err, OverlayError::TemplateResolve { .. }));
        assert!(err.to_string().contains("/mock/templates/tsconfig.json"));
    }
}
