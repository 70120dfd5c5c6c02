//! Plugin descriptor (`.uplugin`) reading

use crate::application::session::FileSystemProvider;
use serde::Deserialize;
use std::path::Path;

use super::error::PakError;

/// The fields of a plugin descriptor the packager reports on
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PluginDescriptor {
    pub friendly_name: String,
    pub version_name: String,
    pub can_contain_content: bool,
}

impl PluginDescriptor {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        // Editors save descriptors with a BOM now and then
        serde_json::from_str(content.trim_start_matches('\u{feff}'))
    }

    pub fn load(fs: &dyn FileSystemProvider, path: &Path) -> Result<Self, PakError> {
        let content = fs
            .read_to_string(path)
            .map_err(|e| PakError::config(path, format!("cannot read plugin descriptor: {e}")))?;
        Self::parse(&content)
            .map_err(|e| PakError::config(path, format!("invalid plugin descriptor: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session_mocks::MockFileSystemProvider;

    #[test]
    fn test_parses_known_fields_and_ignores_others() {
        let descriptor = PluginDescriptor::parse(
            r#"{
                "FileVersion": 3,
                "FriendlyName": "My Mod",
                "VersionName": "1.2",
                "CanContainContent": true,
                "Modules": []
            }"#,
        )
        .unwrap();

        assert_eq!(descriptor.friendly_name, "My Mod");
        assert_eq!(descriptor.version_name, "1.2");
        assert!(descriptor.can_contain_content);
    }

    #[test]
    fn test_missing_fields_default() {
        let descriptor = PluginDescriptor::parse("\u{feff}{}").unwrap();
        assert_eq!(descriptor, PluginDescriptor::default());
    }

    #[test]
    fn test_unparsable_descriptor_is_configuration_error() {
        let fs = MockFileSystemProvider::new().with_file("/p/MyMod.uplugin", "not json");
        let err = PluginDescriptor::load(&fs, Path::new("/p/MyMod.uplugin")).unwrap_err();
        assert_eq!(err.kind(), crate::ugc::PakErrorKind::InvalidConfiguration);
    }
}
