//! CLI argument merging with config

use crate::domain::{Config, Profile};

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub profile: Option<Profile>,
    pub max_file_bytes: Option<u64>,
    pub respect_gitignore: Option<bool>,
    pub follow_symlinks: Option<bool>,
    pub extension_hint: Option<bool>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(profile) = cli.profile {
        base_config.profile = profile;
    }
    if let Some(max_file_bytes) = cli.max_file_bytes {
        base_config.max_file_bytes = max_file_bytes;
    }
    if let Some(respect_gitignore) = cli.respect_gitignore {
        base_config.respect_gitignore = respect_gitignore;
    }
    if let Some(follow_symlinks) = cli.follow_symlinks {
        base_config.follow_symlinks = follow_symlinks;
    }
    if let Some(extension_hint) = cli.extension_hint {
        base_config.extension_hint = extension_hint;
    }

    base_config
}

#[cfg(test)]
mod tests {
    use super::{merge_cli_with_config, CliOverrides};
    use crate::domain::{Config, Profile};

    #[test]
    fn cli_overrides_replace_base_values() {
        let base = Config { max_file_bytes: 100, follow_symlinks: true, ..Config::default() };

        let cli = CliOverrides {
            profile: Some(Profile::Compact),
            max_file_bytes: Some(2048),
            respect_gitignore: Some(false),
            extension_hint: Some(false),
            ..CliOverrides::default()
        };

        let merged = merge_cli_with_config(base, cli);
        assert_eq!(merged.profile, Profile::Compact);
        assert_eq!(merged.max_file_bytes, 2048);
        assert!(!merged.respect_gitignore);
        assert!(!merged.extension_hint);
        assert!(merged.follow_symlinks);
    }

    #[test]
    fn empty_overrides_keep_config() {
        let base = Config { profile: Profile::Compact, ..Config::default() };
        let merged = merge_cli_with_config(base, CliOverrides::default());
        assert_eq!(merged.profile, Profile::Compact);
        assert_eq!(merged.max_file_bytes, Config::default().max_file_bytes);
    }
}
