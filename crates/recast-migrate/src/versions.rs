//! Version-upgrade strategy selector.
//!
//! Maps a requested target version to a composite recipe. Three
//! curated bundles exist (11, 17, 21); every other integer falls back
//! to the generic version-token rewrite with its two build-dialect
//! children.

use std::time::Duration;

use recast_core::config::Base64Config;
use recast_core::errors::TransformError;
use recast_core::recipe::{CompositeRecipe, Recipe};

use crate::rules::{
    FixReflectiveAccess, MigrateSequencedCollections, PackageRename, RemoveDeprecatedApis,
    UpgradeJavaVersion, UseJavaUtilBase64,
};

/// Build the recipe for a target Java version.
pub fn select_recipe(
    target_version: u32,
    base64: &Base64Config,
) -> Result<Box<dyn Recipe>, TransformError> {
    match target_version {
        11 => Ok(Box::new(java_8_to_11(base64)?)),
        17 => Ok(Box::new(upgrade_to_17(base64)?)),
        21 => Ok(Box::new(upgrade_to_21(base64)?)),
        other => Ok(Box::new(UpgradeJavaVersion::new(other)?)),
    }
}

fn base64_rule(config: &Base64Config) -> Result<UseJavaUtilBase64, TransformError> {
    UseJavaUtilBase64::new(&config.legacy_package, config.use_mime_coder)
}

fn java_8_to_11(base64: &Base64Config) -> Result<CompositeRecipe, TransformError> {
    Ok(CompositeRecipe::new(
        "Migrate from Java 8 to Java 11",
        "Migrates Java 8 applications to Java 11: build versions, the legacy Base64 codec, \
         Java EE to Jakarta EE packages, and deprecated APIs.",
        Duration::from_secs(30 * 60),
        vec![
            Box::new(UpgradeJavaVersion::new(11)?),
            Box::new(base64_rule(base64)?),
            Box::new(PackageRename::jakarta()?),
            Box::new(RemoveDeprecatedApis),
        ],
    ))
}

fn upgrade_to_17(base64: &Base64Config) -> Result<CompositeRecipe, TransformError> {
    Ok(CompositeRecipe::new(
        "Upgrade to Java 17",
        "Upgrades applications to Java 17: build versions, the legacy Base64 codec, and \
         illegal reflective access.",
        Duration::from_secs(20 * 60),
        vec![
            Box::new(UpgradeJavaVersion::new(17)?),
            Box::new(base64_rule(base64)?),
            Box::new(FixReflectiveAccess),
        ],
    ))
}

fn upgrade_to_21(base64: &Base64Config) -> Result<CompositeRecipe, TransformError> {
    Ok(CompositeRecipe::new(
        "Upgrade to Java 21",
        "Upgrades applications to Java 21: everything in the Java 17 upgrade plus sequenced \
         collections.",
        Duration::from_secs(15 * 60),
        vec![
            Box::new(UpgradeJavaVersion::new(21)?),
            Box::new(base64_rule(base64)?),
            Box::new(FixReflectiveAccess),
            Box::new(MigrateSequencedCollections),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_bundles() {
        let base64 = Base64Config::default();
        let r11 = select_recipe(11, &base64).unwrap();
        assert_eq!(r11.display_name(), "Migrate from Java 8 to Java 11");
        assert_eq!(r11.children().len(), 4);

        let r17 = select_recipe(17, &base64).unwrap();
        assert_eq!(r17.display_name(), "Upgrade to Java 17");
        assert_eq!(r17.children().len(), 3);

        let r21 = select_recipe(21, &base64).unwrap();
        assert_eq!(r21.display_name(), "Upgrade to Java 21");
        assert_eq!(r21.children().len(), 4);
    }

    #[test]
    fn test_any_other_version_falls_back_to_generic() {
        let base64 = Base64Config::default();
        for version in [8, 13, 19, 25, 99] {
            let recipe = select_recipe(version, &base64).unwrap();
            assert_eq!(recipe.display_name(), "Upgrade Java version");
            // Two dialect children for reporting granularity.
            assert_eq!(recipe.children().len(), 2);
        }
    }
}
