//! Concrete rewrite rules.

pub mod base64;
pub mod followups;
pub mod package_rename;
pub mod upgrade_version;

pub use base64::UseJavaUtilBase64;
pub use followups::{FixReflectiveAccess, MigrateSequencedCollections, RemoveDeprecatedApis};
pub use package_rename::PackageRename;
pub use upgrade_version::{
    BuildDialect, UpdateGradleCompatibility, UpdateMavenCompilerPlugin, UpgradeJavaVersion,
};
