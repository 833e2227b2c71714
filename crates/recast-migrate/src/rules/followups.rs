//! Advisory follow-up recipes.
//!
//! These carry display metadata and an estimated manual effort but
//! rewrite nothing: they mark work a human still owes after the
//! automated pass (reflective access, deprecated APIs, sequenced
//! collections). Bundles include them so reports stay honest about
//! the remaining effort.

use std::time::Duration;

use recast_core::errors::TransformError;
use recast_core::model::SourceFile;
use recast_core::recipe::{ExecutionContext, Recipe, Visitor};

struct IdentityVisitor;

impl Visitor for IdentityVisitor {
    fn visit(
        &self,
        file: SourceFile,
        _ctx: &mut ExecutionContext,
    ) -> Result<SourceFile, TransformError> {
        Ok(file)
    }
}

/// Illegal reflective access fixes needed from Java 17 onward.
pub struct FixReflectiveAccess;

impl Recipe for FixReflectiveAccess {
    fn display_name(&self) -> &str {
        "Fix illegal reflective access"
    }

    fn description(&self) -> &str {
        "Reflective access into JDK internals fails on Java 17 and later; affected call sites need a supported API or an explicit --add-opens."
    }

    fn estimated_effort(&self) -> Duration {
        Duration::from_secs(20 * 60)
    }

    fn visitor(&self) -> Box<dyn Visitor> {
        Box::new(IdentityVisitor)
    }
}

/// Deprecated API usage that has no mechanical replacement.
pub struct RemoveDeprecatedApis;

impl Recipe for RemoveDeprecatedApis {
    fn display_name(&self) -> &str {
        "Remove deprecated API usage"
    }

    fn description(&self) -> &str {
        "APIs deprecated between Java 8 and 11 need case-by-case replacement with their modern alternatives."
    }

    fn estimated_effort(&self) -> Duration {
        Duration::from_secs(15 * 60)
    }

    fn visitor(&self) -> Box<dyn Visitor> {
        Box::new(IdentityVisitor)
    }
}

/// Java 21 sequenced-collections adoption.
pub struct MigrateSequencedCollections;

impl Recipe for MigrateSequencedCollections {
    fn display_name(&self) -> &str {
        "Migrate to sequenced collections"
    }

    fn description(&self) -> &str {
        "Collection access patterns that Java 21 sequenced collections express directly (getFirst, getLast, reversed)."
    }

    fn estimated_effort(&self) -> Duration {
        Duration::from_secs(10 * 60)
    }

    fn visitor(&self) -> Box<dyn Visitor> {
        Box::new(IdentityVisitor)
    }
}
