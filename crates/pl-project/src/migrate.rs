//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Scenario;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    while scenario.version < LATEST_VERSION {
        scenario = migrate_one_version(scenario)?;
    }
    Ok(scenario)
}

fn migrate_one_version(scenario: Scenario) -> Result<Scenario, ProjectError> {
    match scenario.version {
        0 => migrate_v0_to_v1(scenario),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

// v0 files predate the version field; the layout is unchanged.
fn migrate_v0_to_v1(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    scenario.version = 1;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unversioned_file_is_upgraded() {
        let scenario = Scenario {
            version: 0,
            ..Scenario::default()
        };
        let migrated = migrate_to_latest(scenario).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
    }

    #[test]
    fn latest_is_untouched() {
        let scenario = Scenario::default();
        assert_eq!(migrate_to_latest(scenario.clone()).unwrap(), scenario);
    }
}
