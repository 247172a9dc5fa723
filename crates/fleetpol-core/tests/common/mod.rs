use fleetpol_core::model::policy::{tag_prefix, AUTOMATED, LOCKED, LOCKED_MSG, LOCKED_USER};
use fleetpol_core::{ResourceId, ResourceMap, Set};

/// Build a resource id in the `namespace:kind/name` form collaborators use
#[allow(dead_code)]
pub fn resource(name: &str) -> ResourceId {
    ResourceId::new(format!("default:deployment/{}", name))
}

/// A locked Set with author and reason annotations
#[allow(dead_code)]
pub fn locked_set(user: &str, msg: &str) -> Set {
    Set::new()
        .add(&[LOCKED])
        .set(LOCKED_USER, user)
        .set(LOCKED_MSG, msg)
}

/// Small fleet covering each policy shape
///
/// - `frozen`: locked with annotations
/// - `auto`: automated, `app` container filtered to `glob:v1.*`
/// - `unlocked`: `locked` explicitly `"false"`
/// - `bare`: listed with an empty Set
#[allow(dead_code)]
pub fn sample_fleet() -> ResourceMap {
    ResourceMap::new()
        .with(resource("frozen"), locked_set("ops", "incident 42"))
        .with(
            resource("auto"),
            Set::new()
                .add(&[AUTOMATED])
                .set(tag_prefix("app"), "glob:v1.*"),
        )
        .with(resource("unlocked"), Set::new().set(LOCKED, "false"))
        .with(resource("bare"), Set::new())
}
