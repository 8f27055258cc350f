use bisect_core::errors::BisectError;
use bisect_core::rng::{RngHandle, BAD_PLACEMENT_STREAM};
use bisect_core::{GenConfig, GOOD_MARKER};
use rand::seq::index;

use crate::session::Session;

/// Builds a synthetic session with `num_bad` planted culprits.
///
/// Objects are [`GOOD_MARKER`] except at `num_bad` distinct seeded positions,
/// which hold `bad_marker`. The working set starts as a copy of the list.
pub fn generate_session(config: &GenConfig, bad_marker: i64) -> Result<Session, BisectError> {
    config.validate()?;
    let mut rng = RngHandle::substream(config.seed, BAD_PLACEMENT_STREAM);
    let mut objects = vec![GOOD_MARKER; config.num_objects];
    for position in index::sample(&mut rng, config.num_objects, config.num_bad) {
        objects[position] = bad_marker;
    }
    Ok(Session::from_objects(objects))
}

/// Initial item list handed to a driver: every object index in order.
pub fn initial_items(session: &Session) -> Vec<usize> {
    (0..session.len()).collect()
}
