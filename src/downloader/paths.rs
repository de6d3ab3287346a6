//! Destination path resolution for a downloaded solution.

use super::payload::DownloadPayload;
use crate::workspace::{ExerciseLocation, solution_root};
use std::path::Path;

/// Where the solution in `payload` belongs under `workspace`
///
/// The root is the workspace, narrowed to `teams/{team}` for team solutions and
/// to `users/{handle}` for solutions owned by someone other than the requester.
pub fn resolve_location(workspace: &Path, payload: &DownloadPayload) -> ExerciseLocation {
    let solution = &payload.solution;
    let root = solution_root(
        workspace,
        &solution.team.slug,
        &solution.user.handle,
        solution.user.is_requester,
    );

    ExerciseLocation::new(
        root,
        solution.exercise.track.id.clone(),
        solution.exercise.id.clone(),
    )
}
