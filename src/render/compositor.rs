use crate::{
    foundation::error::RigResult,
    rig::model::PartId,
    render::surface::Surface,
    solve::transform::PlacementSet,
};

/// Blit placements onto `surface` strictly in `render_order` (back to front).
///
/// Ids without a placement this frame are skipped. Returns the number of parts drawn.
pub fn composite<S: Surface + ?Sized>(
    render_order: &[PartId],
    placements: &PlacementSet,
    surface: &mut S,
) -> RigResult<usize> {
    let mut drawn = 0;
    for id in render_order {
        let Some(placement) = placements.get(*id) else {
            tracing::trace!(part = %id, "no placement this frame");
            continue;
        };
        surface.blit(&placement.image, placement.top_left)?;
        drawn += 1;
    }
    Ok(drawn)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
