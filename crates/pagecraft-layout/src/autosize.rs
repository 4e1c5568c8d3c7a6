// crates/pagecraft-layout/src/autosize.rs
use glam::DVec2;
use pagecraft_core::{Component, ComponentId, ComponentTree, Dimension, Position};
use tracing::debug;

use crate::{Bounds, ConstraintBox, LayoutConfig};

/// How a container has to change to enclose its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerFit {
    /// Added to every child's position. Zero unless a child sat at a negative
    /// coordinate.
    pub offset: DVec2,
    pub size: DVec2,
}

/// Fit for a container's direct children, `None` when there are none.
///
/// Only explicit pixel sizes count; `auto` children contribute their position
/// alone. The box is anchored at the container's content origin, so the
/// result always encloses every child plus padding on both sides.
pub fn fit_children(children: &[Component], config: &LayoutConfig) -> Option<ContainerFit> {
    let bounds = children
        .iter()
        .map(|child| Bounds::of_component(child, 0.0))
        .reduce(|acc, next| acc.union(&next))?;

    let padding = config.container_padding;
    let offset = if bounds.min.x < 0.0 || bounds.min.y < 0.0 {
        DVec2::new(
            (padding - bounds.min.x).max(0.0),
            (padding - bounds.min.y).max(0.0),
        )
    } else {
        DVec2::ZERO
    };

    let max = (bounds.max + offset).ceil();
    let minimum = ConstraintBox::with_min_size(config.container_min_size.x, config.container_min_size.y);
    let size = minimum.constrain(max + DVec2::splat(padding * 2.0));

    Some(ContainerFit { offset, size })
}

/// Resizes `container_id` to bound its direct children, shifting them first
/// if any has a negative coordinate.
///
/// One level only: neither grandchildren nor the container's own parent are
/// touched. Returns `None` (and changes nothing) for unknown ids, leaf types
/// and empty containers.
pub fn recalc_container(
    tree: &mut ComponentTree,
    container_id: &ComponentId,
    config: &LayoutConfig,
) -> Option<ContainerFit> {
    let Some(container) = tree.find_mut(container_id) else {
        debug!("Auto-size skipped, {} no longer exists", container_id);
        return None;
    };
    if !container.is_container() {
        return None;
    }

    let fit = fit_children(container.children(), config)?;

    if fit.offset != DVec2::ZERO {
        for child in container.children.iter_mut().flatten() {
            child.position = Some(Position::from(child.position().to_vec2() + fit.offset));
        }
    }

    container.width = Some(Dimension::pixels(fit.size.x));
    container.height = Some(Dimension::pixels(fit.size.y));

    debug!(
        "Auto-sized {} to {}x{} (offset {:?})",
        container_id, fit.size.x, fit.size.y, fit.offset
    );
    Some(fit)
}
