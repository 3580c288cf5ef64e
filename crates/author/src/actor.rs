use crate::{EditError, out_of_range};
use rpgedit_schema::{ActorData, AnimationState, Direction, EventScript, UvFuncPoint};

/// The keyframe currently being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub state: AnimationState,
    pub direction: Direction,
    pub index: usize,
}

impl Default for Selection {
    fn default() -> Self {
        Self::select(AnimationState::Idle, Direction::Left)
    }
}

impl Selection {
    /// Select a keyframe list; the index starts over at its first point.
    pub fn select(state: AnimationState, direction: Direction) -> Self {
        Self {
            state,
            direction,
            index: 0,
        }
    }

    pub fn with_index(self, index: usize) -> Self {
        Self { index, ..self }
    }

    pub fn point(self, actor: &ActorData) -> Option<&UvFuncPoint> {
        actor.keyframes(self.state, self.direction).get(self.index)
    }
}

/// Append a keyframe to one direction's list.
///
/// The new point copies the `time` of the last existing point and covers
/// the full frame. Points are not reordered by time.
pub fn add_keyframe(actor: &ActorData, state: AnimationState, direction: Direction) -> ActorData {
    let mut next = actor.clone();
    let points = next.animation_mut(state).points_mut(direction);
    let time = points.last().map_or(0.0, |p| p.time);
    points.push(UvFuncPoint {
        time,
        ..UvFuncPoint::default()
    });
    tracing::debug!(%state, %direction, len = points.len(), "keyframe added");
    next
}

/// Replace the keyframe at `index`.
pub fn update_keyframe(
    actor: &ActorData,
    state: AnimationState,
    direction: Direction,
    index: usize,
    point: UvFuncPoint,
) -> Result<ActorData, EditError> {
    let len = actor.keyframes(state, direction).len();
    if index >= len {
        return Err(out_of_range("keyframe", index, len));
    }
    if ![point.time, point.l, point.t, point.w, point.h]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(EditError::InvalidDimension(format!(
            "keyframe ({}, {}, {}, {}, {})",
            point.time, point.l, point.t, point.w, point.h
        )));
    }
    let mut next = actor.clone();
    next.animation_mut(state).points_mut(direction)[index] = point;
    Ok(next)
}

/// Append a named event script and re-sort all events by name.
///
/// The sort is stable, so a new event lands after existing ones that share
/// its name.
pub fn add_event(
    actor: &ActorData,
    name: impl Into<String>,
    code: impl Into<String>,
) -> Result<ActorData, EditError> {
    let name = name.into();
    if name.is_empty() {
        return Err(EditError::InvalidName);
    }
    let mut next = actor.clone();
    next.events.push(EventScript {
        name,
        code: code.into(),
    });
    next.events.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(next)
}

/// Replace the code of `events[index]`.
pub fn edit_event_code(
    actor: &ActorData,
    index: usize,
    code: impl Into<String>,
) -> Result<ActorData, EditError> {
    if index >= actor.events.len() {
        return Err(out_of_range("event", index, actor.events.len()));
    }
    let mut next = actor.clone();
    next.events[index].code = code.into();
    Ok(next)
}

pub fn set_image(actor: &ActorData, image: impl Into<String>) -> ActorData {
    ActorData {
        image: image.into(),
        ..actor.clone()
    }
}

/// Set the pixel footprint of one animation frame.
pub fn set_frame_size(actor: &ActorData, width: f64, height: f64) -> Result<ActorData, EditError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(width) || !valid(height) {
        return Err(EditError::InvalidDimension(format!("frame {width}x{height}")));
    }
    Ok(ActorData {
        width,
        height,
        ..actor.clone()
    })
}
