use crate::shape::{Field, ONE, STRING, Shape, ZERO};
use crate::{Asset, AssetKind, UnknownName};
use serde::{Deserialize, Serialize};

/// One keyframe of a sprite animation curve.
///
/// `time` is the position within the animation cycle; `(l, t, w, h)` is the
/// UV rectangle sampled at that time, as fractions of the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvFuncPoint {
    pub time: f64,
    pub l: f64,
    pub t: f64,
    pub w: f64,
    pub h: f64,
}

impl Default for UvFuncPoint {
    fn default() -> Self {
        Self {
            time: 0.0,
            l: 0.0,
            t: 0.0,
            w: 1.0,
            h: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Which animation an actor is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationState {
    Idle,
    Moving,
}

impl AnimationState {
    pub const ALL: [AnimationState; 2] = [AnimationState::Idle, AnimationState::Moving];

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Moving => "moving",
        }
    }
}

impl std::fmt::Display for AnimationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnimationState {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimationState::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Per-direction keyframe lists of one animation.
///
/// Every list holds at least one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvFunc {
    pub left: Vec<UvFuncPoint>,
    pub right: Vec<UvFuncPoint>,
    pub up: Vec<UvFuncPoint>,
    pub down: Vec<UvFuncPoint>,
}

impl Default for UvFunc {
    fn default() -> Self {
        Self {
            left: vec![UvFuncPoint::default()],
            right: vec![UvFuncPoint::default()],
            up: vec![UvFuncPoint::default()],
            down: vec![UvFuncPoint::default()],
        }
    }
}

impl UvFunc {
    pub fn points(&self, direction: Direction) -> &[UvFuncPoint] {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }

    pub fn points_mut(&mut self, direction: Direction) -> &mut Vec<UvFuncPoint> {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }
}

/// A named script attached to an actor. Names need not be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventScript {
    pub name: String,
    pub code: String,
}

/// A sprite actor: sheet, frame footprint, two animations and event scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorData {
    pub image: String,
    /// Pixel width of one animation frame.
    pub width: f64,
    /// Pixel height of one animation frame.
    pub height: f64,
    pub idle: UvFunc,
    pub moving: UvFunc,
    pub events: Vec<EventScript>,
}

pub const DEFAULT_FRAME_SIZE: f64 = 48.0;

impl Default for ActorData {
    fn default() -> Self {
        Self {
            image: String::new(),
            width: DEFAULT_FRAME_SIZE,
            height: DEFAULT_FRAME_SIZE,
            idle: UvFunc::default(),
            moving: UvFunc::default(),
            events: Vec::new(),
        }
    }
}

impl ActorData {
    pub fn animation(&self, state: AnimationState) -> &UvFunc {
        match state {
            AnimationState::Idle => &self.idle,
            AnimationState::Moving => &self.moving,
        }
    }

    pub fn animation_mut(&mut self, state: AnimationState) -> &mut UvFunc {
        match state {
            AnimationState::Idle => &mut self.idle,
            AnimationState::Moving => &mut self.moving,
        }
    }

    pub fn keyframes(&self, state: AnimationState, direction: Direction) -> &[UvFuncPoint] {
        self.animation(state).points(direction)
    }
}

pub static UV_FUNC_POINT: Shape = Shape::Object {
    fields: &[
        Field {
            name: "time",
            shape: &ZERO,
        },
        Field {
            name: "l",
            shape: &ZERO,
        },
        Field {
            name: "t",
            shape: &ZERO,
        },
        Field {
            name: "w",
            shape: &ONE,
        },
        Field {
            name: "h",
            shape: &ONE,
        },
    ],
};

static KEYFRAMES: Shape = Shape::Array {
    item: &UV_FUNC_POINT,
    non_empty: true,
};

pub static UV_FUNC: Shape = Shape::Object {
    fields: &[
        Field {
            name: "left",
            shape: &KEYFRAMES,
        },
        Field {
            name: "right",
            shape: &KEYFRAMES,
        },
        Field {
            name: "up",
            shape: &KEYFRAMES,
        },
        Field {
            name: "down",
            shape: &KEYFRAMES,
        },
    ],
};

pub static EVENT_SCRIPT: Shape = Shape::Object {
    fields: &[
        Field {
            name: "name",
            shape: &STRING,
        },
        Field {
            name: "code",
            shape: &STRING,
        },
    ],
};

static EVENTS: Shape = Shape::Array {
    item: &EVENT_SCRIPT,
    non_empty: false,
};

static FRAME_SIZE: Shape = Shape::Number {
    default: DEFAULT_FRAME_SIZE,
};

pub static ACTOR_DATA: Shape = Shape::Object {
    fields: &[
        Field {
            name: "image",
            shape: &STRING,
        },
        Field {
            name: "width",
            shape: &FRAME_SIZE,
        },
        Field {
            name: "height",
            shape: &FRAME_SIZE,
        },
        Field {
            name: "idle",
            shape: &UV_FUNC,
        },
        Field {
            name: "moving",
            shape: &UV_FUNC,
        },
        Field {
            name: "events",
            shape: &EVENTS,
        },
    ],
};

impl Asset for ActorData {
    const KIND: AssetKind = AssetKind::Actor;

    fn shape() -> &'static Shape {
        &ACTOR_DATA
    }
}
