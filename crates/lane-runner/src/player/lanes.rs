//! Lane set and the timed lane-shift selector.

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::error::{require_positive, ConfigError};
use crate::extensions::{Easing, Tween};

/// Which way a shift request points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    /// Towards lane 0.
    Left,
    /// Towards the last lane.
    Right,
}

/// How lanes are described in config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LaneLayout {
    /// Explicit lane anchor positions, ordered left to right.
    Positions { positions: Vec<Vec3> },
    /// `count` corridors `width` apart, centred on x = 0.
    Corridors { count: usize, width: f32 },
}

impl Default for LaneLayout {
    fn default() -> Self {
        LaneLayout::Corridors {
            count: 3,
            width: 2.5,
        }
    }
}

/// Ordered, non-empty set of lane anchor positions.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneSet {
    positions: Vec<Vec3>,
}

impl LaneSet {
    pub fn new(positions: Vec<Vec3>) -> Result<Self, ConfigError> {
        if positions.is_empty() {
            return Err(ConfigError::NoLanes);
        }
        Ok(Self { positions })
    }

    /// Evenly spaced corridors on the x axis, centred on the origin.
    pub fn corridors(count: usize, width: f32) -> Result<Self, ConfigError> {
        require_positive("lane width", width)?;
        let centre = (count as f32 - 1.0) / 2.0;
        Self::new(
            (0..count)
                .map(|i| Vec3::new((i as f32 - centre) * width, 0.0, 0.0))
                .collect(),
        )
    }

    pub fn from_layout(layout: &LaneLayout) -> Result<Self, ConfigError> {
        match layout {
            LaneLayout::Positions { positions } => Self::new(positions.clone()),
            LaneLayout::Corridors { count, width } => Self::corridors(*count, *width),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    /// Neighbouring lane index in `direction`, or `None` at the boundary.
    pub fn neighbour(&self, index: usize, direction: ShiftDirection) -> Option<usize> {
        match direction {
            ShiftDirection::Left => index.checked_sub(1),
            ShiftDirection::Right => Some(index + 1).filter(|&i| i < self.len()),
        }
    }
}

/// What a selector update produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LaneStep {
    /// Position to apply this frame, when a transition is running.
    pub position: Option<Vec3>,
    /// Lane reached when a transition completed this frame.
    pub arrived: Option<usize>,
}

#[derive(Debug, Clone)]
struct Transition {
    destination: usize,
    tween: Tween,
}

/// Tracks the occupied lane and runs at most one transition at a time.
#[derive(Debug, Clone)]
pub struct LaneSelector {
    lanes: LaneSet,
    current: usize,
    duration: f32,
    easing: Easing,
    transition: Option<Transition>,
}

impl LaneSelector {
    pub fn new(
        lanes: LaneSet,
        start: usize,
        duration: f32,
        easing: Easing,
    ) -> Result<Self, ConfigError> {
        if start >= lanes.len() {
            return Err(ConfigError::StartLaneOutOfRange {
                start,
                count: lanes.len(),
            });
        }
        require_positive("transition duration", duration)?;
        Ok(Self {
            lanes,
            current: start,
            duration,
            easing,
            transition: None,
        })
    }

    /// Lane index last arrived at. Changes only when a transition completes.
    pub fn current_lane(&self) -> usize {
        self.current
    }

    pub fn lanes(&self) -> &LaneSet {
        &self.lanes
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Destination of the running transition.
    pub fn destination(&self) -> Option<usize> {
        self.transition.as_ref().map(|t| t.destination)
    }

    /// Progress of the running transition in [0, 1].
    pub fn progress(&self) -> Option<f32> {
        self.transition.as_ref().map(|t| t.tween.progress())
    }

    /// Anchor position of the current lane.
    pub fn current_position(&self) -> Vec3 {
        self.lanes.position(self.current).unwrap_or(Vec3::ZERO)
    }

    /// Start a transition one lane over. Returns the destination, or `None`
    /// when busy or already at the edge. Requests are never queued.
    pub fn request_shift(&mut self, direction: ShiftDirection) -> Option<usize> {
        if self.transition.is_some() {
            debug!("lane shift {:?} dropped: transition in progress", direction);
            return None;
        }
        let Some(destination) = self.lanes.neighbour(self.current, direction) else {
            debug!("lane shift {:?} dropped: already at lane {}", direction, self.current);
            return None;
        };

        let from = self.current_position();
        let to = self.lanes.position(destination)?;
        self.transition = Some(Transition {
            destination,
            tween: Tween::new(from, to, self.duration, self.easing),
        });
        Some(destination)
    }

    /// Advance the running transition by `dt`.
    pub fn update(&mut self, dt: f32) -> LaneStep {
        let Some(transition) = self.transition.as_mut() else {
            return LaneStep::default();
        };

        let position = transition.tween.advance(dt);
        if !transition.tween.is_complete() {
            return LaneStep {
                position: Some(position),
                arrived: None,
            };
        }

        let destination = transition.destination;
        self.current = destination;
        self.transition = None;
        LaneStep {
            position: self.lanes.position(destination),
            arrived: Some(destination),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_lanes(duration: f32) -> LaneSelector {
        LaneSelector::new(LaneSet::corridors(3, 2.5).unwrap(), 1, duration, Easing::Linear)
            .unwrap()
    }

    #[test]
    fn corridors_are_centred() {
        let lanes = LaneSet::corridors(3, 2.5).unwrap();
        assert_eq!(lanes.position(0), Some(Vec3::new(-2.5, 0.0, 0.0)));
        assert_eq!(lanes.position(1), Some(Vec3::ZERO));
        assert_eq!(lanes.position(2), Some(Vec3::new(2.5, 0.0, 0.0)));
    }

    #[test]
    fn quarter_second_frames_reach_destination_exactly() {
        let mut selector = three_lanes(1.0);
        assert_eq!(selector.request_shift(ShiftDirection::Right), Some(2));
        assert_eq!(selector.progress(), Some(0.0));

        for expected in [0.25, 0.5, 0.75] {
            let step = selector.update(0.25);
            assert_eq!(selector.progress(), Some(expected));
            assert_eq!(step.position, Some(Vec3::new(2.5 * expected, 0.0, 0.0)));
            assert_eq!(step.arrived, None);
            assert_eq!(selector.current_lane(), 1);
        }

        let step = selector.update(0.25);
        assert_eq!(step.arrived, Some(2));
        assert_eq!(step.position, Some(Vec3::new(2.5, 0.0, 0.0)));
        assert_eq!(selector.current_lane(), 2);
        assert!(!selector.is_transitioning());
    }

    #[test]
    fn requests_during_transition_are_dropped() {
        let mut selector = three_lanes(0.12);
        assert_eq!(selector.request_shift(ShiftDirection::Left), Some(0));
        assert_eq!(selector.request_shift(ShiftDirection::Right), None);
        assert_eq!(selector.request_shift(ShiftDirection::Left), None);
        assert_eq!(selector.destination(), Some(0));

        let mut last = LaneStep::default();
        for _ in 0..10 {
            let step = selector.update(1.0 / 60.0);
            if step.arrived.is_some() {
                last = step;
            }
        }
        assert_eq!(last.arrived, Some(0));
        assert_eq!(last.position, Some(Vec3::new(-2.5, 0.0, 0.0)));
        assert_eq!(selector.current_lane(), 0);
    }

    #[test]
    fn boundary_lane_ignores_outward_shift() {
        let mut selector =
            LaneSelector::new(LaneSet::corridors(2, 3.0).unwrap(), 0, 0.1, Easing::Linear).unwrap();
        assert_eq!(selector.request_shift(ShiftDirection::Left), None);
        assert!(!selector.is_transitioning());
        assert_eq!(selector.request_shift(ShiftDirection::Right), Some(1));
        selector.update(0.2);
        assert_eq!(selector.request_shift(ShiftDirection::Right), None);
    }

    #[test]
    fn explicit_positions_drive_x_and_z() {
        let lanes = LaneSet::new(vec![Vec3::new(-2.0, 0.0, 1.0), Vec3::new(2.0, 0.0, -1.0)]).unwrap();
        let mut selector = LaneSelector::new(lanes, 0, 0.5, Easing::Linear).unwrap();
        selector.request_shift(ShiftDirection::Right);
        let step = selector.update(0.25);
        assert_eq!(step.position, Some(Vec3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn invalid_setup_fails_fast() {
        assert!(matches!(LaneSet::new(vec![]), Err(ConfigError::NoLanes)));
        assert!(matches!(LaneSet::corridors(0, 2.0), Err(ConfigError::NoLanes)));
        let lanes = LaneSet::corridors(3, 2.0).unwrap();
        assert!(matches!(
            LaneSelector::new(lanes.clone(), 3, 0.1, Easing::Linear),
            Err(ConfigError::StartLaneOutOfRange { start: 3, count: 3 })
        ));
        assert!(matches!(
            LaneSelector::new(lanes, 0, 0.0, Easing::Linear),
            Err(ConfigError::NonPositive { .. })
        ));
    }

    #[test]
    fn layout_parses_both_forms() {
        let layout: LaneLayout =
            serde_json::from_str(r#"{ "kind": "corridors", "count": 5, "width": 2.0 }"#).unwrap();
        assert_eq!(LaneSet::from_layout(&layout).unwrap().len(), 5);

        let layout: LaneLayout = serde_json::from_str(
            r#"{ "kind": "positions", "positions": [[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]] }"#,
        )
        .unwrap();
        assert_eq!(
            LaneSet::from_layout(&layout).unwrap().position(1),
            Some(Vec3::new(1.0, 0.0, 0.0))
        );
    }
}
