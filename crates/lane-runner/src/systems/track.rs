//! Track: sections scrolling towards the player and recycled ahead of it.

use log::{debug, info};

use crate::api::error::ConfigError;
use crate::api::game::EngineContext;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::config::TrackSettings;
use crate::components::entity::Entity;
use glam::Vec3;

pub const SECTION_TAG: &str = "section";

pub struct Track {
    settings: TrackSettings,
    sections: Vec<EntityId>,
}

impl Track {
    pub fn new(settings: TrackSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            sections: Vec::new(),
        })
    }

    /// Lay the sections end to end, the first one centred on `player_z`.
    pub fn spawn(&mut self, ctx: &mut EngineContext, player_z: f32) {
        for i in 0..self.settings.section_count {
            let id = ctx.next_id();
            let z = player_z + self.settings.section_length * i as f32;
            ctx.spawn(
                Entity::new(id)
                    .with_tag(SECTION_TAG)
                    .with_pos(Vec3::new(0.0, 0.0, z)),
            );
            self.sections.push(id);
        }
        info!(
            "track spawned: {} sections of length {}",
            self.settings.section_count, self.settings.section_length
        );
    }

    pub fn sections(&self) -> &[EntityId] {
        &self.sections
    }

    /// Total length of the loop.
    pub fn loop_length(&self) -> f32 {
        self.settings.section_length * self.settings.section_count as f32
    }

    /// Scroll every section towards the player by `speed * dt` and move the
    /// ones fully behind the player to the front.
    ///
    /// Negative speeds (possible for a moment after a debug nudge) hold the
    /// track still; sections never scroll away from the player.
    pub fn update(&mut self, ctx: &mut EngineContext, speed: f32, dt: f32, player_z: f32) {
        let scroll = speed.max(0.0) * dt;
        if !(scroll.is_finite() && scroll > 0.0) {
            if !scroll.is_finite() {
                debug!("track held: scroll {} for speed {} is not finite", scroll, speed);
            }
            return;
        }
        let half = self.settings.section_length * 0.5;
        let loop_length = self.loop_length();

        for &id in &self.sections {
            let Some(section) = ctx.scene.get_mut(id) else {
                continue;
            };
            section.pos.z -= scroll;

            // Far edge relative to the player; negative once passed. The
            // section jumps forward by whole loops in one step.
            let edge = section.pos.z + half - player_z;
            if edge < 0.0 {
                section.pos.z = player_z - half + edge.rem_euclid(loop_length);
                debug!("section {:?} recycled to z={:.2}", id, section.pos.z);
                ctx.events.push(GameEvent::SectionRecycled { section: id });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(ctx: &mut EngineContext) -> Track {
        let mut track = Track::new(TrackSettings {
            section_length: 10.0,
            section_count: 3,
        })
        .unwrap();
        track.spawn(ctx, 0.0);
        track
    }

    fn z_of(ctx: &EngineContext, track: &Track) -> Vec<f32> {
        track
            .sections()
            .iter()
            .map(|&id| ctx.scene.get(id).unwrap().pos.z)
            .collect()
    }

    #[test]
    fn sections_laid_end_to_end() {
        let mut ctx = EngineContext::new();
        let track = track(&mut ctx);
        assert_eq!(z_of(&ctx, &track), vec![0.0, 10.0, 20.0]);
        assert_eq!(ctx.scene.ids_with_tag(SECTION_TAG).len(), 3);
    }

    #[test]
    fn passed_section_moves_to_front() {
        let mut ctx = EngineContext::new();
        let mut track = track(&mut ctx);

        track.update(&mut ctx, 10.0, 0.5, 0.0);
        assert_eq!(z_of(&ctx, &track), vec![-5.0, 5.0, 15.0]);
        assert!(ctx.events.is_empty());

        track.update(&mut ctx, 10.0, 0.5, 0.0);
        assert_eq!(z_of(&ctx, &track), vec![20.0, 0.0, 10.0]);
        assert_eq!(
            ctx.events,
            vec![GameEvent::SectionRecycled { section: track.sections()[0] }]
        );
    }

    #[test]
    fn long_tick_recycles_by_whole_loops() {
        let mut ctx = EngineContext::new();
        let mut track = track(&mut ctx);

        // 65 units: every section passes the player, the first by two loops.
        track.update(&mut ctx, 65.0, 1.0, 0.0);
        assert_eq!(z_of(&ctx, &track), vec![-5.0, 5.0, 15.0]);
        assert_eq!(ctx.events.len(), 3);
    }

    #[test]
    fn huge_speed_returns_with_sections_ahead() {
        let mut ctx = EngineContext::new();
        let mut track = track(&mut ctx);

        track.update(&mut ctx, 1e30, 1.0 / 60.0, 0.0);

        for z in z_of(&ctx, &track) {
            assert!(z.is_finite());
            assert!(z + 5.0 >= 0.0, "section left behind at z={}", z);
            assert!(z <= 30.0, "section beyond the loop at z={}", z);
        }
    }

    #[test]
    fn non_finite_speed_holds_the_track() {
        let mut ctx = EngineContext::new();
        let mut track = track(&mut ctx);

        track.update(&mut ctx, f32::INFINITY, 0.5, 0.0);
        track.update(&mut ctx, f32::NAN, 0.5, 0.0);

        assert_eq!(z_of(&ctx, &track), vec![0.0, 10.0, 20.0]);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn negative_speed_holds_the_track() {
        let mut ctx = EngineContext::new();
        let mut track = track(&mut ctx);

        track.update(&mut ctx, -8.0, 0.5, 0.0);

        assert_eq!(z_of(&ctx, &track), vec![0.0, 10.0, 20.0]);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn zero_sections_rejected() {
        let result = Track::new(TrackSettings {
            section_length: 10.0,
            section_count: 0,
        });
        assert!(matches!(result, Err(ConfigError::NoSections)));
    }
}
