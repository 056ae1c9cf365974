// Zoom animation for the orbit camera.
//
// A scroll notch starts a run that moves the radius a fixed distance over
// several ticks. Each tick the step is derived from whatever distance is still
// left, so even the linear law decays geometrically toward the target:
//
//   linear:    d = remaining / N
//   root:      d = remaining * (sqrt(k/N) - sqrt((k-1)/N))
//   quadratic: d = remaining * ((k/N)^2 - ((k-1)/N)^2)
//
// where N is the configured frame count and k the 1-based step index.
// The run ends once the remaining distance drops to ZOOM_STOP_THRESHOLD or the
// radius reaches a zoom limit. Only one run exists at a time; a new notch
// throws the old one away.
//
// Preconditions (not checked here): frames >= 1, 0 < min < max.

use serde::{Deserialize, Serialize};

/// Remaining distance at which a run counts as complete.
pub const ZOOM_STOP_THRESHOLD: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingKind {
    #[default]
    Linear,
    /// Large first steps that shrink quickly.
    Root,
    /// Small first steps that ramp up.
    Quadratic,
}

impl EasingKind {
    /// Distance to cover on step `frame` (1-based) given the distance still left.
    pub fn step_distance(self, remaining: f32, frame: u32, frames: u32) -> f32 {
        let n = frames as f32;
        let t1 = frame as f32 / n;
        let t0 = frame.saturating_sub(1) as f32 / n;
        match self {
            EasingKind::Linear => remaining / n,
            EasingKind::Root => remaining * (t1.sqrt() - t0.sqrt()),
            EasingKind::Quadratic => remaining * (t1 * t1 - t0 * t0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    pub fn sign(self) -> f32 {
        match self {
            ZoomDirection::In => -1.0,
            ZoomDirection::Out => 1.0,
        }
    }

    /// Wheel up zooms in. Magnitude is ignored: one event is one notch.
    pub fn from_scroll(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(ZoomDirection::In)
        } else if delta < 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
}

impl ZoomLimits {
    pub fn clamp(&self, radius: f32) -> f32 {
        radius.clamp(self.min, self.max)
    }

    pub fn contains(&self, radius: f32) -> bool {
        radius >= self.min && radius <= self.max
    }
}

/// Outcome of a single animation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomStep {
    /// Moved by the given distance; more steps follow.
    Moved(f32),
    /// Remaining distance fell under the stop threshold.
    Finished,
    /// Radius was pinned to a zoom limit; the run is over.
    BoundReached,
}

impl ZoomStep {
    pub fn is_running(self) -> bool {
        matches!(self, ZoomStep::Moved(_))
    }
}

/// One in-flight zoom run. Resumed once per tick by `step`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomAnimation {
    direction: ZoomDirection,
    remaining: f32,
    frame: u32,
    easing: EasingKind,
}

impl ZoomAnimation {
    pub fn new(direction: ZoomDirection, distance: f32, easing: EasingKind) -> Self {
        Self {
            direction,
            remaining: distance,
            frame: 1,
            easing,
        }
    }

    pub fn direction(&self) -> ZoomDirection { self.direction }
    pub fn remaining(&self) -> f32 { self.remaining }
    pub fn frame(&self) -> u32 { self.frame }
    pub fn easing(&self) -> EasingKind { self.easing }

    pub fn is_done(&self) -> bool {
        self.remaining <= ZOOM_STOP_THRESHOLD
    }

    /// Advance the run by one tick, writing the new radius in place.
    pub fn step(&mut self, radius: &mut f32, limits: ZoomLimits, frames: u32) -> ZoomStep {
        if self.is_done() {
            return ZoomStep::Finished;
        }
        if self.pin_to_limit(radius, limits) {
            return ZoomStep::BoundReached;
        }

        // Never travel further than what is left, whatever the easing law says.
        let d = self
            .easing
            .step_distance(self.remaining, self.frame, frames)
            .min(self.remaining);
        *radius += self.direction.sign() * d;
        self.remaining -= d;
        self.frame += 1;

        if self.pin_to_limit(radius, limits) {
            ZoomStep::BoundReached
        } else if self.is_done() {
            ZoomStep::Finished
        } else {
            ZoomStep::Moved(d)
        }
    }

    // Clamp onto the limit we are heading toward. Ends the run when it fires.
    fn pin_to_limit(&mut self, radius: &mut f32, limits: ZoomLimits) -> bool {
        let hit = match self.direction {
            ZoomDirection::In if *radius <= limits.min => limits.min,
            ZoomDirection::Out if *radius >= limits.max => limits.max,
            _ => return false,
        };
        *radius = hit;
        self.remaining = 0.0;
        true
    }
}

/// Owns the single active zoom run and the parameters new runs start from.
#[derive(Debug, Clone)]
pub struct ZoomAnimator {
    /// Distance covered by one scroll notch.
    pub distance: f32,
    /// Frame count N used by the easing laws.
    pub frames: u32,
    pub limits: ZoomLimits,
    pub easing: EasingKind,
    active: Option<ZoomAnimation>,
}

impl ZoomAnimator {
    pub fn new(distance: f32, frames: u32, limits: ZoomLimits, easing: EasingKind) -> Self {
        Self {
            distance,
            frames,
            limits,
            easing,
            active: None,
        }
    }

    /// Start a new run, discarding any run still in flight.
    pub fn start(&mut self, direction: ZoomDirection) {
        if let Some(old) = self.active.take() {
            log::debug!(
                "zoom run cancelled with {:.3} remaining after {} steps",
                old.remaining,
                old.frame - 1
            );
        }
        log::debug!("zoom {:?} by {} ({:?})", direction, self.distance, self.easing);
        self.active = Some(ZoomAnimation::new(direction, self.distance, self.easing));
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Advance the active run, if any. Only the radius is touched.
    pub fn step(&mut self, radius: &mut f32) -> Option<ZoomStep> {
        let run = self.active.as_mut()?;
        let outcome = run.step(radius, self.limits, self.frames);
        log::trace!("zoom step {:?} radius={:.4}", outcome, radius);
        if !outcome.is_running() {
            log::debug!("zoom run ended ({:?}) at radius {:.3}", outcome, radius);
            self.active = None;
        }
        Some(outcome)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ZoomAnimation> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: ZoomLimits = ZoomLimits { min: 1.0, max: 10.0 };

    fn animator(easing: EasingKind) -> ZoomAnimator {
        ZoomAnimator::new(3.0, 5, LIMITS, easing)
    }

    // Step until the run ends; returns the number of steps taken.
    fn run_to_end(zoom: &mut ZoomAnimator, radius: &mut f32) -> usize {
        let mut steps = 0;
        while zoom.step(radius).is_some() {
            steps += 1;
            assert!(steps < 10_000, "zoom run never terminated");
        }
        steps
    }

    #[test]
    fn scroll_sign_maps_to_direction() {
        assert_eq!(ZoomDirection::from_scroll(1.0), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_scroll(0.2), Some(ZoomDirection::In));
        assert_eq!(ZoomDirection::from_scroll(-3.0), Some(ZoomDirection::Out));
        assert_eq!(ZoomDirection::from_scroll(0.0), None);
    }

    #[test]
    fn linear_first_step_is_fraction_of_remaining() {
        let mut radius = 5.0;
        let mut run = ZoomAnimation::new(ZoomDirection::Out, 3.0, EasingKind::Linear);
        let step = run.step(&mut radius, LIMITS, 5);
        assert_eq!(step, ZoomStep::Moved(0.6));
        assert!((radius - 5.6).abs() < 1e-6);
        assert!((run.remaining() - 2.4).abs() < 1e-6);
    }

    #[test]
    fn root_and_quadratic_advance_frame_index() {
        for easing in [EasingKind::Root, EasingKind::Quadratic] {
            let mut radius = 5.0;
            let mut run = ZoomAnimation::new(ZoomDirection::Out, 3.0, easing);
            assert_eq!(run.frame(), 1);
            run.step(&mut radius, LIMITS, 5);
            run.step(&mut radius, LIMITS, 5);
            assert_eq!(run.frame(), 3);
        }
    }

    #[test]
    fn root_starts_fast_quadratic_starts_slow() {
        let root = EasingKind::Root.step_distance(3.0, 1, 5);
        let linear = EasingKind::Linear.step_distance(3.0, 1, 5);
        let quad = EasingKind::Quadratic.step_distance(3.0, 1, 5);
        assert!(root > linear);
        assert!(linear > quad);
        // sqrt(1/5) and (1/5)^2 of the remaining distance
        assert!((root - 3.0 * 0.2_f32.sqrt()).abs() < 1e-6);
        assert!((quad - 3.0 * 0.04).abs() < 1e-6);
    }

    #[test]
    fn every_easing_covers_the_full_notch() {
        for easing in [EasingKind::Linear, EasingKind::Root, EasingKind::Quadratic] {
            let mut zoom = ZoomAnimator::new(3.0, 5, ZoomLimits { min: 0.1, max: 100.0 }, easing);
            let mut radius = 5.0;
            zoom.start(ZoomDirection::Out);
            run_to_end(&mut zoom, &mut radius);
            let travelled = radius - 5.0;
            assert!(travelled <= 3.0 + 1e-4, "{easing:?} overshot: {travelled}");
            assert!(
                (travelled - 3.0).abs() <= ZOOM_STOP_THRESHOLD + 1e-4,
                "{easing:?} travelled {travelled}"
            );
        }
    }

    #[test]
    fn linear_zoom_out_from_five_lands_near_eight() {
        let mut zoom = animator(EasingKind::Linear);
        let mut radius = 5.0;
        zoom.start(ZoomDirection::Out);
        run_to_end(&mut zoom, &mut radius);
        assert!((radius - 8.0).abs() <= ZOOM_STOP_THRESHOLD + 1e-4);
        assert!(!zoom.is_active());
    }

    #[test]
    fn zoom_out_past_max_stops_exactly_at_max() {
        let mut zoom = animator(EasingKind::Linear);
        let mut radius = 8.0;
        zoom.start(ZoomDirection::Out);
        let mut last = None;
        while let Some(step) = zoom.step(&mut radius) {
            assert!(radius <= LIMITS.max);
            last = Some(step);
        }
        assert_eq!(last, Some(ZoomStep::BoundReached));
        assert_eq!(radius, 10.0);
    }

    #[test]
    fn zoom_in_at_min_ends_on_first_step() {
        let mut zoom = animator(EasingKind::Quadratic);
        let mut radius = LIMITS.min;
        zoom.start(ZoomDirection::In);
        assert_eq!(zoom.step(&mut radius), Some(ZoomStep::BoundReached));
        assert_eq!(radius, LIMITS.min);
        assert!(!zoom.is_active());
        assert_eq!(zoom.step(&mut radius), None);
    }

    #[test]
    fn zoom_out_at_min_is_not_blocked() {
        let mut zoom = animator(EasingKind::Linear);
        let mut radius = LIMITS.min;
        zoom.start(ZoomDirection::Out);
        assert!(matches!(zoom.step(&mut radius), Some(ZoomStep::Moved(_))));
        assert!(radius > LIMITS.min);
    }

    #[test]
    fn new_notch_discards_previous_run() {
        let mut zoom = ZoomAnimator::new(3.0, 5, ZoomLimits { min: 0.1, max: 100.0 }, EasingKind::Root);
        let mut radius = 5.0;
        zoom.start(ZoomDirection::Out);
        zoom.step(&mut radius);
        zoom.step(&mut radius);

        let restart_at = radius;
        zoom.start(ZoomDirection::Out);
        let fresh = zoom.active().map(|run| (run.remaining(), run.frame()));
        assert_eq!(fresh, Some((3.0, 1)));

        run_to_end(&mut zoom, &mut radius);
        assert!(((radius - restart_at) - 3.0).abs() <= ZOOM_STOP_THRESHOLD + 1e-4);
    }

    #[test]
    fn tiny_notch_finishes_without_moving() {
        let mut zoom = ZoomAnimator::new(0.005, 5, LIMITS, EasingKind::Linear);
        let mut radius = 5.0;
        zoom.start(ZoomDirection::In);
        assert_eq!(zoom.step(&mut radius), Some(ZoomStep::Finished));
        assert_eq!(radius, 5.0);
    }

    #[test]
    fn easing_kind_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrap {
            easing: EasingKind,
        }
        let w: Wrap = toml::from_str("easing = \"quadratic\"").unwrap();
        assert_eq!(w.easing, EasingKind::Quadratic);
    }
}
