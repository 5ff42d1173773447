use std::f64::consts::PI;

use crate::util::{
    difficulty::cosine_falloff,
    vector::{Vec2, Vector},
};

/// Geometry of snap and flow motion.
///
/// A snap is a ballistic motion that accelerates into and decelerates out of
/// the target while a flow only pays for the net displacement.
pub struct SnapFlowEvaluator;

impl SnapFlowEvaluator {
    /// Estimated tendency for a motion to be a snap (1) rather than a flow
    /// (0), given the current snap force volatility.
    pub fn snappiness(volatility: f64, snap_threshold: f64, flow_threshold: f64) -> f64 {
        cosine_falloff(volatility, snap_threshold, flow_threshold)
    }

    /// How much the direction of two forces differs, in `[0, 2]`.
    pub fn direction_change<const N: usize>(a: &Vector<N>, b: &Vector<N>) -> f64 {
        (a.unit() - b.unit()).length()
    }

    pub fn energy(moving_force: &Vec2, stopping_force: &Vec2, snappiness: f64) -> f64 {
        let moving = moving_force.length();
        let stopping = stopping_force.length();

        (moving + stopping) * snappiness + moving * (1.0 - snappiness)
    }

    /// Time in milliseconds that the cursor spends within the target's
    /// radius while travelling `distance` over `delta_time`.
    pub fn imprecision(distance: f64, target_radius: f64, delta_time: f64, snappiness: f64) -> f64 {
        if distance < target_radius || distance <= 0.0 {
            // The cursor starts out within the target already
            return delta_time;
        }

        let target_portion = target_radius / distance;
        let threshold = 1.0 - target_portion;

        let snap_portion = f64::acos(1.0 - 2.0 * threshold) / PI;
        let time_to_threshold = snappiness * snap_portion + (1.0 - snappiness) * threshold;

        (1.0 - time_to_threshold) * delta_time
    }
}
