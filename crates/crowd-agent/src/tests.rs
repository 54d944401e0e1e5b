//! Unit tests for crowd-agent.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use crowd_core::{ActorId, EdgeId, PolygonId, SimRng, SlotId, Vec2, Vec3};
    use crowd_route::{
        LaneNetworkBuilder, LaneRoutePoint, Path, SidewalkNetworkBuilder, SidewalkRoutePoint,
    };
    use crowd_world::{ActorState, BoundingBox};

    use crate::{AgentBody, CrowdAgent};

    pub fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    /// Vehicle path along a straight one-lane edge (0,0) → (`length`,0),
    /// starting at the origin.
    pub fn vehicle_body(length: f32, min_points: usize) -> Option<AgentBody> {
        let mut b = LaneNetworkBuilder::new();
        let a = b.add_node(Vec2::new(0.0, 0.0));
        let c = b.add_node(Vec2::new(length, 0.0));
        b.add_edge(a, c, 1);
        let map = Arc::new(b.build().unwrap());
        let start = LaneRoutePoint { edge: EdgeId(0), lane: 0, segment: 0, offset: 0.0 };
        Path::starting_at(map, start, min_points, 1.0, SimRng::new(1))
            .map(|path| AgentBody::Vehicle { path })
    }

    /// Pedestrian path around a 20 × 20 block, starting at the origin
    /// walking +x.
    pub fn pedestrian_body(min_points: usize) -> AgentBody {
        let mut b = SidewalkNetworkBuilder::new();
        b.add_rect(Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0));
        let map = Arc::new(b.build().unwrap());
        let start = SidewalkRoutePoint { polygon: PolygonId(0), segment: 0, offset: 0.0, reverse: false };
        let path = Path::starting_at(map, start, min_points, 1.0, SimRng::new(1)).unwrap();
        AgentBody::Pedestrian { path }
    }

    pub fn state(pos: Vec2, yaw_deg: f32, vel: Vec2, extent: Vec2, offset: Vec2) -> ActorState {
        ActorState {
            location:     pos.extend(0.5),
            velocity:     vel.extend(0.0),
            yaw_deg,
            bounding_box: BoundingBox::new(
                Vec3::new(offset.x, offset.y, 0.7),
                Vec3::new(extent.x, extent.y, 0.7),
            ),
        }
    }

    pub fn agent(body: AgentBody, state: ActorState, speed: f32) -> CrowdAgent {
        CrowdAgent::new(ActorId(1), SlotId(0), speed, state, body)
    }
}

// ── Footprint ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod footprint {
    use crowd_core::Vec2;
    use super::helpers::*;
    use crate::{PEDESTRIAN_HALF_EXTENT, footprint_corners};

    fn signed_area(c: &[Vec2; 4]) -> f32 {
        (0..4).map(|i| c[i].det(c[(i + 1) % 4])).sum::<f32>() * 0.5
    }

    #[test]
    fn corners_wind_counter_clockwise_from_rear_left() {
        let c = footprint_corners(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        assert_eq!(c[0], Vec2::new(-2.0, 1.0));
        assert_eq!(c[1], Vec2::new(-2.0, -1.0));
        assert_eq!(c[2], Vec2::new(2.0, -1.0));
        assert_eq!(c[3], Vec2::new(2.0, 1.0));
        assert!(signed_area(&c) > 0.0);
    }

    #[test]
    fn centre_is_position_plus_rotated_offset() {
        for yaw in [0.0_f32, 37.0, 90.0, -120.0, 180.0] {
            let pos = Vec2::new(3.0, -2.0);
            let st  = state(pos, yaw, Vec2::ZERO, Vec2::new(2.4, 1.0), Vec2::new(0.5, 0.0));
            let a   = agent(vehicle_body(50.0, 5).unwrap(), st, 5.0);
            let c   = a.bounding_box_corners();

            let mean = c.iter().fold(Vec2::ZERO, |acc, &p| acc + p) * 0.25;
            let expected = pos + Vec2::from_yaw_deg(yaw) * 0.5;
            assert!(mean.distance(expected) < 1e-4, "yaw {yaw}: {mean} vs {expected}");
            assert!(close(mean.distance(a.footprint_centre()), 0.0));
            assert!(signed_area(&c) > 0.0, "winding flipped at yaw {yaw}");
            assert!(close(signed_area(&c), 4.0 * 2.4 * 1.0));
        }
    }

    #[test]
    fn pedestrians_use_fixed_half_extent() {
        let st = state(Vec2::ZERO, 0.0, Vec2::ZERO, Vec2::new(0.5, 0.5), Vec2::ZERO);
        let a  = agent(pedestrian_body(5), st, 1.0);
        let h  = a.half_extents();
        assert_eq!(h, Vec2::new(PEDESTRIAN_HALF_EXTENT, PEDESTRIAN_HALF_EXTENT));
    }
}

// ── Preferred velocity ────────────────────────────────────────────────────────

#[cfg(test)]
mod preferred {
    use crowd_core::{AgentKind, Vec2};
    use crowd_rvo::AgentParams;
    use super::helpers::*;
    use crate::{Lifecycle, RouteHead};

    #[test]
    fn points_at_lookahead_scaled_by_speed() {
        let st = state(Vec2::ZERO, 0.0, Vec2::ZERO, Vec2::new(2.0, 1.0), Vec2::ZERO);
        let mut a = agent(vehicle_body(100.0, 10).unwrap(), st, 5.5);
        assert_eq!(a.body.path_len(), 10);

        let v = a.preferred_velocity(2, 10).unwrap();
        assert!(close(v.x, 5.5) && close(v.y, 0.0));
        // The reached start point was trimmed and the path topped up.
        assert_eq!(a.body.path_len(), 10);
    }

    #[test]
    fn lookahead_off_the_line_bends_velocity() {
        let st = state(Vec2::new(0.0, 2.0), 0.0, Vec2::ZERO, Vec2::new(2.0, 1.0), Vec2::ZERO);
        let mut a = agent(vehicle_body(100.0, 10).unwrap(), st, 2.0);
        let v = a.preferred_velocity(2, 10).unwrap();
        assert!(close(v.length(), 2.0));
        assert!(v.y < 0.0, "should steer back toward the lane");
    }

    #[test]
    fn dead_end_yields_none() {
        // Exactly ten points fit on a 9 m edge; trimming one leaves no room.
        let st = state(Vec2::ZERO, 0.0, Vec2::ZERO, Vec2::new(2.0, 1.0), Vec2::ZERO);
        let mut a = agent(vehicle_body(9.0, 10).unwrap(), st, 5.0);
        assert!(a.preferred_velocity(2, 10).is_none());
    }

    #[test]
    fn pedestrian_walks_toward_first_point() {
        let st = state(Vec2::new(0.3, 0.0), 0.0, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO);
        let mut a = agent(pedestrian_body(20), st, 1.2);
        let v = a.preferred_velocity(0, 20).unwrap();
        // Point 0 (the origin) was reached and trimmed; next is (1, 0).
        assert!(close(v.x, 1.2) && close(v.y, 0.0));
    }

    #[test]
    fn kind_params_and_lifecycle() {
        let st = state(Vec2::ZERO, 0.0, Vec2::ZERO, Vec2::new(2.0, 1.0), Vec2::ZERO);
        let a = agent(vehicle_body(20.0, 5).unwrap(), st, 5.0);
        assert_eq!(a.kind(), AgentKind::Vehicle);
        assert_eq!(a.agent_params(), AgentParams::VEHICLE);
        assert_eq!(a.lifecycle, Lifecycle::Spawning);
        assert!(!a.is_active());
        assert!(matches!(a.body.head(), Some(RouteHead::Network(p)) if p.offset == 0.0));
    }

    #[test]
    fn spawn_transform_follows_path_start() {
        let body = vehicle_body(20.0, 5).unwrap();
        let t = body.spawn_transform(0.5).unwrap();
        assert_eq!(t.location.z, 0.5);
        assert!(close(t.location.x, 0.0) && close(t.yaw_deg, 0.0));
        assert_eq!(body.start_position(), Some(Vec2::ZERO));
    }

    #[test]
    fn solver_agent_carries_state() {
        let st = state(Vec2::new(1.0, 1.0), 90.0, Vec2::new(0.0, 3.0), Vec2::new(2.0, 1.0), Vec2::ZERO);
        let a  = agent(vehicle_body(20.0, 5).unwrap(), st, 5.0);
        let s  = a.solver_agent(Vec2::new(0.0, 5.0));
        assert_eq!(s.position, Vec2::new(1.0, 1.0));
        assert_eq!(s.velocity, Vec2::new(0.0, 3.0));
        assert_eq!(s.corners, a.bounding_box_corners());
        assert!((s.centre() - a.footprint_centre()).length() < 1e-4);
    }
}

// ── Control law ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod control {
    use crowd_core::{ActorId, Vec2};
    use crowd_world::{Command, WalkerControl};
    use super::helpers::*;
    use crate::{Control, vehicle_control, walker_control};

    const FWD: Vec2 = Vec2::new(1.0, 0.0);

    #[test]
    fn speeding_up_uses_throttle() {
        let c = vehicle_control(Vec2::new(5.0, 0.0), FWD, Vec2::new(3.0, 0.0));
        assert!(close(c.throttle, 0.6));
        assert_eq!(c.brake, 0.0);
        assert_eq!(c.steer, 0.0);
    }

    #[test]
    fn slowing_down_uses_brake() {
        let c = vehicle_control(Vec2::new(3.0, 0.0), FWD, Vec2::new(5.0, 0.0));
        assert_eq!(c.throttle, 0.0);
        assert!(close(c.brake, 1.0));
    }

    #[test]
    fn matched_speed_coasts() {
        let c = vehicle_control(Vec2::new(0.0, 4.0), FWD, Vec2::new(4.0, 0.0));
        assert_eq!((c.throttle, c.brake), (0.0, 0.0));
        assert!(close(c.steer, 1.0), "90° left saturates");
    }

    #[test]
    fn steer_maps_angle_linearly() {
        let right30 = Vec2::from_yaw_deg(-30.0) * 2.0;
        let c = vehicle_control(right30, FWD, Vec2::ZERO);
        assert!(close(c.steer, -30.0 / 45.0));
        assert!(close(c.throttle, 1.0));
    }

    #[test]
    fn outputs_stay_in_range_and_exclusive() {
        for yaw in (-180..=180).step_by(15) {
            for desired in [0.0_f32, 0.5, 3.0, 12.0] {
                for current in [0.0_f32, 0.5, 3.0, 12.0] {
                    let c = vehicle_control(
                        Vec2::from_yaw_deg(yaw as f32) * desired,
                        Vec2::from_yaw_deg(10.0),
                        Vec2::new(current, 0.0),
                    );
                    assert!((-1.0..=1.0).contains(&c.steer));
                    assert!((0.0..=1.0).contains(&c.throttle));
                    assert!((0.0..=1.0).contains(&c.brake));
                    assert!(!(c.throttle > 0.0 && c.brake > 0.0));
                }
            }
        }
    }

    #[test]
    fn zero_solution_brakes_straight() {
        let c = vehicle_control(Vec2::ZERO, FWD, Vec2::new(2.0, 0.0));
        assert_eq!(c.steer, 0.0);
        assert_eq!(c.brake, 1.0);
    }

    #[test]
    fn walker_runs_at_preferred_speed() {
        let w = walker_control(Vec2::new(0.0, 3.0), 1.2);
        assert!(close(w.velocity.x, 0.0) && close(w.velocity.y, 1.2));
        assert_eq!(w.velocity.z, 0.0);
        assert_eq!(w.speed, 1.2);
        assert!(!w.jump);
        assert_eq!(walker_control(Vec2::ZERO, 1.2), WalkerControl::default());
    }

    #[test]
    fn control_becomes_command() {
        let w = walker_control(Vec2::new(1.0, 0.0), 1.0);
        assert_eq!(
            Control::Walker(w).into_command(ActorId(3)),
            Command::ApplyWalkerControl(ActorId(3), w)
        );
    }
}

// ── SlotRngs ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rngs {
    use crowd_core::SlotId;
    use crate::SlotRngs;

    #[test]
    fn one_stream_per_slot() {
        let mut a = SlotRngs::new(4, 99);
        let mut b = SlotRngs::new(4, 99);
        assert_eq!(a.len(), 4);
        let x: f32 = a.get_mut(SlotId(2)).gen_range(0.0..1.0);
        let y: f32 = b.get_mut(SlotId(2)).gen_range(0.0..1.0);
        assert_eq!(x, y);
    }
}
