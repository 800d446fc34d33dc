use crate::scene::Node;

/// Curvature of the scripted path; also scales per-step displacement.
pub const PATH_RADIUS: f32 = 0.015;
/// Angle advance per sub-step, in radians.
pub const ANGLE_STEP: f32 = 0.01;

/// Scripted ball movement along two orthogonal circular arcs.
///
/// Both arcs share one monotonically advancing angle and one integer
/// speed. Each enabled arc runs `speed` sub-steps per frame; a speed of
/// zero takes no steps, so the ball and the angle both hold still. The
/// arcs are independent toggles and their displacements superimpose
/// when both are on.
#[derive(Debug, Clone, Copy)]
pub struct BallFlight {
    pub first_arc: bool,
    pub second_arc: bool,
    pub speed: u32,
    pub angle: f32,
}

impl Default for BallFlight {
    fn default() -> Self {
        Self {
            first_arc: false,
            second_arc: false,
            speed: 1,
            angle: 0.0,
        }
    }
}

impl BallFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame, pushing the displacement into the ball node.
    pub fn advance(&mut self, ball: &mut Node) {
        self.advance_first(ball);
        self.advance_second(ball);
    }

    /// Arc in the YZ plane: the ball dips and curls toward the goal.
    fn advance_first(&mut self, ball: &mut Node) {
        if !self.first_arc {
            return;
        }
        for _ in 0..self.speed {
            ball.translate(
                0.0,
                -PATH_RADIUS * self.angle.cos(),
                -PATH_RADIUS * self.angle.sin(),
            );
            self.angle += ANGLE_STEP;
        }
    }

    /// Arc in the XZ plane: the ball bends sideways toward the goal.
    fn advance_second(&mut self, ball: &mut Node) {
        if !self.second_arc {
            return;
        }
        for _ in 0..self.speed {
            ball.translate(
                -PATH_RADIUS * self.angle.cos(),
                0.0,
                -PATH_RADIUS * self.angle.sin(),
            );
            self.angle += ANGLE_STEP;
        }
    }

    pub fn speed_up(&mut self) {
        self.speed += 1;
    }

    /// Floor-clamped at zero.
    pub fn slow_down(&mut self) {
        self.speed = self.speed.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;
    use crate::scene::{Material, Node};
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    fn ball() -> Node {
        Node::mesh(geometry::sphere(0.125, 8, 4), Material::flat(0xffaa11))
    }

    #[test]
    fn test_first_arc_step_at_angle_zero() {
        let mut ball = ball();
        let mut flight = BallFlight {
            first_arc: true,
            ..BallFlight::default()
        };
        flight.advance(&mut ball);
        let p = ball.position();
        assert!((p - Vec3::new(0.0, -PATH_RADIUS, 0.0)).length() < 1e-7);
        assert!((flight.angle - ANGLE_STEP).abs() < 1e-7);
    }

    #[test]
    fn test_first_arc_step_at_quarter_turn() {
        let mut ball = ball();
        let mut flight = BallFlight {
            first_arc: true,
            angle: FRAC_PI_2,
            ..BallFlight::default()
        };
        flight.advance(&mut ball);
        let p = ball.position();
        assert!((p - Vec3::new(0.0, 0.0, -PATH_RADIUS)).length() < 1e-6);
    }

    #[test]
    fn test_first_arc_never_moves_x() {
        let mut ball = ball();
        let mut flight = BallFlight {
            first_arc: true,
            speed: 3,
            ..BallFlight::default()
        };
        for _ in 0..200 {
            flight.advance(&mut ball);
        }
        assert_eq!(ball.position().x, 0.0);
        assert!(ball.position().y != 0.0 || ball.position().z != 0.0);
    }

    #[test]
    fn test_second_arc_never_moves_y() {
        let mut ball = ball();
        let mut flight = BallFlight {
            second_arc: true,
            speed: 3,
            ..BallFlight::default()
        };
        for _ in 0..200 {
            flight.advance(&mut ball);
        }
        assert_eq!(ball.position().y, 0.0);
        assert!(ball.position().x != 0.0 || ball.position().z != 0.0);
    }

    #[test]
    fn test_disabled_flight_is_a_no_op() {
        let mut ball = ball();
        let mut flight = BallFlight::new();
        flight.advance(&mut ball);
        assert_eq!(ball.position(), Vec3::ZERO);
        assert_eq!(flight.angle, 0.0);
    }

    #[test]
    fn test_speed_floor_stops_ball_and_angle() {
        let mut flight = BallFlight {
            first_arc: true,
            ..BallFlight::default()
        };
        flight.slow_down();
        flight.slow_down();
        assert_eq!(flight.speed, 0);

        let mut ball = ball();
        flight.advance(&mut ball);
        assert_eq!(ball.position(), Vec3::ZERO);
        assert_eq!(flight.angle, 0.0);
    }

    #[test]
    fn test_speed_multiplies_substeps() {
        let mut slow = ball();
        let mut fast = ball();
        let mut one = BallFlight {
            first_arc: true,
            ..BallFlight::default()
        };
        let mut three = BallFlight {
            first_arc: true,
            speed: 3,
            ..BallFlight::default()
        };
        for _ in 0..3 {
            one.advance(&mut slow);
        }
        three.advance(&mut fast);
        assert!((one.angle - three.angle).abs() < 1e-7);
        assert!((slow.position() - fast.position()).length() < 1e-7);
    }

    #[test]
    fn test_both_arcs_superimpose_and_share_angle() {
        let mut ball = ball();
        let mut flight = BallFlight {
            first_arc: true,
            second_arc: true,
            ..BallFlight::default()
        };
        flight.advance(&mut ball);
        // First arc steps at angle 0, second at angle 0.01
        let expected = Vec3::new(
            -PATH_RADIUS * ANGLE_STEP.cos(),
            -PATH_RADIUS,
            -PATH_RADIUS * ANGLE_STEP.sin(),
        );
        assert!((ball.position() - expected).length() < 1e-7);
        assert!((flight.angle - 2.0 * ANGLE_STEP).abs() < 1e-7);
    }

    #[test]
    fn test_angle_is_monotonic() {
        let mut ball = ball();
        let mut flight = BallFlight {
            first_arc: true,
            ..BallFlight::default()
        };
        let mut last = flight.angle;
        for _ in 0..1000 {
            flight.advance(&mut ball);
            assert!(flight.angle > last);
            last = flight.angle;
        }
    }
}
