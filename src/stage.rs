use glam::Vec3;

use crate::input::Action;
use crate::meshes::{create_ball, create_goal, create_keeper};
use crate::motion::BallFlight;
use crate::scene::{Node, NodeId, Scene};

const BACKGROUND: u32 = 0x228b22; // forest green pitch

/// Goalkeeper parked outside the scene or attached under a root id.
///
/// The node is built once and moved between the two states, so its
/// transform and children survive any number of visibility toggles.
#[derive(Debug, Default)]
struct KeeperSlot {
    attached: Option<NodeId>,
    parked: Option<Node>,
}

impl KeeperSlot {
    fn toggle(&mut self, scene: &mut Scene) {
        if let Some(id) = self.attached.take() {
            self.parked = scene.remove(id);
        } else if let Some(node) = self.parked.take() {
            self.attached = Some(scene.insert(node));
        }
    }

    fn shown(&self) -> bool {
        self.attached.is_some()
    }
}

/// Single owner of the scene and every toggle the keyboard can reach.
///
/// Both entry points go through here: the input dispatcher calls
/// [`Stage::apply`], the render loop calls [`Stage::tick`]. Nothing else
/// writes the state.
#[derive(Debug)]
pub struct Stage {
    scene: Scene,
    goal: NodeId,
    ball: NodeId,
    keeper: KeeperSlot,
    flight: BallFlight,
    orbit_enabled: bool,
}

impl Stage {
    /// Assemble the pitch. `show_keeper` starts with the goalkeeper in
    /// the scene instead of parked.
    pub fn new(show_keeper: bool) -> Self {
        let mut scene = Scene::with_background(BACKGROUND);
        let goal = scene.insert(create_goal());
        let ball = scene.insert(create_ball());

        let mut keeper = KeeperSlot {
            attached: None,
            parked: Some(create_keeper()),
        };
        if show_keeper {
            keeper.toggle(&mut scene);
        }

        Self {
            scene,
            goal,
            ball,
            keeper,
            flight: BallFlight::new(),
            orbit_enabled: true,
        }
    }

    /// Apply one key-press action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::ToggleOrbit => self.orbit_enabled = !self.orbit_enabled,
            Action::ToggleFirstArc => self.flight.first_arc = !self.flight.first_arc,
            Action::ToggleSecondArc => self.flight.second_arc = !self.flight.second_arc,
            Action::ShrinkGoal => {
                if let Some(goal) = self.scene.get_mut(self.goal) {
                    goal.scale(0.95, 0.95, 0.95);
                }
            }
            Action::SpeedUp => self.flight.speed_up(),
            Action::SpeedDown => self.flight.slow_down(),
            Action::ToggleWireframe => self.scene.toggle_wireframe(),
            Action::ToggleKeeper => self.keeper.toggle(&mut self.scene),
        }
    }

    /// Advance the scripted ball flight by one frame.
    pub fn tick(&mut self) {
        if let Some(ball) = self.scene.get_mut(self.ball) {
            self.flight.advance(ball);
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn flight(&self) -> &BallFlight {
        &self.flight
    }

    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    pub fn keeper_shown(&self) -> bool {
        self.keeper.shown()
    }

    pub fn ball_position(&self) -> Vec3 {
        self.scene
            .get(self.ball)
            .map(Node::position)
            .unwrap_or(Vec3::ZERO)
    }

    /// Uniform scale currently applied to the goal group.
    pub fn goal_scale(&self) -> f32 {
        self.scene
            .get(self.goal)
            .map(|goal| goal.transform.x_axis.truncate().length())
            .unwrap_or(1.0)
    }
}
