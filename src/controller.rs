//! Controller steering the player's car.
//!
//! The held keys are sampled once per frame and turned into controls before the simulation runs.
//! Every control has a letter key and an arrow key; boost is on Z.

use bevy::prelude::*;

use crate::{domain::Controls, resource::ControlsRes, simulator::SimulationSet};

pub struct Controller;

const FORWARD_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const BACK_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const BOOST_KEYS: [KeyCode; 1] = [KeyCode::KeyZ];

fn control(keys: Res<ButtonInput<KeyCode>>, mut controls: ResMut<ControlsRes>) {
    **controls = Controls {
        forward: keys.any_pressed(FORWARD_KEYS),
        back: keys.any_pressed(BACK_KEYS),
        left: keys.any_pressed(LEFT_KEYS),
        right: keys.any_pressed(RIGHT_KEYS),
        boost: keys.any_pressed(BOOST_KEYS),
    };
}

impl Plugin for Controller {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlsRes>()
            .add_systems(Update, control.before(SimulationSet));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn held(keys: &[KeyCode]) -> Controls {
        let mut app = App::new();
        let mut input = ButtonInput::<KeyCode>::default();
        for key in keys {
            input.press(*key);
        }
        app.insert_resource(input)
            .init_resource::<ControlsRes>()
            .add_systems(Update, control);
        app.update();
        **app.world.resource::<ControlsRes>()
    }

    #[test]
    fn test_control_nothing_held() {
        assert_eq!(held(&[]), Controls::default());
    }

    #[test]
    fn test_control_letter_and_arrow_keys() {
        assert_eq!(
            held(&[KeyCode::KeyW, KeyCode::ArrowLeft, KeyCode::KeyZ]),
            Controls {
                forward: true,
                left: true,
                boost: true,
                ..Controls::default()
            }
        );
        assert_eq!(
            held(&[KeyCode::ArrowDown, KeyCode::KeyD]),
            Controls {
                back: true,
                right: true,
                ..Controls::default()
            }
        );
    }

    #[test]
    fn test_control_doubled_steering_stays_unit() {
        let controls = held(&[KeyCode::KeyD, KeyCode::ArrowRight]);
        assert_eq!(controls.steer(), 1.0);
        insta::assert_debug_snapshot!(controls, @r###"
        Controls {
            forward: false,
            back: false,
            left: false,
            right: true,
            boost: false,
        }
        "###);
    }
}
