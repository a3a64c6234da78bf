//! 3D visualization.

use std::f32::consts::FRAC_PI_2;

use bevy::{asset::LoadState, core_pipeline::tonemapping::Tonemapping, prelude::*};

use crate::{
    domain::{Dimensions, Position, Race, VehicleState, WorldConfig},
    resource::{RaceRes, RngRes},
    simulator::SimulationSet,
};

pub struct Visualizer;

impl Plugin for Visualizer {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, set_up)
            .add_systems(
                Update,
                (
                    update_text,
                    handle_keyboard_input.before(SimulationSet),
                    fall_back_to_placeholder_skins,
                    (update_cars, follow_player).chain().after(SimulationSet),
                ),
            )
            .insert_resource(ClearColor(SKY_COLOR))
            .init_resource::<Scene>();
    }
}

#[derive(Resource, Default)]
pub struct Scene {
    player: Option<Entity>,
    traffic: Vec<Entity>,
    skins: Vec<Skin>,
    show_text: bool,
}

/// Material shared by all cars of one kind. Until the texture is loaded the car shows the base
/// color only.
struct Skin {
    path: &'static str,
    material: Handle<StandardMaterial>,
    texture: Option<Handle<Image>>,
}

const SKY_COLOR: Color = Color::rgb(0.53, 0.81, 0.92);
const PLAYER_TEXTURE: &str = "textures/player_car.png";
const TRAFFIC_TEXTURE: &str = "textures/ai_car.png";

// Offsets of the chase camera from the player's car, as (lateral, forward) and height
const CAMERA_OFFSET: Position = Position::new(0.0, -25.0);
const CAMERA_HEIGHT: f64 = 8.0;
const CAMERA_TARGET: Position = Position::new(0.0, 20.0);
const CAMERA_TARGET_HEIGHT: f64 = 2.0;

fn set_up(
    mut scene: ResMut<Scene>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    race: Res<RaceRes>,
) {
    create_road(race.config(), &mut commands, &mut meshes, &mut materials);
    create_cars(
        &race,
        &mut scene,
        &mut commands,
        &mut meshes,
        &mut materials,
        &asset_server,
    );
    create_light(&mut commands);
    create_camera(&mut commands);
    create_text(&mut commands);
}

fn create_road(
    config: &WorldConfig,
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let road_length = config.road_length as f32;
    let center = to_bevy_position(Position::new(0.0, config.road_length / 2.0), 0.0);

    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(config.road_width as f32, 0.1, road_length)),
        material: materials.add(StandardMaterial {
            base_color: Color::GRAY,
            perceptual_roughness: 0.9,
            ..default()
        }),
        transform: Transform::from_translation(center),
        ..default()
    });

    commands.spawn(PbrBundle {
        mesh: meshes.add(Rectangle::new(config.grass_width as f32, road_length)),
        material: materials.add(StandardMaterial {
            base_color: Color::GREEN,
            perceptual_roughness: 1.0,
            ..default()
        }),
        transform: Transform::from_translation(center - Vec3::Y * 0.2)
            * Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        ..default()
    });
}

fn create_cars(
    race: &Race,
    scene: &mut ResMut<Scene>,
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    asset_server: &Res<AssetServer>,
) {
    let body = meshes.add(car_mesh(race.config().dimensions));

    let player_skin = create_skin(PLAYER_TEXTURE, Color::ORANGE_RED, materials, asset_server);
    scene.player = Some(spawn_car(
        race.player().vehicle(),
        &body,
        &player_skin,
        commands,
    ));

    let traffic_skin = create_skin(TRAFFIC_TEXTURE, Color::ALICE_BLUE, materials, asset_server);
    scene.traffic = race
        .traffic()
        .vehicles()
        .iter()
        .map(|vehicle| spawn_car(vehicle, &body, &traffic_skin, commands))
        .collect();

    scene.skins = vec![player_skin, traffic_skin];
}

fn car_mesh(dimensions: Dimensions) -> Cuboid {
    Cuboid::new(
        dimensions.width as f32,
        dimensions.height as f32,
        dimensions.length as f32,
    )
}

fn create_skin(
    path: &'static str,
    color: Color,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    asset_server: &Res<AssetServer>,
) -> Skin {
    let texture = asset_server.load(path);
    Skin {
        path,
        material: materials.add(StandardMaterial {
            base_color: color,
            base_color_texture: Some(texture.clone()),
            metallic: 0.6,
            perceptual_roughness: 0.4,
            ..default()
        }),
        texture: Some(texture),
    }
}

fn spawn_car(
    vehicle: &VehicleState,
    mesh: &Handle<Mesh>,
    skin: &Skin,
    commands: &mut Commands,
) -> Entity {
    commands
        .spawn(PbrBundle {
            mesh: mesh.clone(),
            material: skin.material.clone(),
            transform: car_transform(vehicle),
            ..default()
        })
        .id()
}

fn create_light(commands: &mut Commands) {
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            0.85 * std::f32::consts::PI,
            -std::f32::consts::FRAC_PI_4,
        )),
        ..default()
    });
}

fn create_camera(commands: &mut Commands) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            hdr: true,
            ..default()
        },
        tonemapping: Tonemapping::TonyMcMapface,
        transform: camera_transform(Position::default()),
        ..default()
    });
}

fn create_text(commands: &mut Commands) {
    let text_style = TextStyle {
        font_size: 20.0,
        ..default()
    };
    commands.spawn(
        TextBundle::from_sections(vec![TextSection::new("", text_style.clone())]).with_style(
            Style {
                position_type: PositionType::Absolute,
                bottom: Val::Px(12.0),
                left: Val::Px(12.0),
                ..default()
            },
        ),
    );
}

fn update_cars(scene: Res<Scene>, mut transforms: Query<&mut Transform>, race: Res<RaceRes>) {
    if let Some(entity) = scene.player {
        if let Ok(mut transform) = transforms.get_mut(entity) {
            *transform = car_transform(race.player().vehicle());
        }
    }

    for (vehicle, entity) in std::iter::zip(race.traffic().vehicles(), scene.traffic.iter()) {
        if let Ok(mut transform) = transforms.get_mut(*entity) {
            *transform = car_transform(vehicle);
        }
    }
}

fn follow_player(mut cameras: Query<&mut Transform, With<Camera3d>>, race: Res<RaceRes>) {
    let position = race.player().vehicle().position();
    for mut transform in cameras.iter_mut() {
        *transform = camera_transform(position);
    }
}

/// Replaces textures that failed to load with the plain base color.
fn fall_back_to_placeholder_skins(
    mut scene: ResMut<Scene>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    for skin in scene.skins.iter_mut() {
        let Some(texture) = &skin.texture else {
            continue;
        };

        if asset_server.get_load_state(texture.id()) == Some(LoadState::Failed) {
            warn!("texture {} unavailable, using placeholder", skin.path);
            if let Some(material) = materials.get_mut(&skin.material) {
                material.base_color_texture = None;
            }
            skin.texture = None;
        }
    }
}

fn update_text(mut text: Query<&mut Text>, scene: Res<Scene>, race: Res<RaceRes>) {
    let mut text = text.single_mut();
    if scene.show_text {
        let vehicle = race.player().vehicle();
        text.sections[0].value = format!(
            "SPD: {:5.1}   DIST: {:7.0}   CRASHES: {}   RECYCLED: {}   CARS: {}",
            vehicle.speed(),
            vehicle.position().forward(),
            race.crashes(),
            race.recycled(),
            race.config().cars_racing()
        );
    } else {
        text.sections[0].value = String::new();
    }
}

fn handle_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut scene: ResMut<Scene>,
    mut race: ResMut<RaceRes>,
    mut rng: ResMut<RngRes>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        match Race::new(race.config().clone(), &mut **rng) {
            Ok(restarted) => {
                info!("race restarted");
                **race = restarted;
            }
            Err(error) => warn!("cannot restart race: {error}"),
        }
    }

    if keys.just_pressed(KeyCode::KeyT) {
        scene.show_text = !scene.show_text;
    }
}

fn car_transform(vehicle: &VehicleState) -> Transform {
    Transform::from_translation(to_bevy_position(
        vehicle.position(),
        vehicle.dimensions().ride_height,
    ))
}

fn camera_transform(player: Position) -> Transform {
    Transform::from_translation(to_bevy_position(player + CAMERA_OFFSET, CAMERA_HEIGHT))
        .looking_at(
            to_bevy_position(player + CAMERA_TARGET, CAMERA_TARGET_HEIGHT),
            Vec3::Y,
        )
}

/// Bevy looks down the negative z-axis, so the road runs along -z with lateral offsets on x.
fn to_bevy_position(position: Position, height: f64) -> Vec3 {
    Vec3::new(
        position.lateral() as f32,
        height as f32,
        -position.forward() as f32,
    )
}
