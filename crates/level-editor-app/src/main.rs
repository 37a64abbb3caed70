//! Level Editor demo host.
//!
//! Opens a window over a small seeded scene.
//!
//! Controls: click / drag to select, `1`-`4` switch mode (Move, Scale,
//! Rotate, Edit Shape), Shift extends the selection, Alt resizes
//! symmetrically, Escape cancels, Ctrl+Z / Ctrl+Y undo and redo.
//!
//! Set `LEVEL_EDITOR_CONFIG` to a JSON file to override editor tunables.

use anyhow::Context;
use bevy::prelude::*;
use level_editor_core::bevy::{
    EditorScene, HistoryAppliedEvent, LevelEditorPlugin, SelectionChangedEvent, UndoPushedEvent,
};
use level_editor_core::{AreaLight, Collider, EditorConfig, EntityTable, Renderable, SceneEntity};

const CONFIG_ENV: &str = "LEVEL_EDITOR_CONFIG";

fn load_config() -> anyhow::Result<Option<EditorConfig>> {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return Ok(None);
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = EditorConfig::from_json(&json).with_context(|| format!("parsing {path}"))?;
    Ok(Some(config))
}

fn seed_scene() -> EntityTable {
    let mut table = EntityTable::new();

    let id = table.allocate_id();
    table.insert(
        SceneEntity::new(id, "crate")
            .at(Vec2::new(-200.0, 0.0))
            .with_collider(Collider::boxed(80.0, 80.0))
            .with_renderable(Renderable::new(0, Vec2::splat(80.0))),
    );

    // Stacked on the crate to exercise click cycling
    let id = table.allocate_id();
    table.insert(
        SceneEntity::new(id, "barrel")
            .at(Vec2::new(-200.0, 0.0))
            .with_collider(Collider::circle(30.0)),
    );

    let id = table.allocate_id();
    table.insert(
        SceneEntity::new(id, "ramp").at(Vec2::new(100.0, -50.0)).with_collider(Collider::polygon(vec![
            Vec2::new(-60.0, -30.0),
            Vec2::new(60.0, -30.0),
            Vec2::new(60.0, 30.0),
        ])),
    );

    let id = table.allocate_id();
    table.insert(
        SceneEntity::new(id, "lamp")
            .at(Vec2::new(150.0, 150.0))
            .with_light(AreaLight::new(120.0, 60.0)),
    );

    let id = table.allocate_id();
    table.insert(SceneEntity::new(id, "spawn point").at(Vec2::new(0.0, 200.0)));

    table
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn log_editor_messages(
    mut selections: MessageReader<SelectionChangedEvent>,
    mut pushes: MessageReader<UndoPushedEvent>,
    mut replays: MessageReader<HistoryAppliedEvent>,
) {
    for event in selections.read() {
        tracing::info!("[app] selection: {:?}", event.selected);
    }
    for event in pushes.read() {
        tracing::info!("[app] undo pushed: {}", event.label);
    }
    for event in replays.read() {
        tracing::info!("[app] {:?}: {}", event.direction, event.label);
    }
}

fn main() -> anyhow::Result<()> {
    let mut config = load_config()?.unwrap_or_default();
    // Bevy world space is Y-up
    config.y_axis_down = false;

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Level Editor".to_string(),
            ..default()
        }),
        ..default()
    }));

    app.insert_resource(EditorScene(seed_scene()));
    app.add_plugins(LevelEditorPlugin {
        config: Some(config),
        state_store: None,
    });
    app.add_systems(Startup, setup_camera);
    app.add_systems(Update, log_editor_messages);

    match app.run() {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("editor exited with code {code}"),
    }
}
