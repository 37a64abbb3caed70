//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `LevelEditorHeadlessPlugin` for testing the editor
//! systems without a rendering or windowing backend.

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::plugin::LevelEditorHeadlessPlugin;
use crate::bevy::resources::{CursorScreenPosition, EditorScene, EditorSelection, EditorView};
use crate::bevy::state_store::EditorStateStore;
use crate::camera::CameraProjection;
use crate::scene::{EntityId, SceneEntity};

/// Every message of type `M` written since the app was created.
#[derive(Resource)]
pub(crate) struct MessageLog<M: Message>(pub Vec<M>);

impl<M: Message> Default for MessageLog<M> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record_messages<M: Message + Clone>(mut reader: MessageReader<M>, mut log: ResMut<MessageLog<M>>) {
    log.0.extend(reader.read().cloned());
}

/// A headless Bevy app wrapper for testing.
///
/// Input is written straight into the `ButtonInput` resources and cleared
/// after every frame, the way `InputPlugin` would.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Create a new test app with the default (Y-up) config.
    pub fn new() -> Self {
        Self::with_plugin(LevelEditorHeadlessPlugin::default())
    }

    /// Create a test app sharing `store` with the editor.
    pub fn with_store(store: EditorStateStore) -> Self {
        Self::with_plugin(LevelEditorHeadlessPlugin {
            config: None,
            state_store: Some(store),
        })
    }

    pub fn with_plugin(plugin: LevelEditorHeadlessPlugin) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(plugin);

        app.init_resource::<MessageLog<SelectionChangedEvent>>()
            .init_resource::<MessageLog<ColliderChangedEvent>>()
            .init_resource::<MessageLog<UndoPushedEvent>>()
            .init_resource::<MessageLog<HistoryAppliedEvent>>()
            .init_resource::<MessageLog<ModeChangedEvent>>();
        app.add_systems(
            PostUpdate,
            (
                record_messages::<SelectionChangedEvent>,
                record_messages::<ColliderChangedEvent>,
                record_messages::<UndoPushedEvent>,
                record_messages::<HistoryAppliedEvent>,
                record_messages::<ModeChangedEvent>,
            ),
        );

        // Run one update to initialize all resources
        app.update();
        Self { app }
    }

    /// Run a single frame update, then clear per-frame input.
    pub fn update(&mut self) {
        self.app.update();
        let world = self.app.world_mut();
        world.resource_mut::<ButtonInput<MouseButton>>().clear();
        world.resource_mut::<ButtonInput<KeyCode>>().clear();
    }

    /// Add an entity to the edited scene.
    pub fn spawn(&mut self, entity: SceneEntity) -> EntityId {
        self.app
            .world_mut()
            .resource_mut::<EditorScene>()
            .insert(entity)
    }

    pub fn entity(&self, id: EntityId) -> SceneEntity {
        self.app
            .world()
            .resource::<EditorScene>()
            .get(id)
            .cloned()
            .expect("entity should exist")
    }

    pub fn selection(&self) -> Vec<EntityId> {
        self.app.world().resource::<EditorSelection>().ids().to_vec()
    }

    /// Place the cursor over a world position and run a frame.
    pub fn move_to(&mut self, world: Vec2) {
        let screen = self.app.world().resource::<EditorView>().world_to_screen(world);
        self.app.world_mut().resource_mut::<CursorScreenPosition>().0 = Some(screen);
        self.update();
    }

    pub fn press_mouse(&mut self) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        self.update();
    }

    pub fn release_mouse(&mut self) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .release(MouseButton::Left);
        self.update();
    }

    /// Press and release the left button over a world position.
    pub fn click(&mut self, world: Vec2) {
        self.move_to(world);
        self.press_mouse();
        self.release_mouse();
    }

    /// Hover, press, move in two steps, release.
    pub fn drag(&mut self, from: Vec2, to: Vec2) {
        self.move_to(from);
        self.press_mouse();
        self.move_to(from.lerp(to, 0.5));
        self.move_to(to);
        self.release_mouse();
    }

    pub fn hold_key(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.app
            .world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .release(key);
    }

    /// Tap a key for one frame.
    pub fn tap_key(&mut self, key: KeyCode) {
        self.hold_key(key);
        self.update();
        self.release_key(key);
    }

    /// Tap a key while holding a modifier.
    pub fn chord(&mut self, modifier: KeyCode, key: KeyCode) {
        self.hold_key(modifier);
        self.tap_key(key);
        self.release_key(modifier);
    }

    /// Messages of type `M` recorded so far.
    pub fn messages<M: Message + Clone>(&self) -> Vec<M> {
        self.app.world().resource::<MessageLog<M>>().0.clone()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }
}
