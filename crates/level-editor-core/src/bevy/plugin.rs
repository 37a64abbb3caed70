//! Bevy plugins for the level editor.
//!
//! Provides:
//! - `LevelEditorHeadlessPlugin`: Editing logic only (no rendering/window dependencies) for headless testing
//! - `LevelEditorPlugin`: `LevelEditorHeadlessPlugin` + window input and Gizmos rendering

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::resources::*;
use crate::bevy::state_store::EditorStateStore;
use crate::bevy::systems;
use crate::camera::OrthoCamera;
use crate::config::EditorConfig;

/// Ordering of the editor's `Update` systems.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorSet {
    /// Pointer sampling and hotkeys.
    Input,
    /// UI requests and the editor frame.
    Edit,
    /// Messages and store sync.
    Publish,
}

/// Config used when the host does not supply one: Bevy world space is Y-up.
fn bevy_default_config() -> EditorConfig {
    EditorConfig {
        y_axis_down: false,
        ..EditorConfig::default()
    }
}

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing the editing logic without rendering or window
/// dependencies.
///
/// Use this plugin in tests with `MinimalPlugins` to drive the editor by
/// writing [`CursorScreenPosition`] and the `ButtonInput` resources directly.
///
/// Excluded systems (window/rendering-dependent):
/// - Window-dependent systems (track_cursor_position, sync_editor_view)
/// - Gizmos-based rendering (render_scene_entities, flush_draw_queue)
#[derive(Default)]
pub struct LevelEditorHeadlessPlugin {
    pub config: Option<EditorConfig>,
    pub state_store: Option<EditorStateStore>,
}

impl LevelEditorHeadlessPlugin {
    fn resolved_config(&self) -> EditorConfig {
        let Some(config) = &self.config else {
            return bevy_default_config();
        };
        match config.validate() {
            Ok(()) => config.clone(),
            Err(err) => {
                tracing::warn!("[editor] invalid config, using defaults: {}", err);
                bevy_default_config()
            }
        }
    }
}

impl Plugin for LevelEditorHeadlessPlugin {
    fn build(&self, app: &mut App) {
        let config = self.resolved_config();

        // ====================================================================
        // Resources
        // ====================================================================

        // Scene and selection may be inserted by the host before the plugin
        app.init_resource::<EditorScene>()
            .init_resource::<EditorSelection>()
            .init_resource::<SceneEditorRes>()
            .init_resource::<UndoHistoryRes>();

        app.insert_resource(EditorView::new(OrthoCamera {
            y_down: config.y_axis_down,
            ..OrthoCamera::default()
        }))
        .insert_resource(config)
        .insert_resource(self.state_store.clone().unwrap_or_default());

        app.init_resource::<CursorScreenPosition>()
            .init_resource::<PointerRes>()
            .init_resource::<EditorCursor>()
            .init_resource::<DrawQueue>();

        // Provided by InputPlugin in windowed apps
        app.init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>();

        // ====================================================================
        // Messages
        // ====================================================================
        app.add_message::<SelectionChangedEvent>()
            .add_message::<ColliderChangedEvent>()
            .add_message::<UndoPushedEvent>()
            .add_message::<HistoryAppliedEvent>()
            .add_message::<ModeChangedEvent>();

        // ====================================================================
        // Editor systems
        // ====================================================================
        app.configure_sets(
            Update,
            (EditorSet::Input, EditorSet::Edit, EditorSet::Publish).chain(),
        );

        app.add_systems(
            Update,
            (systems::sample_pointer, systems::handle_editor_hotkeys)
                .chain()
                .in_set(EditorSet::Input),
        );

        app.add_systems(
            Update,
            (systems::apply_store_requests, systems::run_scene_editor)
                .chain()
                .in_set(EditorSet::Edit),
        );

        app.add_systems(
            Update,
            (
                systems::emit_collider_changes,
                systems::sync_editor_state_to_store,
            )
                .chain()
                .in_set(EditorSet::Publish),
        );
    }
}

// ============================================================================
// Windowed Plugin (headless + window input + rendering)
// ============================================================================

/// Full editor plugin: includes [`LevelEditorHeadlessPlugin`] and adds
/// cursor tracking, camera sync and Gizmos rendering.
///
/// Expects `DefaultPlugins` and a `Camera2d`.
#[derive(Default)]
pub struct LevelEditorPlugin {
    pub config: Option<EditorConfig>,
    pub state_store: Option<EditorStateStore>,
}

impl Plugin for LevelEditorPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(LevelEditorHeadlessPlugin {
            config: self.config.clone(),
            state_store: self.state_store.clone(),
        });

        app.init_resource::<systems::SceneGizmoConfig>();

        // ====================================================================
        // Window input (before pointer sampling)
        // ====================================================================
        app.add_systems(
            Update,
            (systems::track_cursor_position, systems::sync_editor_view)
                .chain()
                .before(EditorSet::Input),
        );

        // ====================================================================
        // Rendering
        // ====================================================================
        app.add_systems(
            Update,
            (systems::render_scene_entities, systems::flush_draw_queue)
                .chain()
                .after(EditorSet::Edit),
        );
    }
}
